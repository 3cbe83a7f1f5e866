//! # Domain Types
//!
//! Typed snapshot records consumed by the dashboard engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │  VariantItem    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  status (raw)   │   │  label          │       │
//! │  │  quantity ──────┼─► │  total          │   │  variant_type_id│──┐    │
//! │  │  price          │ │ └─────────────────┘   └─────────────────┘  │    │
//! │  └─────────────────┘ │         │                                   │    │
//! │                      ▼         ▼                ┌─────────────────┐│    │
//! │               StockBucket  OrderBucket          │  VariantType    │◄┘   │
//! │                                                 └─────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are produced by `mercato-data` after normalizing the loosely
//! typed REST payloads. From the core's perspective they are immutable:
//! a mutation elsewhere triggers a wholesale snapshot replacement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::orders::{classify_order, OrderBucket};
use crate::stock::{classify_quantity, StockBucket};

// =============================================================================
// Entity Reference
// =============================================================================

/// A reference to a category, sub-category, brand or variant type.
///
/// The backend sends either a bare id or an embedded `{ _id, name }`
/// summary; both normalize to this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EntityRef {
    pub id: String,
    pub name: Option<String>,
}

impl EntityRef {
    /// A reference known only by id.
    pub fn id_only(id: impl Into<String>) -> Self {
        EntityRef {
            id: id.into(),
            name: None,
        }
    }

    /// A reference with an embedded display name.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        EntityRef {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    /// Display name, also the only field free-text search looks at.
    pub name: String,

    /// Units in stock. `None` when the record carried no usable quantity.
    pub quantity: Option<i64>,

    pub price: Money,
    pub offer_price: Option<Money>,

    pub category: Option<EntityRef>,
    pub sub_category: Option<EntityRef>,
    pub brand: Option<EntityRef>,
    pub variant_type: Option<EntityRef>,

    /// Variant item ids attached to the product.
    pub variant_ids: Vec<String>,
}

impl Product {
    /// Minimal product, handy for fixtures.
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: i64) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            quantity: Some(quantity),
            price: Money::zero(),
            offer_price: None,
            category: None,
            sub_category: None,
            brand: None,
            variant_type: None,
            variant_ids: Vec::new(),
        }
    }

    /// The stock bucket this product belongs to right now.
    #[inline]
    pub fn stock_bucket(&self) -> StockBucket {
        classify_quantity(self.quantity)
    }

    /// Case-insensitive substring match on the name.
    ///
    /// `folded_query` must already be trimmed and lower-cased; an empty
    /// query matches everything.
    pub fn name_matches(&self, folded_query: &str) -> bool {
        folded_query.is_empty() || self.name.to_lowercase().contains(folded_query)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,

    /// Free-form status text exactly as the backend stored it.
    /// Empty when the record had none.
    pub status: String,

    pub total: Money,
    pub customer_name: Option<String>,
    pub item_count: usize,

    #[ts(as = "Option<String>")]
    pub ordered_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Minimal order, handy for fixtures.
    pub fn new(id: impl Into<String>, status: impl Into<String>) -> Self {
        Order {
            id: id.into(),
            status: status.into(),
            total: Money::zero(),
            customer_name: None,
            item_count: 0,
            ordered_at: None,
        }
    }

    /// Status bucket, or `None` for unclassified statuses.
    #[inline]
    pub fn bucket(&self) -> Option<OrderBucket> {
        classify_order(&self.status)
    }
}

// =============================================================================
// Variant Taxonomy
// =============================================================================

/// A variant type such as "Size" or "Color".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantType {
    pub id: String,
    pub label: String,
}

impl VariantType {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        VariantType {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A concrete variant ("XL", "Red") owned by exactly one variant type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariantItem {
    pub id: String,
    pub label: String,
    pub variant_type_id: String,
}

impl VariantItem {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        variant_type_id: impl Into<String>,
    ) -> Self {
        VariantItem {
            id: id.into(),
            label: label.into(),
            variant_type_id: variant_type_id.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
