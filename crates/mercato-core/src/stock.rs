//! # Stock Buckets
//!
//! Quantity → stock bucket classification and the composite product filter.
//!
//! ## Bucket Boundaries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stock Classification                             │
//! │                                                                         │
//! │   quantity:   < 0     0      1 ... 5       6 ...        (missing)       │
//! │               │       │      │             │               │            │
//! │               ▼       ▼      ▼             ▼               ▼            │
//! │            Other     Out   Limited       Other           Other          │
//! │                                                                         │
//! │   All = Out ∪ Limited ∪ Other   (superset, not a partition member)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Composite Filter
//! ```text
//! products ──► bucket == selected? (pass-through for All)
//!                   │
//!                   ▼
//!          name contains query? (case-folded, skipped when empty)
//!                   │
//!                   ▼
//!          filtered list, input order preserved
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::types::Product;
use crate::LIMITED_STOCK_MAX;

// =============================================================================
// Stock Bucket
// =============================================================================

/// Stock level classification of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum StockBucket {
    /// Every product (dashboard default).
    #[default]
    All,
    /// Quantity is exactly zero.
    Out,
    /// Quantity between 1 and 5 inclusive.
    Limited,
    /// Everything else, including malformed quantities.
    Other,
}

impl StockBucket {
    /// Tiles in dashboard order.
    pub const TILES: [StockBucket; 4] = [
        StockBucket::All,
        StockBucket::Out,
        StockBucket::Limited,
        StockBucket::Other,
    ];

    /// Lower-case key used by the frontend.
    pub fn key(&self) -> &'static str {
        match self {
            StockBucket::All => "all",
            StockBucket::Out => "out",
            StockBucket::Limited => "limited",
            StockBucket::Other => "other",
        }
    }

    /// Label on the dashboard tile.
    pub fn tile_label(&self) -> &'static str {
        match self {
            StockBucket::All => "All Products",
            StockBucket::Out => "Out of Stock",
            StockBucket::Limited => "Limited Stock",
            StockBucket::Other => "Other Stock",
        }
    }

    /// Heading of the product list while this bucket is selected.
    pub fn list_title(&self) -> &'static str {
        match self {
            StockBucket::All => "All Products",
            StockBucket::Out => "Out of Stock Products",
            StockBucket::Limited => "Limited Stock Products",
            StockBucket::Other => "Other Stock Products",
        }
    }

    /// Whether a product falls into this bucket.
    #[inline]
    pub fn contains(&self, product: &Product) -> bool {
        *self == StockBucket::All || product.stock_bucket() == *self
    }
}

impl fmt::Display for StockBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StockBucket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StockBucket::All),
            "out" => Ok(StockBucket::Out),
            "limited" => Ok(StockBucket::Limited),
            "other" => Ok(StockBucket::Other),
            other => Err(CoreError::UnknownStockBucket(other.to_string())),
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Classifies a stock quantity.
///
/// Total: negative quantities never reach us from the backend, but if one
/// does it lands in `Other` instead of failing.
///
/// ```rust
/// use mercato_core::stock::{classify_stock, StockBucket};
///
/// assert_eq!(classify_stock(0), StockBucket::Out);
/// assert_eq!(classify_stock(5), StockBucket::Limited);
/// assert_eq!(classify_stock(6), StockBucket::Other);
/// assert_eq!(classify_stock(-1), StockBucket::Other);
/// ```
pub fn classify_stock(quantity: i64) -> StockBucket {
    match quantity {
        0 => StockBucket::Out,
        1..=LIMITED_STOCK_MAX => StockBucket::Limited,
        _ => StockBucket::Other,
    }
}

/// Classifies a possibly missing quantity. Missing means `Other`.
#[inline]
pub fn classify_quantity(quantity: Option<i64>) -> StockBucket {
    quantity.map_or(StockBucket::Other, classify_stock)
}

// =============================================================================
// Composite Filter
// =============================================================================

/// Trims and case-folds a search query.
pub fn fold_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Single-product predicate behind [`filter_products`].
#[inline]
pub fn product_matches(product: &Product, bucket: StockBucket, folded_query: &str) -> bool {
    bucket.contains(product) && product.name_matches(folded_query)
}

/// Filters products by stock bucket and free-text name query.
///
/// Stable: the output keeps the snapshot's relative order.
pub fn filter_products<'a>(
    products: &'a [Product],
    bucket: StockBucket,
    query: &str,
) -> Vec<&'a Product> {
    let folded = fold_query(query);
    products
        .iter()
        .filter(|p| product_matches(p, bucket, &folded))
        .collect()
}

// =============================================================================
// Tile Counts
// =============================================================================

/// Per-bucket product counts for the dashboard tiles.
///
/// Always computed over the full snapshot, never over the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockCounts {
    pub all: usize,
    pub out: usize,
    pub limited: usize,
    pub other: usize,
}

impl StockCounts {
    /// Counts a product snapshot in one pass.
    pub fn from_products(products: &[Product]) -> Self {
        let mut counts = StockCounts {
            all: products.len(),
            ..StockCounts::default()
        };
        for product in products {
            match product.stock_bucket() {
                StockBucket::Out => counts.out += 1,
                StockBucket::Limited => counts.limited += 1,
                StockBucket::Other => counts.other += 1,
                StockBucket::All => {}
            }
        }
        counts
    }

    /// Count for one tile.
    pub fn get(&self, bucket: StockBucket) -> usize {
        match bucket {
            StockBucket::All => self.all,
            StockBucket::Out => self.out,
            StockBucket::Limited => self.limited,
            StockBucket::Other => self.other,
        }
    }
}

// =============================================================================
// Filter State
// =============================================================================

/// Selected stock bucket plus search text, owned by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    bucket: StockBucket,
    query: String,
}

impl FilterState {
    /// Starts with the given bucket and an empty query.
    pub fn new(bucket: StockBucket) -> Self {
        FilterState {
            bucket,
            query: String::new(),
        }
    }

    pub fn bucket(&self) -> StockBucket {
        self.bucket
    }

    /// The trimmed query as typed (original casing).
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Tile click.
    pub fn select_bucket(&mut self, bucket: StockBucket) {
        self.bucket = bucket;
    }

    /// Search box input. Surrounding whitespace is dropped.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
    }

    /// Query ready for matching.
    pub fn folded_query(&self) -> String {
        fold_query(&self.query)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
