//! # Wire Records
//!
//! Shapes of the REST backend's JSON payloads and their normalization into
//! mercato-core records.
//!
//! ## Normalization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  { "success": true, "data": [ {...}, {...} ] }    or   [ {...}, ... ]  │
//! │                        │                                                │
//! │                        ▼  extract_records                               │
//! │               Vec<serde_json::Value>                                    │
//! │                        │                                                │
//! │                        ▼  per record, by index                          │
//! │   ┌──────────────────────────────────────────────────────────┐         │
//! │   │ not an object       ──► warn!, skipped                    │         │
//! │   │ missing / blank _id ──► warn!, skipped                    │         │
//! │   │ anything else       ──► defaults (quantity None, "" ...)  │         │
//! │   └──────────────────────────────────────────────────────────┘         │
//! │                        │                                                │
//! │                        ▼                                                │
//! │       Vec<Product> / Vec<Order> / Vec<VariantType> / Vec<VariantItem>  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! References (`proCategoryId`, `userID`, `variantTypeId` ...) arrive either
//! as a bare id or as a populated `{ "_id", "name" }` document.
//!
//! Every field is lenient: a value of the wrong JSON type reads as absent, so
//! only the id decides whether a record is kept.

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use mercato_core::{EntityRef, Money, Order, Product, SnapshotKind, VariantItem, VariantType};

use crate::error::{DataError, DataResult};

// =============================================================================
// Lenient Scalars
// =============================================================================

/// A number that may have been sent as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl WireNumber {
    /// Finite numeric value, if there is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            WireNumber::Int(n) => Some(*n as f64),
            WireNumber::Float(x) => Some(*x).filter(|x| x.is_finite()),
            WireNumber::Text(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
            WireNumber::Other(_) => None,
        }
    }

    /// Whole-unit quantity.
    ///
    /// Fractions round away from zero so that 0.5 stays above zero and 5.5
    /// stays above five.
    pub fn as_quantity(&self) -> Option<i64> {
        match self {
            WireNumber::Int(n) => Some(*n),
            _ => self.as_f64().map(|x| {
                if x > 0.0 {
                    x.ceil() as i64
                } else {
                    x.floor() as i64
                }
            }),
        }
    }

    pub fn as_money(&self) -> Option<Money> {
        match self {
            WireNumber::Int(n) => Some(Money::from_cents(n.saturating_mul(100))),
            _ => self.as_f64().map(Money::from_decimal),
        }
    }
}

/// A reference that is either an id or a populated summary document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireRef {
    Id(String),
    Summary {
        #[serde(rename = "_id")]
        id: Option<String>,
        name: Option<String>,
    },
    Other(IgnoredAny),
}

impl WireRef {
    /// The referenced id, trimmed. `None` when blank or absent.
    pub fn id(&self) -> Option<&str> {
        let raw = match self {
            WireRef::Id(id) => id.as_str(),
            WireRef::Summary { id: Some(id), .. } => id.as_str(),
            _ => return None,
        };
        Some(raw.trim()).filter(|id| !id.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            WireRef::Summary { name: Some(name), .. } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn to_entity_ref(&self) -> Option<EntityRef> {
        let id = self.id()?;
        Some(match self.name() {
            Some(name) => EntityRef::named(id, name),
            None => EntityRef::id_only(id),
        })
    }
}

/// A string field; any other JSON type degrades to "absent".
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireText {
    Text(String),
    Other(IgnoredAny),
}

impl WireText {
    pub fn into_text(self) -> Option<String> {
        match self {
            WireText::Text(text) => Some(text),
            WireText::Other(_) => None,
        }
    }
}

/// A list field; anything that is not an array reads as empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireList<T> {
    Items(Vec<T>),
    Other(IgnoredAny),
}

impl<T> WireList<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            WireList::Items(items) => items,
            WireList::Other(_) => Vec::new(),
        }
    }
}

fn text(field: Option<WireText>) -> Option<String> {
    field.and_then(WireText::into_text)
}

fn list<T>(field: Option<WireList<T>>) -> Vec<T> {
    field.map(WireList::into_items).unwrap_or_default()
}

fn record_id(id: Option<WireText>) -> Option<String> {
    text(id)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

fn entity(reference: Option<WireRef>) -> Option<EntityRef> {
    reference.as_ref().and_then(WireRef::to_entity_ref)
}

// =============================================================================
// Records
// =============================================================================

/// Product document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProduct {
    #[serde(rename = "_id")]
    pub id: Option<WireText>,
    pub name: Option<WireText>,
    pub quantity: Option<WireNumber>,
    pub price: Option<WireNumber>,
    pub offer_price: Option<WireNumber>,
    pub pro_category_id: Option<WireRef>,
    pub pro_sub_category_id: Option<WireRef>,
    pub pro_brand_id: Option<WireRef>,
    pub pro_variant_type_id: Option<WireRef>,
    pub variants: Option<WireList<WireRef>>,
}

impl WireProduct {
    pub fn into_product(self) -> Option<Product> {
        let id = record_id(self.id)?;
        Some(Product {
            id,
            name: text(self.name).unwrap_or_default(),
            quantity: self.quantity.as_ref().and_then(WireNumber::as_quantity),
            price: self
                .price
                .as_ref()
                .and_then(WireNumber::as_money)
                .unwrap_or_default(),
            offer_price: self.offer_price.as_ref().and_then(WireNumber::as_money),
            category: entity(self.pro_category_id),
            sub_category: entity(self.pro_sub_category_id),
            brand: entity(self.pro_brand_id),
            variant_type: entity(self.pro_variant_type_id),
            variant_ids: list(self.variants)
                .iter()
                .filter_map(WireRef::id)
                .map(str::to_string)
                .collect(),
        })
    }
}

/// `orderTotal` sub-document.
#[derive(Debug, Clone, Deserialize)]
pub struct WireOrderTotal {
    pub total: Option<WireNumber>,
}

/// `orderTotal` as a document, or flattened to a bare amount by older exports.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireTotal {
    Document(WireOrderTotal),
    Amount(WireNumber),
}

impl WireTotal {
    fn amount(self) -> Option<WireNumber> {
        match self {
            WireTotal::Document(document) => document.total,
            WireTotal::Amount(amount) => Some(amount),
        }
    }
}

/// Order document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrder {
    #[serde(rename = "_id")]
    pub id: Option<WireText>,
    pub order_status: Option<WireText>,
    pub order_total: Option<WireTotal>,
    pub total_price: Option<WireNumber>,
    #[serde(rename = "userID")]
    pub user: Option<WireRef>,
    pub order_date: Option<WireText>,
    pub items: Option<WireList<IgnoredAny>>,
}

impl WireOrder {
    pub fn into_order(self) -> Option<Order> {
        let id = record_id(self.id)?;
        let total = self
            .order_total
            .and_then(WireTotal::amount)
            .as_ref()
            .and_then(WireNumber::as_money)
            .or_else(|| self.total_price.as_ref().and_then(WireNumber::as_money))
            .unwrap_or_default();
        Some(Order {
            id,
            status: text(self.order_status).unwrap_or_default(),
            total,
            customer_name: self.user.as_ref().and_then(WireRef::name).map(str::to_string),
            item_count: list(self.items).len(),
            ordered_at: text(self.order_date).as_deref().and_then(parse_date),
        })
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Variant type document. The label lives in `type`, older exports use `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireVariantType {
    #[serde(rename = "_id")]
    pub id: Option<WireText>,
    #[serde(rename = "type")]
    pub kind: Option<WireText>,
    pub name: Option<WireText>,
}

impl WireVariantType {
    pub fn into_variant_type(self) -> Option<VariantType> {
        let id = record_id(self.id)?;
        let label = text(self.kind).or(text(self.name)).unwrap_or_default();
        Some(VariantType::new(id, label))
    }
}

/// Variant document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireVariant {
    #[serde(rename = "_id")]
    pub id: Option<WireText>,
    pub name: Option<WireText>,
    pub value: Option<WireText>,
    pub title: Option<WireText>,
    pub variant_type_id: Option<WireRef>,
}

impl WireVariant {
    pub fn into_variant_item(self) -> Option<VariantItem> {
        let id = record_id(self.id)?;
        let label = text(self.name)
            .or(text(self.value))
            .or(text(self.title))
            .unwrap_or_default();
        // an item without an owner is kept but never lands in a pool
        let owner = self
            .variant_type_id
            .as_ref()
            .and_then(WireRef::id)
            .unwrap_or_default()
            .to_string();
        Some(VariantItem::new(id, label, owner))
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// Parses a payload body into its raw record list.
pub fn parse_payload(kind: SnapshotKind, body: &str) -> DataResult<Vec<Value>> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| DataError::malformed(kind, e.to_string()))?;
    extract_records(kind, value)
}

/// Unwraps the `{ "data": [...] }` envelope; a bare array is accepted too.
pub fn extract_records(kind: SnapshotKind, payload: Value) -> DataResult<Vec<Value>> {
    match payload {
        Value::Array(records) => Ok(records),
        Value::Object(mut envelope) => {
            if envelope.get("success") == Some(&Value::Bool(false)) {
                let message = envelope
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("no message");
                return Err(DataError::malformed(
                    kind,
                    format!("backend reported failure: {}", message),
                ));
            }
            match envelope.remove("data") {
                Some(Value::Array(records)) => Ok(records),
                Some(Value::Null) => Ok(Vec::new()),
                Some(_) => Err(DataError::malformed(kind, "`data` is not an array")),
                None => Err(DataError::malformed(kind, "missing `data` array")),
            }
        }
        _ => Err(DataError::malformed(
            kind,
            "expected an array or a { data: [...] } envelope",
        )),
    }
}

fn normalize<W, T>(kind: SnapshotKind, records: Vec<Value>, convert: fn(W) -> Option<T>) -> Vec<T>
where
    W: DeserializeOwned,
{
    let total = records.len();
    let mut normalized = Vec::with_capacity(total);

    for (index, raw) in records.into_iter().enumerate() {
        match serde_json::from_value::<W>(raw) {
            Ok(wire) => match convert(wire) {
                Some(record) => normalized.push(record),
                None => warn!(kind = %kind, index, "Skipping record without an id"),
            },
            Err(e) => warn!(kind = %kind, index, error = %e, "Skipping malformed record"),
        }
    }

    debug!(kind = %kind, total, kept = normalized.len(), "Normalized snapshot");
    normalized
}

pub fn normalize_products(records: Vec<Value>) -> Vec<Product> {
    normalize(SnapshotKind::Products, records, WireProduct::into_product)
}

pub fn normalize_orders(records: Vec<Value>) -> Vec<Order> {
    normalize(SnapshotKind::Orders, records, WireOrder::into_order)
}

pub fn normalize_variant_types(records: Vec<Value>) -> Vec<VariantType> {
    normalize(
        SnapshotKind::VariantTypes,
        records,
        WireVariantType::into_variant_type,
    )
}

pub fn normalize_variants(records: Vec<Value>) -> Vec<VariantItem> {
    normalize(SnapshotKind::Variants, records, WireVariant::into_variant_item)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_core::StockBucket;
    use serde_json::json;

    fn records(value: Value) -> Vec<Value> {
        match value {
            Value::Array(items) => items,
            other => vec![other],
        }
    }

    #[test]
    fn test_product_normalization() {
        let products = normalize_products(records(json!([{
            "_id": "65a1",
            "name": "Blue Tee",
            "quantity": 4,
            "price": 19.99,
            "offerPrice": "15.5",
            "proCategoryId": { "_id": "c1", "name": "Apparel" },
            "proSubCategoryId": "s1",
            "proVariantTypeId": { "_id": "size", "type": "Size" },
            "variants": ["m", { "_id": "l" }, ""]
        }])));

        assert_eq!(products.len(), 1);
        let product = &products[0];
        assert_eq!(product.id, "65a1");
        assert_eq!(product.quantity, Some(4));
        assert_eq!(product.price.cents(), 1999);
        assert_eq!(product.offer_price.map(|m| m.cents()), Some(1550));
        assert_eq!(product.category, Some(EntityRef::named("c1", "Apparel")));
        assert_eq!(product.sub_category, Some(EntityRef::id_only("s1")));
        assert_eq!(product.variant_type.as_ref().map(|r| r.id.as_str()), Some("size"));
        assert_eq!(product.variant_ids, vec!["m", "l"]);
        assert_eq!(product.stock_bucket(), StockBucket::Limited);
    }

    #[test]
    fn test_bad_quantity_degrades_to_other() {
        let products = normalize_products(records(json!([
            { "_id": "a", "name": "x", "quantity": null },
            { "_id": "b", "name": "y", "quantity": "lots" },
            { "_id": "c", "name": "z", "quantity": true },
            { "_id": "d", "name": "w" }
        ])));
        assert_eq!(products.len(), 4);
        assert!(products
            .iter()
            .all(|p| p.quantity.is_none() && p.stock_bucket() == StockBucket::Other));
    }

    #[test]
    fn test_fractional_and_string_quantities() {
        let quantity = |v: Value| serde_json::from_value::<WireNumber>(v).unwrap().as_quantity();
        assert_eq!(quantity(json!("0")), Some(0));
        assert_eq!(quantity(json!(" 3 ")), Some(3));
        assert_eq!(quantity(json!(0.5)), Some(1));
        assert_eq!(quantity(json!(5.0)), Some(5));
        assert_eq!(quantity(json!(5.5)), Some(6));
        assert_eq!(quantity(json!(-0.5)), Some(-1));
    }

    #[test]
    fn test_records_without_id_are_skipped() {
        let products = normalize_products(records(json!([
            { "name": "no id", "quantity": 1 },
            { "_id": "  ", "name": "blank id" },
            { "_id": 42, "name": "numeric id" },
            "not an object",
            { "_id": "ok", "name": "kept" }
        ])));
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "kept");
    }

    #[test]
    fn test_order_normalization() {
        let orders = normalize_orders(records(json!([
            {
                "_id": "o1",
                "orderStatus": "shipped",
                "orderTotal": { "subtotal": 30, "discount": 5, "total": 25.5 },
                "userID": { "_id": "u1", "name": "Ada" },
                "orderDate": "2024-03-01T10:15:00.000Z",
                "items": [{}, {}]
            },
            { "_id": "o2", "totalPrice": 12 },
            { "_id": "o3", "orderStatus": "pending", "userID": "u2", "orderDate": "yesterday" }
        ])));

        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].total.cents(), 2550);
        assert_eq!(orders[0].customer_name.as_deref(), Some("Ada"));
        assert_eq!(orders[0].item_count, 2);
        assert!(orders[0].ordered_at.is_some());

        assert_eq!(orders[1].status, "");
        assert_eq!(orders[1].bucket(), None);
        assert_eq!(orders[1].total.cents(), 1200);

        assert_eq!(orders[2].customer_name, None);
        assert_eq!(orders[2].ordered_at, None);
    }

    #[test]
    fn test_wrong_typed_order_fields_still_count() {
        let orders = normalize_orders(records(json!([
            { "_id": "o1", "orderStatus": 3 },
            { "_id": "o2", "orderStatus": "shipped", "orderTotal": 25 },
            { "_id": "o3", "orderStatus": "pending", "orderDate": 1700000000 },
            { "_id": "o4", "orderStatus": "delivered", "items": {} },
            { "_id": "o5", "orderStatus": "pending",
              "orderTotal": { "total": "7.5" }, "items": [{}] }
        ])));

        assert_eq!(orders.len(), 5);
        assert_eq!(orders[0].status, "");
        assert_eq!(orders[1].total.cents(), 2500);
        assert_eq!(orders[2].ordered_at, None);
        assert_eq!(orders[3].item_count, 0);
        assert_eq!(orders[4].total.cents(), 750);

        let counts = mercato_core::aggregate_orders(&orders);
        assert_eq!(counts.all, 5);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.unclassified(), 1);
    }

    #[test]
    fn test_wrong_typed_product_fields_degrade() {
        let products = normalize_products(records(json!([
            { "_id": "p1", "name": 123, "quantity": 2 },
            { "_id": "p2", "name": "Tee", "variants": "m" },
            { "_id": "p3", "name": ["x"], "proVariantTypeId": 9, "variants": [1, "s"] }
        ])));

        assert_eq!(products.len(), 3);
        assert_eq!(products[0].name, "");
        assert_eq!(products[0].quantity, Some(2));
        assert!(products[1].variant_ids.is_empty());
        assert_eq!(products[2].variant_type, None);
        assert_eq!(products[2].variant_ids, vec!["s"]);
    }

    #[test]
    fn test_order_total_falls_back_to_total_price() {
        let orders = normalize_orders(records(json!([
            { "_id": "o1", "orderTotal": { "subtotal": 9 }, "totalPrice": 4 },
            { "_id": "o2", "orderTotal": "n/a", "totalPrice": 3 }
        ])));
        assert_eq!(orders[0].total.cents(), 400);
        assert_eq!(orders[1].total.cents(), 300);
    }

    #[test]
    fn test_variant_normalization() {
        let types = normalize_variant_types(records(json!([
            { "_id": "size", "type": "Size", "name": "size-legacy" },
            { "_id": "color", "name": "Color" }
        ])));
        assert_eq!(types[0].label, "Size");
        assert_eq!(types[1].label, "Color");

        let items = normalize_variants(records(json!([
            { "_id": "m", "name": "M", "variantTypeId": "size" },
            { "_id": "red", "value": "Red", "variantTypeId": { "_id": "color", "type": "Color" } },
            { "_id": "orphan", "title": "Orphan" },
            { "_id": "odd", "name": 5, "value": "Five", "variantTypeId": "size" }
        ])));
        assert_eq!(items.len(), 4);
        assert_eq!(items[3].label, "Five");
        assert_eq!(items[0].variant_type_id, "size");
        assert_eq!(items[1].label, "Red");
        assert_eq!(items[1].variant_type_id, "color");
        assert_eq!(items[2].variant_type_id, "");
    }

    #[test]
    fn test_extract_records() {
        let kind = SnapshotKind::Products;
        assert_eq!(parse_payload(kind, r#"{"success":true,"data":[{}]}"#).unwrap().len(), 1);
        assert_eq!(parse_payload(kind, "[{}, {}]").unwrap().len(), 2);
        assert!(parse_payload(kind, r#"{"data":null}"#).unwrap().is_empty());

        assert!(parse_payload(kind, r#"{"data":{}}"#).is_err());
        assert!(parse_payload(kind, r#"{"items":[]}"#).is_err());
        assert!(parse_payload(kind, "42").is_err());
        assert!(parse_payload(kind, "{ truncated").is_err());

        let err = parse_payload(kind, r#"{"success":false,"message":"db down"}"#).unwrap_err();
        assert!(err.to_string().contains("db down"));
    }
}
