//! # Order Buckets
//!
//! Status-string → order bucket classification and the aggregate counter.
//!
//! ## Priority Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  status.to_lowercase() contains ...        first match wins            │
//! │                                                                         │
//! │   1. "pending"     ──► Pending                                          │
//! │   2. "processing"  ──► Processed                                        │
//! │   3. "cancel"      ──► Cancelled                                        │
//! │   4. "ship"        ──► Shipped                                          │
//! │   5. "deliver"     ──► Delivered                                        │
//! │   6. (nothing)     ──► unclassified: counted in `all` only              │
//! │                                                                         │
//! │  "pending - will ship" → Pending  (rule 1 beats rule 4)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The status vocabulary is not controlled by this system. Anything the
//! rules don't recognise is a valid, unclassified order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::types::Order;

// =============================================================================
// Order Bucket
// =============================================================================

/// Status bucket of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderBucket {
    Pending,
    Processed,
    Cancelled,
    Shipped,
    Delivered,
}

impl OrderBucket {
    /// Buckets in chart segment order.
    pub const ALL: [OrderBucket; 5] = [
        OrderBucket::Pending,
        OrderBucket::Processed,
        OrderBucket::Cancelled,
        OrderBucket::Shipped,
        OrderBucket::Delivered,
    ];

    /// Lower-case key used by the frontend.
    pub fn key(&self) -> &'static str {
        match self {
            OrderBucket::Pending => "pending",
            OrderBucket::Processed => "processed",
            OrderBucket::Cancelled => "cancelled",
            OrderBucket::Shipped => "shipped",
            OrderBucket::Delivered => "delivered",
        }
    }

    /// Chart legend label.
    pub fn chart_label(&self) -> &'static str {
        match self {
            OrderBucket::Pending => "Pending",
            OrderBucket::Processed => "Processing",
            OrderBucket::Cancelled => "Cancelled",
            OrderBucket::Shipped => "Shipped",
            OrderBucket::Delivered => "Delivered",
        }
    }

    /// Row label in the order summary list.
    pub fn list_label(&self) -> &'static str {
        match self {
            OrderBucket::Pending => "Pending Orders",
            OrderBucket::Processed => "Processing Orders",
            OrderBucket::Cancelled => "Cancelled Orders",
            OrderBucket::Shipped => "Shipped Orders",
            OrderBucket::Delivered => "Delivered Orders",
        }
    }
}

impl fmt::Display for OrderBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OrderBucket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        OrderBucket::ALL
            .into_iter()
            .find(|bucket| bucket.key() == key)
            .ok_or(CoreError::UnknownOrderBucket(key))
    }
}

// =============================================================================
// Classification Rules
// =============================================================================

/// One classification rule: a lower-case needle and the bucket it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRule {
    pub needle: &'static str,
    pub bucket: OrderBucket,
}

/// Classification rules, highest priority first.
pub const STATUS_RULES: [StatusRule; 5] = [
    StatusRule {
        needle: "pending",
        bucket: OrderBucket::Pending,
    },
    StatusRule {
        needle: "processing",
        bucket: OrderBucket::Processed,
    },
    StatusRule {
        needle: "cancel",
        bucket: OrderBucket::Cancelled,
    },
    StatusRule {
        needle: "ship",
        bucket: OrderBucket::Shipped,
    },
    StatusRule {
        needle: "deliver",
        bucket: OrderBucket::Delivered,
    },
];

/// Classifies a raw order status. `None` means unclassified.
///
/// ```rust
/// use mercato_core::orders::{classify_order, OrderBucket};
///
/// assert_eq!(classify_order("Order Shipped"), Some(OrderBucket::Shipped));
/// assert_eq!(classify_order("pending, ready to ship"), Some(OrderBucket::Pending));
/// assert_eq!(classify_order("weird"), None);
/// ```
pub fn classify_order(status: &str) -> Option<OrderBucket> {
    let folded = status.to_lowercase();
    STATUS_RULES
        .iter()
        .find(|rule| folded.contains(rule.needle))
        .map(|rule| rule.bucket)
}

// =============================================================================
// Aggregate Counter
// =============================================================================

/// Order counts per bucket. `all` includes unclassified orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderCounts {
    pub all: usize,
    pub pending: usize,
    pub processed: usize,
    pub cancelled: usize,
    pub shipped: usize,
    pub delivered: usize,
}

impl OrderCounts {
    /// Count for one bucket.
    pub fn get(&self, bucket: OrderBucket) -> usize {
        match bucket {
            OrderBucket::Pending => self.pending,
            OrderBucket::Processed => self.processed,
            OrderBucket::Cancelled => self.cancelled,
            OrderBucket::Shipped => self.shipped,
            OrderBucket::Delivered => self.delivered,
        }
    }

    /// Orders that landed in none of the five buckets.
    pub fn unclassified(&self) -> usize {
        let classified: usize = OrderBucket::ALL.iter().map(|b| self.get(*b)).sum();
        self.all - classified
    }

    fn bump(&mut self, bucket: OrderBucket) {
        match bucket {
            OrderBucket::Pending => self.pending += 1,
            OrderBucket::Processed => self.processed += 1,
            OrderBucket::Cancelled => self.cancelled += 1,
            OrderBucket::Shipped => self.shipped += 1,
            OrderBucket::Delivered => self.delivered += 1,
        }
    }
}

/// Reduces an order snapshot into per-bucket counts. O(n).
pub fn aggregate_orders(orders: &[Order]) -> OrderCounts {
    let mut counts = OrderCounts {
        all: orders.len(),
        ..OrderCounts::default()
    };
    for bucket in orders.iter().filter_map(Order::bucket) {
        counts.bump(bucket);
    }
    counts
}

// =============================================================================
// Order List Filter
// =============================================================================

/// Status filter of the orders page.
///
/// Unlike the dashboard buckets this is an exact match on the raw status,
/// the way the status dropdown offers them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OrderStatusFilter {
    #[default]
    All,
    Exact(String),
}

impl OrderStatusFilter {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderStatusFilter::All => true,
            OrderStatusFilter::Exact(status) => order.status == *status,
        }
    }

    /// Filters a snapshot, preserving order.
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }
}

impl FromStr for OrderStatusFilter {
    type Err = CoreError;

    /// `""`, `"all"` and `"All order"` mean no filtering.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case("all order")
        {
            Ok(OrderStatusFilter::All)
        } else {
            Ok(OrderStatusFilter::Exact(trimmed.to_string()))
        }
    }
}

/// Badge tone for a raw status on the orders page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Warning,
    Info,
    Primary,
    Success,
    Error,
    Default,
}

/// Exact-match badge tone, `Default` for anything unknown.
pub fn status_tone(status: &str) -> StatusTone {
    match status {
        "pending" => StatusTone::Warning,
        "processing" => StatusTone::Info,
        "shipped" => StatusTone::Primary,
        "delivered" => StatusTone::Success,
        "cancelled" => StatusTone::Error,
        _ => StatusTone::Default,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
