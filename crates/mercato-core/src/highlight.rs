//! # Legend Highlight
//!
//! Presentation-only overlay on top of [`OrderCounts`].
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │     ┌───────────────┐   select(k)    ┌──────────────────────┐          │
//! │ ──► │ All           │ ─────────────► │ Bucket(k)            │ ◄──┐     │
//! │     │ (initial)     │ ◄───────────── │                      │ ───┘     │
//! │     └───────────────┘  select_all()  └──────────────────────┘ select(j)│
//! │                                                                         │
//! │  Effect: chart colors only. Counts are an input here, never an output. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::orders::{OrderBucket, OrderCounts};

// =============================================================================
// Highlight State
// =============================================================================

/// What the legend currently highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    All,
    Bucket(OrderBucket),
}

impl Highlight {
    /// `"all"` or the bucket key.
    pub fn key(&self) -> &'static str {
        match self {
            Highlight::All => "all",
            Highlight::Bucket(bucket) => bucket.key(),
        }
    }

    /// Whether a chart segment keeps its own color.
    pub fn is_lit(&self, bucket: OrderBucket) -> bool {
        match self {
            Highlight::All => true,
            Highlight::Bucket(selected) => *selected == bucket,
        }
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Highlight {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Highlight::All);
        }
        s.parse()
            .map(Highlight::Bucket)
            .map_err(|_| CoreError::UnknownLegendKey(s.trim().to_lowercase()))
    }
}

/// Legend highlight owned by the dashboard for the view's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightState {
    current: Highlight,
}

impl HighlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Highlight {
        self.current
    }

    /// Legend click or list-row click on a bucket.
    pub fn select(&mut self, bucket: OrderBucket) {
        self.current = Highlight::Bucket(bucket);
    }

    /// The explicit "All Orders" action.
    pub fn select_all(&mut self) {
        self.current = Highlight::All;
    }

    /// Applies a parsed key from the list rows (`all` included).
    pub fn apply(&mut self, highlight: Highlight) {
        match highlight {
            Highlight::All => self.select_all(),
            Highlight::Bucket(bucket) => self.select(bucket),
        }
    }
}

// =============================================================================
// Chart Palette
// =============================================================================

/// Segment colors of the order chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPalette {
    pub pending: String,
    pub processed: String,
    pub cancelled: String,
    pub shipped: String,
    pub delivered: String,
    /// Shared color of every segment that is not highlighted.
    pub dimmed: String,
}

impl Default for ChartPalette {
    fn default() -> Self {
        ChartPalette {
            pending: "#ed6c02".to_string(),
            processed: "#1976d2".to_string(),
            cancelled: "#d32f2f".to_string(),
            shipped: "#0288d1".to_string(),
            delivered: "#2e7d32".to_string(),
            dimmed: "#cfd8dc".to_string(),
        }
    }
}

impl ChartPalette {
    /// The real color of a bucket.
    pub fn color(&self, bucket: OrderBucket) -> &str {
        match bucket {
            OrderBucket::Pending => &self.pending,
            OrderBucket::Processed => &self.processed,
            OrderBucket::Cancelled => &self.cancelled,
            OrderBucket::Shipped => &self.shipped,
            OrderBucket::Delivered => &self.delivered,
        }
    }

    /// Every color with a name, for validation.
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("pending", self.pending.as_str()),
            ("processed", self.processed.as_str()),
            ("cancelled", self.cancelled.as_str()),
            ("shipped", self.shipped.as_str()),
            ("delivered", self.delivered.as_str()),
            ("dimmed", self.dimmed.as_str()),
        ]
    }
}

// =============================================================================
// Chart Spec
// =============================================================================

/// One donut segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChartSegment {
    pub key: String,
    pub label: String,
    pub count: usize,
    pub color: String,
    pub highlighted: bool,
}

/// View-ready donut chart of order buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderChart {
    pub segments: Vec<ChartSegment>,
}

impl OrderChart {
    /// Colors segments against the current highlight.
    pub fn build(counts: &OrderCounts, highlight: Highlight, palette: &ChartPalette) -> Self {
        let segments = OrderBucket::ALL
            .into_iter()
            .map(|bucket| {
                let lit = highlight.is_lit(bucket);
                ChartSegment {
                    key: bucket.key().to_string(),
                    label: bucket.chart_label().to_string(),
                    count: counts.get(bucket),
                    color: if lit {
                        palette.color(bucket).to_string()
                    } else {
                        palette.dimmed.clone()
                    },
                    highlighted: lit,
                }
            })
            .collect();
        OrderChart { segments }
    }

    pub fn series(&self) -> Vec<usize> {
        self.segments.iter().map(|s| s.count).collect()
    }

    pub fn colors(&self) -> Vec<&str> {
        self.segments.iter().map(|s| s.color.as_str()).collect()
    }
}

// =============================================================================
// Order Summary Rows
// =============================================================================

/// One row of the order summary list next to the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderListRow {
    pub key: String,
    pub label: String,
    pub count: usize,
    /// "1 Order" / "3 Orders".
    pub caption: String,
    pub selected: bool,
}

/// "All Orders" followed by the five buckets.
pub fn order_list_rows(counts: &OrderCounts, highlight: Highlight) -> Vec<OrderListRow> {
    let all = std::iter::once((Highlight::All, "All Orders", counts.all));
    let buckets = OrderBucket::ALL
        .into_iter()
        .map(|b| (Highlight::Bucket(b), b.list_label(), counts.get(b)));

    all.chain(buckets)
        .map(|(key, label, count)| OrderListRow {
            key: key.key().to_string(),
            label: label.to_string(),
            count,
            caption: order_caption(count),
            selected: key == highlight,
        })
        .collect()
}

fn order_caption(count: usize) -> String {
    if count == 1 {
        "1 Order".to_string()
    } else {
        format!("{} Orders", count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::aggregate_orders;
    use crate::types::Order;

    fn sample_counts() -> OrderCounts {
        let orders: Vec<Order> = ["pending", "shipped", "shipped", "delivered", "?"]
            .iter()
            .enumerate()
            .map(|(i, s)| Order::new(i.to_string(), *s))
            .collect();
        aggregate_orders(&orders)
    }

    #[test]
    fn test_initial_state_is_all() {
        let state = HighlightState::new();
        assert_eq!(state.current(), Highlight::All);
    }

    #[test]
    fn test_only_select_all_restores_all() {
        let mut state = HighlightState::new();
        state.select(OrderBucket::Shipped);
        state.select(OrderBucket::Pending);
        assert_eq!(state.current(), Highlight::Bucket(OrderBucket::Pending));

        state.select_all();
        assert_eq!(state.current(), Highlight::All);
    }

    #[test]
    fn test_chart_dims_other_segments() {
        let palette = ChartPalette::default();
        let counts = sample_counts();
        let chart = OrderChart::build(&counts, Highlight::Bucket(OrderBucket::Shipped), &palette);

        assert_eq!(
            chart.colors(),
            vec!["#cfd8dc", "#cfd8dc", "#cfd8dc", "#0288d1", "#cfd8dc"]
        );
        assert_eq!(chart.series(), vec![1, 0, 0, 2, 1]);
    }

    #[test]
    fn test_chart_all_uses_real_colors() {
        let palette = ChartPalette::default();
        let chart = OrderChart::build(&sample_counts(), Highlight::All, &palette);
        assert!(chart.segments.iter().all(|s| s.highlighted));
        assert_eq!(chart.colors()[0], "#ed6c02");
    }

    #[test]
    fn test_highlight_never_changes_series() {
        let palette = ChartPalette::default();
        let counts = sample_counts();
        let before = OrderChart::build(&counts, Highlight::All, &palette).series();
        for bucket in OrderBucket::ALL {
            let chart = OrderChart::build(&counts, Highlight::Bucket(bucket), &palette);
            assert_eq!(chart.series(), before);
        }
    }

    #[test]
    fn test_order_rows() {
        let rows = order_list_rows(&sample_counts(), Highlight::Bucket(OrderBucket::Pending));
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].label, "All Orders");
        assert_eq!(rows[0].caption, "5 Orders");
        assert_eq!(rows[1].caption, "1 Order");
        assert!(rows[1].selected);
        assert_eq!(rows.iter().filter(|r| r.selected).count(), 1);
    }

    #[test]
    fn test_highlight_parsing() {
        assert_eq!("all".parse::<Highlight>().unwrap(), Highlight::All);
        assert_eq!(
            "delivered".parse::<Highlight>().unwrap(),
            Highlight::Bucket(OrderBucket::Delivered)
        );
        assert!(matches!(
            "nope".parse::<Highlight>(),
            Err(CoreError::UnknownLegendKey(key)) if key == "nope"
        ));
    }
}
