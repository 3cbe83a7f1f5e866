//! # Order Commands
//!
//! The orders page list: exact status filter and badge tone per row.
//!
//! Unlike the dashboard aggregate, the status dropdown matches the raw status
//! exactly, so `"Order Shipped"` is not listed under `shipped` here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use mercato_core::orders::{status_tone, StatusTone};
use mercato_core::{Order, OrderBucket, OrderStatusFilter};

use crate::error::ApiError;
use crate::state::DashboardState;

/// Order row DTO for the orders table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: String,
    pub status: String,
    pub tone: StatusTone,
    /// Dashboard bucket key, `None` for unclassified statuses.
    pub bucket: Option<OrderBucket>,
    /// Formatted total, e.g. "$12.50".
    pub total: String,
    pub customer: Option<String>,
    pub item_count: usize,
    pub ordered_at: Option<DateTime<Utc>>,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        OrderRow {
            id: order.id.clone(),
            status: order.status.clone(),
            tone: status_tone(&order.status),
            bucket: order.bucket(),
            total: order.total.to_string(),
            customer: order.customer_name.clone(),
            item_count: order.item_count,
            ordered_at: order.ordered_at,
        }
    }
}

/// Filtered orders plus the snapshot size they were taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListResponse {
    pub status: Option<String>,
    pub total_orders: usize,
    pub orders: Vec<OrderRow>,
}

/// Lists orders under the status dropdown.
///
/// ## Arguments
/// * `status` - `None`, `""`, `"all"` or `"All order"` list everything;
///   anything else is matched exactly
pub fn list_orders(
    dashboard: &DashboardState,
    status: Option<&str>,
) -> Result<OrderListResponse, ApiError> {
    let filter: OrderStatusFilter = status.unwrap_or_default().parse()?;

    let response = dashboard.with_dashboard(|d| {
        let orders: Vec<OrderRow> = d.orders(&filter).into_iter().map(OrderRow::from).collect();
        OrderListResponse {
            status: match &filter {
                OrderStatusFilter::All => None,
                OrderStatusFilter::Exact(s) => Some(s.clone()),
            },
            total_orders: d.order_counts().all,
            orders,
        }
    });

    debug!(
        status = ?response.status,
        matched = response.orders.len(),
        "Listed orders"
    );
    Ok(response)
}
