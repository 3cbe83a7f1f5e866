//! # Dashboard Commands
//!
//! Loading and interaction commands for the dashboard page.
//!
//! ## Refresh Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Refresh                                     │
//! │                                                                         │
//! │  lock ── begin_*_fetch() x4 ── unlock        (tickets issued)          │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ products     │ │ orders       │ │ variant      │ │ variants     │   │
//! │  │ fetch        │ │ fetch        │ │ types fetch  │ │ fetch        │   │
//! │  └──────┬───────┘ └──────┬───────┘ └──────┬───────┘ └──────┬───────┘   │
//! │         │ lock/apply     │ lock/apply     │ lock/apply     │           │
//! │         ▼                ▼                ▼                ▼           │
//! │  Each result lands as soon as it arrives. Arrival order is free.       │
//! │  A failed fetch keeps the previous records and adds a notice.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::time::Instant;

use tracing::{debug, info, warn};

use mercato_core::validation::validate_search_query;
use mercato_core::{
    DashboardView, FetchTicket, Highlight, SnapshotError, SnapshotOutcome, StockBucket,
};
use mercato_data::DataResult;

use crate::error::ApiError;
use crate::state::{ConsoleConfig, DashboardState, SourceState};

/// Fetches every snapshot concurrently and returns the refreshed view.
///
/// Never fails on a fetch error; those surface as `notices` in the view.
pub async fn refresh(
    source: &SourceState,
    dashboard: &DashboardState,
) -> Result<DashboardView, ApiError> {
    let start = Instant::now();

    let (products_ticket, orders_ticket, types_ticket, variants_ticket) =
        dashboard.with_dashboard_mut(|d| {
            (
                d.begin_products_fetch(),
                d.begin_orders_fetch(),
                d.begin_variant_types_fetch(),
                d.begin_variants_fetch(),
            )
        });

    let catalog = source.inner();
    tokio::join!(
        land(products_ticket, catalog.fetch_products(), |result| {
            dashboard.with_dashboard_mut(|d| d.apply_products(products_ticket, result))
        }),
        land(orders_ticket, catalog.fetch_orders(), |result| {
            dashboard.with_dashboard_mut(|d| d.apply_orders(orders_ticket, result))
        }),
        land(types_ticket, catalog.fetch_variant_types(), |result| {
            dashboard.with_dashboard_mut(|d| d.apply_variant_types(types_ticket, result))
        }),
        land(variants_ticket, catalog.fetch_variants(), |result| {
            dashboard.with_dashboard_mut(|d| d.apply_variants(variants_ticket, result))
        }),
    );

    let view = dashboard.with_dashboard_mut(|d| d.view());
    info!(
        products = view.stock_tiles.first().map(|t| t.count).unwrap_or(0),
        orders = view.order_counts.all,
        notices = view.notices.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Dashboard refreshed"
    );
    Ok(view)
}

/// Awaits one fetch and hands its result to the controller.
async fn land<T, Fut, Apply>(ticket: FetchTicket, fetch: Fut, apply: Apply) -> SnapshotOutcome
where
    Fut: Future<Output = DataResult<Vec<T>>>,
    Apply: FnOnce(Result<Vec<T>, SnapshotError>) -> SnapshotOutcome,
{
    let result = fetch.await.map_err(|e| e.into_snapshot_error(ticket.kind));
    let outcome = apply(result);
    match outcome {
        SnapshotOutcome::Applied => {
            debug!(kind = %ticket.kind, seq = ticket.seq, "Snapshot applied")
        }
        SnapshotOutcome::Failed => warn!(
            kind = %ticket.kind,
            seq = ticket.seq,
            "Snapshot fetch failed, keeping previous data"
        ),
        SnapshotOutcome::Stale => {
            debug!(kind = %ticket.kind, seq = ticket.seq, "Discarding stale snapshot")
        }
    }
    outcome
}

/// Returns the current view without fetching.
pub fn get_dashboard(dashboard: &DashboardState) -> DashboardView {
    dashboard.with_dashboard_mut(|d| d.view())
}

/// Stock tile click.
///
/// ## Arguments
/// * `bucket` - `all`, `out`, `limited` or `other`
pub fn select_stock_bucket(
    dashboard: &DashboardState,
    bucket: &str,
) -> Result<DashboardView, ApiError> {
    let bucket: StockBucket = bucket.parse()?;
    debug!(%bucket, "Selecting stock bucket");
    Ok(dashboard.with_dashboard_mut(|d| {
        d.select_stock_bucket(bucket);
        d.view()
    }))
}

/// Search box input.
pub fn set_search(
    config: &ConsoleConfig,
    dashboard: &DashboardState,
    query: &str,
) -> Result<DashboardView, ApiError> {
    let query = validate_search_query(query, config.dashboard.search_max_chars)?;
    debug!(query = %query, "Updating product search");
    Ok(dashboard.with_dashboard_mut(|d| {
        d.set_search(&query);
        d.view()
    }))
}

/// Legend entry or order-row click.
///
/// ## Arguments
/// * `key` - `all` or one of the five order bucket keys
pub fn select_legend(dashboard: &DashboardState, key: &str) -> Result<DashboardView, ApiError> {
    let highlight: Highlight = key.parse()?;
    debug!(%highlight, "Selecting legend entry");
    Ok(dashboard.with_dashboard_mut(|d| {
        d.select_highlight(highlight);
        d.view()
    }))
}

/// Clears the transient "Could not load ..." notices.
pub fn dismiss_notices(dashboard: &DashboardState) -> DashboardView {
    dashboard.with_dashboard_mut(|d| {
        d.dismiss_notices();
        d.view()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use mercato_core::{ChartPalette, Order, Product, SnapshotKind, VariantItem, VariantType};
    use mercato_data::StaticSource;

    fn source() -> StaticSource {
        StaticSource::new()
            .with_products(vec![
                Product::new("p1", "Red Shirt", 0),
                Product::new("p2", "Blue Shirt", 3),
                Product::new("p3", "Red Hat", 10),
            ])
            .with_orders(vec![
                Order::new("o1", "pending"),
                Order::new("o2", "Order Shipped"),
                Order::new("o3", "returned"),
            ])
            .with_variant_types(vec![VariantType::new("t1", "Size")])
            .with_variants(vec![VariantItem::new("i1", "XL", "t1")])
    }

    fn state() -> DashboardState {
        DashboardState::new(ChartPalette::default(), StockBucket::All)
    }

    #[tokio::test]
    async fn test_refresh_loads_everything() {
        let dashboard = state();
        let view = refresh(&SourceState::new(source()), &dashboard).await.unwrap();

        assert_eq!(view.products.len(), 3);
        assert_eq!(view.order_counts.all, 3);
        assert_eq!(view.order_counts.pending, 1);
        assert_eq!(view.order_counts.shipped, 1);
        assert_eq!(view.variant_types.len(), 1);
        assert!(view.notices.is_empty());
        assert!(!view.loading.products && !view.loading.variants);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_data() {
        let dashboard = state();
        refresh(&SourceState::new(source()), &dashboard).await.unwrap();

        let broken = SourceState::new(source().failing(SnapshotKind::Orders));
        let view = refresh(&broken, &dashboard).await.unwrap();

        assert_eq!(view.order_counts.all, 3);
        assert_eq!(view.notices.len(), 1);
        assert!(view.notices[0].starts_with("Could not load orders"));

        let view = dismiss_notices(&dashboard);
        assert!(view.notices.is_empty());
        assert_eq!(view.order_counts.all, 3);
    }

    #[tokio::test]
    async fn test_filter_interactions() {
        let dashboard = state();
        refresh(&SourceState::new(source()), &dashboard).await.unwrap();

        let view = select_stock_bucket(&dashboard, "Limited").unwrap();
        assert_eq!(view.list_title, "Limited Stock Products");
        assert_eq!(view.products.len(), 1);

        let view = select_stock_bucket(&dashboard, "all").unwrap();
        assert_eq!(view.products.len(), 3);

        let view = set_search(&ConsoleConfig::default(), &dashboard, "  RED ").unwrap();
        let names: Vec<_> = view.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Red Shirt", "Red Hat"]);
    }

    #[test]
    fn test_bad_inputs_are_validation_errors() {
        let dashboard = state();
        let err = select_stock_bucket(&dashboard, "low").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = select_legend(&dashboard, "returned").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.starts_with("Unknown legend key: 'returned'"));

        let long = "x".repeat(101);
        let err = set_search(&ConsoleConfig::default(), &dashboard, &long).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_legend_only_recolors() {
        let dashboard = state();
        let before = refresh(&SourceState::new(source()), &dashboard).await.unwrap();

        let view = select_legend(&dashboard, "pending").unwrap();
        assert_eq!(view.highlight, "pending");
        assert_eq!(view.order_counts, before.order_counts);
        assert_eq!(view.order_chart.series(), before.order_chart.series());

        let view = select_legend(&dashboard, "all").unwrap();
        assert!(view.order_chart.segments.iter().all(|s| s.highlighted));
    }
}
