//! # Dashboard Controller
//!
//! Single owner of the dashboard's view state. Every UI interaction is one
//! method here; everything the view renders is derived from the snapshots
//! plus the small amount of local state below.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  fetch results ──► SnapshotSlot<Product>  ──┬──► StockCounts (cached)  │
//! │                                             └──► filtered list (memo)  │
//! │                    SnapshotSlot<Order>    ──────► OrderCounts (cached) │
//! │                                                      │                  │
//! │                    HighlightState ───────────────────┼──► OrderChart    │
//! │                                                      └──► order rows    │
//! │                    SnapshotSlot<VariantType> ──┐                        │
//! │                    SnapshotSlot<VariantItem> ──┴─► CascadingSelector    │
//! │                                                                         │
//! │  FilterState (bucket, query) ──► filtered list only, never the tiles   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recomputation Rules
//! - Stock and order counts are rebuilt only when their snapshot is replaced.
//! - The filtered product list is recomputed lazily and only when the product
//!   revision, the bucket or the folded query differs from the memo key.
//! - Highlight changes touch nothing but chart colors and the row flag.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{SnapshotError, SnapshotKind};
use crate::highlight::{
    order_list_rows, ChartPalette, Highlight, HighlightState, OrderChart, OrderListRow,
};
use crate::orders::{aggregate_orders, OrderBucket, OrderCounts, OrderStatusFilter};
use crate::selector::{CascadingSelector, SelectionState};
use crate::snapshot::{FetchTicket, SnapshotOutcome, SnapshotSlot};
use crate::stock::{product_matches, FilterState, StockBucket, StockCounts};
use crate::types::{Order, Product, VariantItem, VariantType};

// =============================================================================
// View DTOs
// =============================================================================

/// One stock tile at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockTile {
    pub key: String,
    pub label: String,
    pub count: usize,
    pub selected: bool,
}

/// Which snapshots still have a fetch in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LoadingFlags {
    pub products: bool,
    pub orders: bool,
    pub variant_types: bool,
    pub variants: bool,
}

/// Everything the dashboard renders, owned and serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stock_tiles: Vec<StockTile>,
    pub stock_bucket: StockBucket,
    pub list_title: String,
    pub search: String,
    pub products: Vec<Product>,
    pub order_counts: OrderCounts,
    pub order_chart: OrderChart,
    pub order_rows: Vec<OrderListRow>,
    pub highlight: String,
    pub variant_types: Vec<VariantType>,
    pub eligible_variants: Vec<VariantItem>,
    pub selection: SelectionState,
    pub loading: LoadingFlags,
    /// Transient "could not load ..." messages.
    pub notices: Vec<String>,
}

// =============================================================================
// Controller
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct FilterMemo {
    revision: u64,
    bucket: StockBucket,
    folded_query: String,
    indices: Vec<usize>,
}

/// Dashboard state machine.
#[derive(Debug, Clone)]
pub struct DashboardController {
    products: SnapshotSlot<Product>,
    orders: SnapshotSlot<Order>,
    variant_types: SnapshotSlot<VariantType>,
    variants: SnapshotSlot<VariantItem>,

    filter: FilterState,
    highlight: HighlightState,
    selector: CascadingSelector,
    palette: ChartPalette,

    stock_counts: StockCounts,
    order_counts: OrderCounts,
    filter_memo: Option<FilterMemo>,
    filter_recomputations: u64,
}

impl Default for DashboardController {
    fn default() -> Self {
        DashboardController::new(ChartPalette::default(), StockBucket::All)
    }
}

impl DashboardController {
    /// Creates a controller with empty snapshots.
    pub fn new(palette: ChartPalette, default_bucket: StockBucket) -> Self {
        DashboardController {
            products: SnapshotSlot::new(SnapshotKind::Products),
            orders: SnapshotSlot::new(SnapshotKind::Orders),
            variant_types: SnapshotSlot::new(SnapshotKind::VariantTypes),
            variants: SnapshotSlot::new(SnapshotKind::Variants),
            filter: FilterState::new(default_bucket),
            highlight: HighlightState::new(),
            selector: CascadingSelector::default(),
            palette,
            stock_counts: StockCounts::default(),
            order_counts: OrderCounts::default(),
            filter_memo: None,
            filter_recomputations: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Snapshot intake
    // -------------------------------------------------------------------------

    pub fn begin_products_fetch(&mut self) -> FetchTicket {
        self.products.begin()
    }

    pub fn apply_products(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Product>, SnapshotError>,
    ) -> SnapshotOutcome {
        let outcome = self.products.complete(ticket, result);
        if outcome == SnapshotOutcome::Applied {
            self.stock_counts = StockCounts::from_products(self.products.records());
        }
        outcome
    }

    pub fn begin_orders_fetch(&mut self) -> FetchTicket {
        self.orders.begin()
    }

    pub fn apply_orders(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Order>, SnapshotError>,
    ) -> SnapshotOutcome {
        let outcome = self.orders.complete(ticket, result);
        if outcome == SnapshotOutcome::Applied {
            self.order_counts = aggregate_orders(self.orders.records());
        }
        outcome
    }

    pub fn begin_variant_types_fetch(&mut self) -> FetchTicket {
        self.variant_types.begin()
    }

    pub fn apply_variant_types(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<VariantType>, SnapshotError>,
    ) -> SnapshotOutcome {
        let outcome = self.variant_types.complete(ticket, result);
        if outcome == SnapshotOutcome::Applied {
            self.selector
                .replace_types(self.variant_types.records().to_vec());
        }
        outcome
    }

    pub fn begin_variants_fetch(&mut self) -> FetchTicket {
        self.variants.begin()
    }

    pub fn apply_variants(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<VariantItem>, SnapshotError>,
    ) -> SnapshotOutcome {
        let outcome = self.variants.complete(ticket, result);
        if outcome == SnapshotOutcome::Applied {
            self.selector.replace_items(self.variants.records().to_vec());
        }
        outcome
    }

    // -------------------------------------------------------------------------
    // Interactions
    // -------------------------------------------------------------------------

    /// Stock tile click.
    pub fn select_stock_bucket(&mut self, bucket: StockBucket) {
        self.filter.select_bucket(bucket);
    }

    /// Search box input.
    pub fn set_search(&mut self, query: &str) {
        self.filter.set_query(query);
    }

    /// Legend or order-row click.
    pub fn select_highlight(&mut self, highlight: Highlight) {
        self.highlight.apply(highlight);
    }

    pub fn select_variant_type(&mut self, type_id: Option<&str>) -> SelectionState {
        self.selector.on_type_change(type_id)
    }

    pub fn select_variants<I, S>(&mut self, item_ids: I) -> SelectionState
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selector.on_items_change(item_ids)
    }

    /// Pre-selects the variant type and variants saved on a product.
    pub fn restore_selection(&mut self, product: &Product) -> SelectionState {
        let type_id = product.variant_type.as_ref().map(|r| r.id.as_str());
        self.selector.restore(type_id, &product.variant_ids)
    }

    /// Clears every transient fetch error.
    pub fn dismiss_notices(&mut self) {
        self.products.dismiss_error();
        self.orders.dismiss_error();
        self.variant_types.dismiss_error();
        self.variants.dismiss_error();
    }

    // -------------------------------------------------------------------------
    // Derived reads
    // -------------------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        self.products.records()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight.current()
    }

    pub fn selector(&self) -> &CascadingSelector {
        &self.selector
    }

    /// Products under the current bucket and query, snapshot order.
    pub fn filtered_products(&mut self) -> Vec<&Product> {
        self.refresh_filter_memo();
        let records = self.products.records();
        match &self.filter_memo {
            Some(memo) => memo
                .indices
                .iter()
                .filter_map(|&i| records.get(i))
                .collect(),
            None => Vec::new(),
        }
    }

    /// How many times the filtered list was actually recomputed.
    pub fn filter_recomputations(&self) -> u64 {
        self.filter_recomputations
    }

    /// Tile counts over the full snapshot.
    pub fn stock_counts(&self) -> StockCounts {
        self.stock_counts
    }

    pub fn stock_tiles(&self) -> Vec<StockTile> {
        StockBucket::TILES
            .into_iter()
            .map(|bucket| StockTile {
                key: bucket.key().to_string(),
                label: bucket.tile_label().to_string(),
                count: self.stock_counts.get(bucket),
                selected: bucket == self.filter.bucket(),
            })
            .collect()
    }

    pub fn order_counts(&self) -> OrderCounts {
        self.order_counts
    }

    pub fn order_chart(&self) -> OrderChart {
        OrderChart::build(&self.order_counts, self.highlight.current(), &self.palette)
    }

    pub fn order_rows(&self) -> Vec<OrderListRow> {
        order_list_rows(&self.order_counts, self.highlight.current())
    }

    /// Orders page list under an exact status filter.
    pub fn orders(&self, filter: &OrderStatusFilter) -> Vec<&Order> {
        filter.apply(self.orders.records())
    }

    /// Orders falling into one dashboard bucket.
    pub fn orders_in_bucket(&self, bucket: OrderBucket) -> Vec<&Order> {
        self.orders
            .records()
            .iter()
            .filter(|order| order.bucket() == Some(bucket))
            .collect()
    }

    pub fn loading(&self) -> LoadingFlags {
        LoadingFlags {
            products: self.products.is_loading(),
            orders: self.orders.is_loading(),
            variant_types: self.variant_types.is_loading(),
            variants: self.variants.is_loading(),
        }
    }

    pub fn notices(&self) -> Vec<String> {
        [
            self.products.last_error(),
            self.orders.last_error(),
            self.variant_types.last_error(),
            self.variants.last_error(),
        ]
        .into_iter()
        .flatten()
        .map(ToString::to_string)
        .collect()
    }

    /// Assembles the full view.
    pub fn view(&mut self) -> DashboardView {
        let products = self.filtered_products().into_iter().cloned().collect();
        DashboardView {
            stock_tiles: self.stock_tiles(),
            stock_bucket: self.filter.bucket(),
            list_title: self.filter.bucket().list_title().to_string(),
            search: self.filter.query().to_string(),
            products,
            order_counts: self.order_counts,
            order_chart: self.order_chart(),
            order_rows: self.order_rows(),
            highlight: self.highlight.current().key().to_string(),
            variant_types: self.selector.variant_types().to_vec(),
            eligible_variants: self.selector.eligible_pool().into_iter().cloned().collect(),
            selection: self.selector.selection().clone(),
            loading: self.loading(),
            notices: self.notices(),
        }
    }

    fn refresh_filter_memo(&mut self) {
        let revision = self.products.revision();
        let bucket = self.filter.bucket();
        let folded_query = self.filter.folded_query();

        let fresh = self.filter_memo.as_ref().is_some_and(|memo| {
            memo.revision == revision && memo.bucket == bucket && memo.folded_query == folded_query
        });
        if fresh {
            return;
        }

        let indices = self
            .products
            .records()
            .iter()
            .enumerate()
            .filter(|(_, p)| product_matches(p, bucket, &folded_query))
            .map(|(i, _)| i)
            .collect();
        self.filter_memo = Some(FilterMemo {
            revision,
            bucket,
            folded_query,
            indices,
        });
        self.filter_recomputations += 1;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityRef;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "Red Shirt", 0),
            Product::new("p2", "Jeans", 3),
            Product::new("p3", "Shirt XL", 12),
            Product::new("p4", "Old shirt", 0),
        ]
    }

    fn order_list() -> Vec<Order> {
        vec![
            Order::new("o1", "Order Shipped"),
            Order::new("o2", "order_delivered"),
            Order::new("o3", "weird"),
        ]
    }

    fn loaded() -> DashboardController {
        let mut dashboard = DashboardController::default();
        let t = dashboard.begin_products_fetch();
        dashboard.apply_products(t, Ok(catalog()));
        let t = dashboard.begin_orders_fetch();
        dashboard.apply_orders(t, Ok(order_list()));
        let t = dashboard.begin_variant_types_fetch();
        dashboard.apply_variant_types(
            t,
            Ok(vec![VariantType::new("size", "Size"), VariantType::new("color", "Color")]),
        );
        let t = dashboard.begin_variants_fetch();
        dashboard.apply_variants(
            t,
            Ok(vec![
                VariantItem::new("s", "S", "size"),
                VariantItem::new("m", "M", "size"),
                VariantItem::new("red", "Red", "color"),
            ]),
        );
        dashboard
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_initial_view_is_empty() {
        let mut dashboard = DashboardController::default();
        let view = dashboard.view();
        assert!(view.products.is_empty());
        assert_eq!(view.order_counts, OrderCounts::default());
        assert_eq!(view.stock_tiles.len(), 4);
        assert!(view.stock_tiles[0].selected);
        assert_eq!(view.highlight, "all");
        assert!(view.notices.is_empty());
    }

    #[test]
    fn test_tiles_ignore_filter() {
        let mut dashboard = loaded();
        dashboard.select_stock_bucket(StockBucket::Out);
        dashboard.set_search("red");

        assert_eq!(ids(&dashboard.filtered_products()), vec!["p1"]);
        assert_eq!(
            dashboard.stock_counts(),
            StockCounts {
                all: 4,
                out: 2,
                limited: 1,
                other: 1
            }
        );
    }

    #[test]
    fn test_bucket_and_query_compose() {
        let mut dashboard = loaded();
        dashboard.select_stock_bucket(StockBucket::Out);
        dashboard.set_search("SHIRT");
        assert_eq!(ids(&dashboard.filtered_products()), vec!["p1", "p4"]);

        dashboard.select_stock_bucket(StockBucket::All);
        assert_eq!(ids(&dashboard.filtered_products()), vec!["p1", "p3", "p4"]);
    }

    #[test]
    fn test_filter_memo_skips_unrelated_changes() {
        let mut dashboard = loaded();
        dashboard.filtered_products();
        assert_eq!(dashboard.filter_recomputations(), 1);

        dashboard.select_highlight(Highlight::Bucket(OrderBucket::Shipped));
        let t = dashboard.begin_orders_fetch();
        dashboard.apply_orders(t, Ok(order_list()));
        dashboard.select_variant_type(Some("size"));
        dashboard.set_search("  ");
        dashboard.filtered_products();
        assert_eq!(dashboard.filter_recomputations(), 1);

        dashboard.set_search("jeans");
        dashboard.filtered_products();
        assert_eq!(dashboard.filter_recomputations(), 2);

        let t = dashboard.begin_products_fetch();
        dashboard.apply_products(t, Ok(catalog()));
        dashboard.filtered_products();
        assert_eq!(dashboard.filter_recomputations(), 3);
    }

    #[test]
    fn test_highlight_leaves_counts_identical() {
        let mut dashboard = loaded();
        let before = dashboard.order_counts();
        assert_eq!(before.all, 3);
        assert_eq!(before.shipped, 1);
        assert_eq!(before.delivered, 1);

        for bucket in OrderBucket::ALL {
            dashboard.select_highlight(Highlight::Bucket(bucket));
            assert_eq!(dashboard.order_counts(), before);
            assert_eq!(dashboard.order_chart().series(), vec![0, 0, 0, 1, 1]);
        }
        dashboard.select_highlight(Highlight::All);
        assert!(dashboard.order_chart().segments.iter().all(|s| s.highlighted));
    }

    #[test]
    fn test_orders_arrive_before_products() {
        let mut dashboard = DashboardController::default();
        let products_ticket = dashboard.begin_products_fetch();
        let orders_ticket = dashboard.begin_orders_fetch();

        dashboard.apply_orders(orders_ticket, Ok(order_list()));
        let view = dashboard.view();
        assert_eq!(view.order_counts.all, 3);
        assert!(view.loading.products);
        assert!(!view.loading.orders);

        dashboard.apply_products(products_ticket, Ok(catalog()));
        assert_eq!(dashboard.view().products.len(), 4);
    }

    #[test]
    fn test_failed_fetch_keeps_last_good_and_notifies() {
        let mut dashboard = loaded();
        let t = dashboard.begin_products_fetch();
        let outcome = dashboard.apply_products(
            t,
            Err(SnapshotError::new(SnapshotKind::Products, "503")),
        );
        assert_eq!(outcome, SnapshotOutcome::Failed);

        let view = dashboard.view();
        assert_eq!(view.products.len(), 4);
        assert_eq!(view.notices, vec!["Could not load products: 503".to_string()]);

        dashboard.dismiss_notices();
        assert!(dashboard.notices().is_empty());
    }

    #[test]
    fn test_stale_orders_discarded() {
        let mut dashboard = DashboardController::default();
        let old = dashboard.begin_orders_fetch();
        let new = dashboard.begin_orders_fetch();
        dashboard.apply_orders(new, Ok(vec![Order::new("o9", "pending")]));
        let outcome = dashboard.apply_orders(old, Ok(order_list()));

        assert_eq!(outcome, SnapshotOutcome::Stale);
        assert_eq!(dashboard.order_counts().all, 1);
        assert_eq!(dashboard.order_counts().pending, 1);
    }

    #[test]
    fn test_variant_selection_flow() {
        let mut dashboard = loaded();
        dashboard.select_variant_type(Some("size"));
        let state = dashboard.select_variants(["s", "red"]);
        assert_eq!(state.selected_items, vec!["s"]);

        let state = dashboard.select_variant_type(Some("color"));
        assert!(state.selected_items.is_empty());
        let view = dashboard.view();
        assert_eq!(view.eligible_variants.len(), 1);
        assert_eq!(view.eligible_variants[0].id, "red");
    }

    #[test]
    fn test_restore_from_product() {
        let mut dashboard = loaded();
        let mut product = Product::new("p9", "Tee", 4);
        product.variant_type = Some(EntityRef::named("size", "Size"));
        product.variant_ids = vec!["m".to_string(), "red".to_string()];

        let state = dashboard.restore_selection(&product);
        assert_eq!(state.selected_type.as_deref(), Some("size"));
        assert_eq!(state.selected_items, vec!["m"]);
    }

    #[test]
    fn test_variant_refetch_prunes_selection() {
        let mut dashboard = loaded();
        dashboard.select_variant_type(Some("size"));
        dashboard.select_variants(["s", "m"]);

        let t = dashboard.begin_variants_fetch();
        dashboard.apply_variants(t, Ok(vec![VariantItem::new("m", "M", "size")]));
        assert_eq!(dashboard.selector().selection().selected_items, vec!["m"]);
    }

    #[test]
    fn test_orders_page_filter() {
        let dashboard = loaded();
        assert_eq!(dashboard.orders(&OrderStatusFilter::All).len(), 3);
        let weird = OrderStatusFilter::Exact("weird".to_string());
        assert_eq!(dashboard.orders(&weird)[0].id, "o3");
        assert_eq!(dashboard.orders_in_bucket(OrderBucket::Shipped).len(), 1);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let mut dashboard = loaded();
        let json = serde_json::to_value(dashboard.view()).unwrap();
        assert_eq!(json["listTitle"], "All Products");
        assert_eq!(json["stockBucket"], "all");
        assert_eq!(json["orderRows"][0]["caption"], "3 Orders");
        assert!(json["loading"]["variantTypes"].is_boolean());
    }
}
