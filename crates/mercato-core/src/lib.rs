//! # mercato-core: Pure Dashboard Logic for Mercato Console
//!
//! This crate is the derived-state engine behind the admin dashboard. It
//! turns product, order and variant snapshots into the numbers, lists and
//! chart specs the dashboard renders. Nothing in here performs I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mercato Console Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard UI                                 │   │
//! │  │    Stock tiles ──► Product list ──► Order donut ──► Variants   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Console Commands                             │   │
//! │  │    refresh, select_stock_bucket, select_legend, etc.           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ mercato-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   stock   │  │  orders   │  │ highlight │  │ selector  │  │   │
//! │  │   │  buckets  │  │  buckets  │  │  chart    │  │  cascade  │  │   │
//! │  │   │  filter   │  │  counts   │  │  rows     │  │  pool     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                 dashboard (controller) + snapshot               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING SINKS • SYNCHRONOUS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │                 mercato-data (Data Boundary)                    │   │
//! │  │       REST payloads ──► normalized Product / Order / Variant    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Snapshot records (Product, Order, VariantType, VariantItem)
//! - [`money`] - Integer-cent money
//! - [`stock`] - Stock buckets, composite product filter, tile counts
//! - [`orders`] - Order status rules, aggregate counter, orders page filter
//! - [`highlight`] - Legend highlight state, chart spec, order summary rows
//! - [`selector`] - Variant type → variant items cascading selection
//! - [`snapshot`] - Last-good snapshot slots with fetch tickets
//! - [`dashboard`] - The controller tying all of the above together
//! - [`validation`] - Input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use mercato_core::dashboard::DashboardController;
//! use mercato_core::stock::StockBucket;
//! use mercato_core::types::Product;
//!
//! let mut dashboard = DashboardController::default();
//! let ticket = dashboard.begin_products_fetch();
//! dashboard.apply_products(
//!     ticket,
//!     Ok(vec![
//!         Product::new("p1", "Mug", 0),
//!         Product::new("p2", "Cap", 3),
//!         Product::new("p3", "Tee", 7),
//!     ]),
//! );
//!
//! dashboard.select_stock_bucket(StockBucket::Limited);
//! let names: Vec<_> = dashboard
//!     .filtered_products()
//!     .iter()
//!     .map(|p| p.name.clone())
//!     .collect();
//! assert_eq!(names, vec!["Cap"]);
//! assert_eq!(dashboard.stock_counts().all, 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dashboard;
pub mod error;
pub mod highlight;
pub mod money;
pub mod orders;
pub mod selector;
pub mod snapshot;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dashboard::{DashboardController, DashboardView};
pub use error::{CoreError, CoreResult, SnapshotError, SnapshotKind, ValidationError};
pub use highlight::{ChartPalette, Highlight};
pub use money::Money;
pub use orders::{aggregate_orders, classify_order, OrderBucket, OrderCounts, OrderStatusFilter};
pub use selector::{CascadingSelector, SelectionState};
pub use snapshot::{FetchTicket, SnapshotOutcome};
pub use stock::{classify_stock, filter_products, StockBucket, StockCounts};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Highest quantity that still counts as limited stock.
///
/// The out-of-stock bucket is exactly zero; anything above this is "other".
pub const LIMITED_STOCK_MAX: i64 = 5;

/// Default cap on search box input.
pub const MAX_SEARCH_QUERY_CHARS: usize = 100;

/// Longest record id accepted from the UI. Backend ids are 24-char ObjectIds.
pub const MAX_RECORD_ID_CHARS: usize = 64;
