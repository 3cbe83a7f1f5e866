//! # mercato-data: Data Boundary for Mercato Console
//!
//! This crate loads snapshots for the dashboard and normalizes the REST
//! backend's loosely typed documents into mercato-core records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mercato Console Data Flow                          │
//! │                                                                         │
//! │  Console command (refresh)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   mercato-data (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    source     │    │     wire      │    │    error     │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ CatalogSource │───►│ WireProduct   │    │  DataError   │  │   │
//! │  │   │ JsonDirSource │    │ WireOrder     │    │      │       │  │   │
//! │  │   │ StaticSource  │    │ normalize_*   │    │      ▼       │  │   │
//! │  │   └───────────────┘    └───────────────┘    │SnapshotError │  │   │
//! │  │                                             └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Product> / Vec<Order> / Vec<VariantType> / Vec<VariantItem>       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`source`] - The `CatalogSource` trait and its implementations
//! - [`wire`] - Wire record shapes and normalization
//! - [`error`] - Data error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mercato_data::{CatalogSource, JsonDirSource};
//!
//! let source = JsonDirSource::new("./data");
//! let (products, orders) = tokio::join!(source.fetch_products(), source.fetch_orders());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod source;
pub mod wire;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DataError, DataResult};
pub use source::{snapshot_file_name, CatalogSource, JsonDirSource, StaticSource};
