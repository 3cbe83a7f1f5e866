//! # Catalog Sources
//!
//! Where snapshots come from.
//!
//! ## Source Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Console refresh                                                       │
//! │       │                                                                 │
//! │       │  tokio::join!(fetch_products(), fetch_orders(), ...)           │
//! │       ▼                                                                 │
//! │  dyn CatalogSource                                                     │
//! │  ├── JsonDirSource   products.json, orders.json,                       │
//! │  │                   variant_types.json, variants.json                 │
//! │  └── StaticSource    in-memory records, optional forced failures       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DataResult<Vec<Record>> ──► DashboardController::apply_*              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every fetch is independent. A failure of one snapshot never affects the
//! other three.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use mercato_core::{Order, Product, SnapshotKind, VariantItem, VariantType};

use crate::error::{DataError, DataResult};
use crate::wire::{
    normalize_orders, normalize_products, normalize_variant_types, normalize_variants,
    parse_payload,
};

/// Read side of the catalog backend.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_products(&self) -> DataResult<Vec<Product>>;

    async fn fetch_orders(&self) -> DataResult<Vec<Order>>;

    async fn fetch_variant_types(&self) -> DataResult<Vec<VariantType>>;

    async fn fetch_variants(&self) -> DataResult<Vec<VariantItem>>;
}

/// File name of a snapshot inside a data directory.
pub fn snapshot_file_name(kind: SnapshotKind) -> &'static str {
    match kind {
        SnapshotKind::Products => "products.json",
        SnapshotKind::Orders => "orders.json",
        SnapshotKind::VariantTypes => "variant_types.json",
        SnapshotKind::Variants => "variants.json",
    }
}

// =============================================================================
// JSON Directory Source
// =============================================================================

/// Reads REST payload exports from a directory.
///
/// ## Usage
/// ```rust,ignore
/// let source = JsonDirSource::new("./data");
/// let products = source.fetch_products().await?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonDirSource { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: SnapshotKind) -> PathBuf {
        self.dir.join(snapshot_file_name(kind))
    }

    async fn read_records(&self, kind: SnapshotKind) -> DataResult<Vec<Value>> {
        let path = self.path_for(kind);
        debug!(kind = %kind, path = %path.display(), "Reading snapshot");

        let body = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DataError::NotFound {
                    kind,
                    location: path.display().to_string(),
                }
            } else {
                DataError::Io {
                    location: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        parse_payload(kind, &body).inspect_err(|e| {
            warn!(kind = %kind, path = %path.display(), error = %e, "Unreadable snapshot payload");
        })
    }
}

#[async_trait]
impl CatalogSource for JsonDirSource {
    async fn fetch_products(&self) -> DataResult<Vec<Product>> {
        let records = self.read_records(SnapshotKind::Products).await?;
        Ok(normalize_products(records))
    }

    async fn fetch_orders(&self) -> DataResult<Vec<Order>> {
        let records = self.read_records(SnapshotKind::Orders).await?;
        Ok(normalize_orders(records))
    }

    async fn fetch_variant_types(&self) -> DataResult<Vec<VariantType>> {
        let records = self.read_records(SnapshotKind::VariantTypes).await?;
        Ok(normalize_variant_types(records))
    }

    async fn fetch_variants(&self) -> DataResult<Vec<VariantItem>> {
        let records = self.read_records(SnapshotKind::Variants).await?;
        Ok(normalize_variants(records))
    }
}

// =============================================================================
// Static Source
// =============================================================================

/// In-memory records, for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    products: Vec<Product>,
    orders: Vec<Order>,
    variant_types: Vec<VariantType>,
    variants: Vec<VariantItem>,
    failing: HashSet<SnapshotKind>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_orders(mut self, orders: Vec<Order>) -> Self {
        self.orders = orders;
        self
    }

    pub fn with_variant_types(mut self, variant_types: Vec<VariantType>) -> Self {
        self.variant_types = variant_types;
        self
    }

    pub fn with_variants(mut self, variants: Vec<VariantItem>) -> Self {
        self.variants = variants;
        self
    }

    /// Makes every fetch of `kind` fail with [`DataError::Unavailable`].
    pub fn failing(mut self, kind: SnapshotKind) -> Self {
        self.failing.insert(kind);
        self
    }

    fn serve<T: Clone>(&self, kind: SnapshotKind, records: &[T]) -> DataResult<Vec<T>> {
        if self.failing.contains(&kind) {
            return Err(DataError::Unavailable(kind));
        }
        Ok(records.to_vec())
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch_products(&self) -> DataResult<Vec<Product>> {
        self.serve(SnapshotKind::Products, &self.products)
    }

    async fn fetch_orders(&self) -> DataResult<Vec<Order>> {
        self.serve(SnapshotKind::Orders, &self.orders)
    }

    async fn fetch_variant_types(&self) -> DataResult<Vec<VariantType>> {
        self.serve(SnapshotKind::VariantTypes, &self.variant_types)
    }

    async fn fetch_variants(&self) -> DataResult<Vec<VariantItem>> {
        self.serve(SnapshotKind::Variants, &self.variants)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
