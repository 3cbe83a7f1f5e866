//! # Source State
//!
//! Wraps the catalog source the dashboard reads its snapshots from.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! let products = source.inner().fetch_products().await?;
//! ```

use std::sync::Arc;

use mercato_data::CatalogSource;

/// Shared handle to a [`CatalogSource`].
///
/// Cloning is cheap; every clone talks to the same source.
#[derive(Clone)]
pub struct SourceState {
    source: Arc<dyn CatalogSource>,
}

impl SourceState {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        SourceState {
            source: Arc::new(source),
        }
    }

    /// Returns the inner source.
    pub fn inner(&self) -> &dyn CatalogSource {
        self.source.as_ref()
    }
}

impl std::fmt::Debug for SourceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceState").finish_non_exhaustive()
    }
}
