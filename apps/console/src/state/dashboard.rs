//! # Dashboard State
//!
//! Owns the one [`DashboardController`] behind the console.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Dashboard State Operations                           │
//! │                                                                         │
//! │  Frontend Action          Command                  Controller Change    │
//! │  ───────────────          ───────                  ─────────────────    │
//! │                                                                         │
//! │  Page mount ─────────────► refresh() ────────────► begin_*/apply_*     │
//! │                                                                         │
//! │  Click stock tile ───────► select_stock_bucket() ► filter bucket       │
//! │                                                                         │
//! │  Type in search ─────────► set_search() ─────────► filter query        │
//! │                                                                         │
//! │  Click legend entry ─────► select_legend() ──────► highlight           │
//! │                                                                         │
//! │  Pick variant type ──────► select_variant_type() ► selection reset     │
//! │                                                                         │
//! │  Render ─────────────────► get_dashboard() ──────► view() (memoized)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use mercato_core::{ChartPalette, DashboardController, StockBucket};

/// Thread-safe dashboard controller state.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    dashboard: Arc<Mutex<DashboardController>>,
}

impl DashboardState {
    /// Creates a controller with empty snapshots.
    pub fn new(palette: ChartPalette, default_bucket: StockBucket) -> Self {
        DashboardState {
            dashboard: Arc::new(Mutex::new(DashboardController::new(
                palette,
                default_bucket,
            ))),
        }
    }

    /// Executes a function with read access to the controller.
    pub fn with_dashboard<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&DashboardController) -> R,
    {
        let dashboard = self.dashboard.lock().unwrap_or_else(PoisonError::into_inner);
        f(&dashboard)
    }

    /// Executes a function with write access to the controller.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let view = state.with_dashboard_mut(|d| d.view());
    /// ```
    pub fn with_dashboard_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut DashboardController) -> R,
    {
        let mut dashboard = self.dashboard.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut dashboard)
    }
}
