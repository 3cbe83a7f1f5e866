//! # Console Commands Module
//!
//! Every interaction the admin dashboard performs, as plain functions.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── dashboard.rs  ◄─── refresh, stock tiles, search, legend, notices
//! ├── variants.rs   ◄─── cascading variant type / variant dropdowns
//! └── orders.rs     ◄─── orders page list and status badges
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Needs the source and the controller
//! async fn refresh(source: &SourceState, dashboard: &DashboardState)
//!
//! // Only needs the controller
//! fn select_legend(dashboard: &DashboardState, key: &str)
//!
//! // Needs config for input limits
//! fn set_search(config: &ConsoleConfig, dashboard: &DashboardState, query: &str)
//! ```
//!
//! Commands return owned DTOs or [`ApiError`](crate::error::ApiError).

pub mod dashboard;
pub mod orders;
pub mod variants;
