//! # State Module
//!
//! Application state for the console, split by concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │   SourceState    │  │  DashboardState  │  │  ConsoleConfig   │      │
//! │  │                  │  │                  │  │                  │      │
//! │  │  Arc<dyn         │  │  Arc<Mutex<      │  │  data dir        │      │
//! │  │   CatalogSource> │  │   Dashboard      │  │  default bucket  │      │
//! │  │                  │  │   Controller>>   │  │  chart palette   │      │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SourceState: sources are Send + Sync, fetches run concurrently      │
//! │  • DashboardState: every mutation takes the lock exclusively           │
//! │  • ConsoleConfig: read-only after startup                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The dashboard lock is never held across an `.await`. Fetches run
//! unlocked and only the apply step re-enters it.

mod config;
mod dashboard;
mod source;

pub use config::{ConfigError, ConfigResult, ConsoleConfig, DashboardSettings, DataSettings};
pub use dashboard::DashboardState;
pub use source::SourceState;
