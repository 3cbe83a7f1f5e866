//! # Mercato Console Library
//!
//! Orchestration layer of the admin console: loads configuration, wires the
//! catalog source to one dashboard controller and exposes the dashboard
//! interactions as commands.
//!
//! ## Module Organization
//! ```text
//! mercato_console/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── ConsoleConfig (TOML + env)
//! │   ├── dashboard.rs◄─── Arc<Mutex<DashboardController>>
//! │   └── source.rs   ◄─── Arc<dyn CatalogSource>
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── dashboard.rs◄─── refresh, tiles, search, legend
//! │   ├── variants.rs ◄─── cascading variant dropdowns
//! │   └── orders.rs   ◄─── orders page list
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mercato_data::JsonDirSource;

use cli::{Cli, Command, DashboardArgs, VariantArgs};
use error::ApiError;
use state::{ConsoleConfig, DashboardState, SourceState};

/// Runs one console invocation and returns the JSON it produced.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Console Startup                                   │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → console.toml → MERCATO_* env → --data-dir              │
/// │                                                                         │
/// │  2. Initialize State Objects ─────────────────────────────────────────► │
/// │     • SourceState: JsonDirSource over the data dir                      │
/// │     • DashboardState: controller with palette and default bucket        │
/// │                                                                         │
/// │  3. Refresh ──────────────────────────────────────────────────────────► │
/// │     • All four snapshots fetched concurrently                           │
/// │                                                                         │
/// │  4. Apply Interactions & Render ──────────────────────────────────────► │
/// │     • Subcommand arguments replayed as UI interactions                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<String, ApiError> {
    let mut config = ConsoleConfig::load(cli.config.clone())?;
    if let Some(dir) = cli.data_dir.clone() {
        debug!(?dir, "Overriding data dir from command line");
        config.data.dir = dir;
        config.validate()?;
    }
    info!(data_dir = ?config.data.dir, "Starting Mercato console");

    let source = SourceState::new(JsonDirSource::new(config.data.dir.clone()));
    let dashboard = DashboardState::new(config.chart.clone(), config.dashboard.default_bucket);

    commands::dashboard::refresh(&source, &dashboard).await?;

    match cli.command.clone().unwrap_or_default() {
        Command::Dashboard(args) => {
            let view = apply_dashboard_args(&config, &dashboard, &args)?;
            render(&view, cli.compact)
        }
        Command::Orders { status } => {
            let response = commands::orders::list_orders(&dashboard, status.as_deref())?;
            render(&response, cli.compact)
        }
        Command::Variants(args) => {
            let response = apply_variant_args(&dashboard, &args)?;
            render(&response, cli.compact)
        }
    }
}

fn apply_dashboard_args(
    config: &ConsoleConfig,
    dashboard: &DashboardState,
    args: &DashboardArgs,
) -> Result<mercato_core::DashboardView, ApiError> {
    if let Some(bucket) = &args.bucket {
        commands::dashboard::select_stock_bucket(dashboard, bucket)?;
    }
    if let Some(query) = &args.search {
        commands::dashboard::set_search(config, dashboard, query)?;
    }
    if let Some(key) = &args.legend {
        commands::dashboard::select_legend(dashboard, key)?;
    }
    Ok(commands::dashboard::get_dashboard(dashboard))
}

fn apply_variant_args(
    dashboard: &DashboardState,
    args: &VariantArgs,
) -> Result<commands::variants::SelectionResponse, ApiError> {
    let mut response = match &args.product {
        Some(product_id) => commands::variants::restore_product_variants(dashboard, product_id)?,
        None => commands::variants::select_variant_type(dashboard, args.variant_type.as_deref()),
    };
    if !args.variants.is_empty() {
        response = commands::variants::select_variants(dashboard, &args.variants);
    }
    Ok(response)
}

fn render<T: Serialize>(value: &T, compact: bool) -> Result<String, ApiError> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays valid JSON.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=mercato_data=warn` - Quiet the data boundary
/// - Default: `info,mercato=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mercato=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
