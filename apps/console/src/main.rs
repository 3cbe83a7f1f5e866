//! # Mercato Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mercato Console                                  │
//! │                                                                         │
//! │  main.rs ────► Parses arguments, sets up logging                        │
//! │                                                                         │
//! │  lib.rs ─────► Loads config, builds state, refreshes snapshots          │
//! │                                                                         │
//! │  commands/ ──► select_stock_bucket, select_legend, list_orders, ...     │
//! │                                                                         │
//! │  stdout ─────► Dashboard view / order list / selection as JSON          │
//! │  stderr ─────► tracing output                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use mercato_console::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    mercato_console::init_tracing();

    match mercato_console::run(cli).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = ?err.code, "{}", err.message);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
