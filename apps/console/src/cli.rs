//! Command line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "mercato-console",
    version,
    about = "Derive the admin dashboard from catalog snapshots and print it as JSON"
)]
pub struct Cli {
    /// Path to console.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the JSON snapshots; overrides the config file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print single-line JSON instead of pretty JSON
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the dashboard view (the default)
    Dashboard(DashboardArgs),

    /// Print the orders page list
    Orders {
        /// Exact status to list; omit or pass "all" for every order
        #[arg(long)]
        status: Option<String>,
    },

    /// Walk the cascading variant dropdowns
    Variants(VariantArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Dashboard(DashboardArgs::default())
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct DashboardArgs {
    /// Stock tile to select: all, out, limited or other
    #[arg(long)]
    pub bucket: Option<String>,

    /// Product name search
    #[arg(long)]
    pub search: Option<String>,

    /// Legend entry to highlight: all or an order bucket key
    #[arg(long)]
    pub legend: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct VariantArgs {
    /// Pre-fill both dropdowns from a saved product
    #[arg(long, conflicts_with = "variant_type")]
    pub product: Option<String>,

    /// Variant type to select
    #[arg(long)]
    pub variant_type: Option<String>,

    /// Variant ids to select, comma separated
    #[arg(long, value_delimiter = ',')]
    pub variants: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_dashboard() {
        let cli = Cli::parse_from(["mercato-console", "--compact"]);
        assert!(cli.compact);
        assert!(cli.command.is_none());
        assert!(matches!(cli.command.unwrap_or_default(), Command::Dashboard(_)));
    }

    #[test]
    fn test_variant_list_is_comma_separated() {
        let cli = Cli::parse_from([
            "mercato-console",
            "variants",
            "--variant-type",
            "t-size",
            "--variants",
            "s,xl",
        ]);
        match cli.command {
            Some(Command::Variants(args)) => {
                assert_eq!(args.variant_type.as_deref(), Some("t-size"));
                assert_eq!(args.variants, vec!["s", "xl"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["mercato-console", "orders", "--data-dir", "/tmp/x"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }
}
