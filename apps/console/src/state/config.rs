//! # Console Configuration
//!
//! Configuration loaded once at startup. Read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (--data-dir), applied by the binary                   │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     MERCATO_DATA_DIR=/srv/exports                                      │
//! │     MERCATO_DEFAULT_BUCKET=limited                                     │
//! │     MERCATO_DIMMED_COLOR=#cfd8dc                                       │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/mercato-console/console.toml (Linux)                     │
//! │     ~/Library/Application Support/com.mercato.console/console.toml     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # console.toml
//! [data]
//! dir = "./data"
//!
//! [dashboard]
//! default_bucket = "all"   # all | out | limited | other
//! search_max_chars = 100
//!
//! [chart]
//! pending = "#ed6c02"
//! processed = "#1976d2"
//! cancelled = "#d32f2f"
//! shipped = "#0288d1"
//! delivered = "#2e7d32"
//! dimmed = "#cfd8dc"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use mercato_core::validation::validate_hex_color;
use mercato_core::{ChartPalette, StockBucket, ValidationError, MAX_SEARCH_QUERY_CHARS};

// =============================================================================
// Config Error
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Where the catalog snapshots are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    /// Directory holding products.json, orders.json, variant_types.json
    /// and variants.json.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings {
            dir: default_data_dir(),
        }
    }
}

/// Dashboard behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Stock tile selected when the dashboard mounts.
    #[serde(default)]
    pub default_bucket: StockBucket,

    /// Longest accepted search box input.
    #[serde(default = "default_search_max_chars")]
    pub search_max_chars: usize,
}

fn default_search_max_chars() -> usize {
    MAX_SEARCH_QUERY_CHARS
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            default_bucket: StockBucket::All,
            search_max_chars: default_search_max_chars(),
        }
    }
}

// =============================================================================
// Console Config
// =============================================================================

/// Complete console configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub data: DataSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    /// Order chart colors.
    #[serde(default)]
    pub chart: ChartPalette,
}

impl ConsoleConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (console.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading console config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.data.dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data.dir must not be empty".into()));
        }

        if self.dashboard.search_max_chars == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.search_max_chars must be greater than 0".into(),
            ));
        }

        for (name, color) in self.chart.entries() {
            validate_hex_color(&format!("chart.{}", name), color)?;
        }

        Ok(())
    }

    /// Applies `MERCATO_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("MERCATO_DATA_DIR") {
            debug!(dir = %dir, "Overriding data dir from environment");
            self.data.dir = PathBuf::from(dir);
        }

        if let Some(bucket) = lookup("MERCATO_DEFAULT_BUCKET") {
            match bucket.parse::<StockBucket>() {
                Ok(parsed) => self.dashboard.default_bucket = parsed,
                Err(e) => {
                    warn!(bucket = %bucket, error = %e, "Ignoring default bucket from environment")
                }
            }
        }

        if let Some(color) = lookup("MERCATO_DIMMED_COLOR") {
            debug!(color = %color, "Overriding dimmed chart color from environment");
            self.chart.dimmed = color;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "mercato", "console")
            .map(|dirs| dirs.config_dir().join("console.toml"))
    }
}
