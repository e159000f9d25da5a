//! Configuration loading and validation.
//!
//! A TOML file maps onto [`Config`]; every section and field has a default,
//! so an empty file is a valid configuration. CLI flags are applied on top of
//! the loaded file by the command handlers.
//!
//! # Example
//!
//! ```no_run
//! use tradelane::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("tradelane.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

mod logging;

pub use logging::LoggingConfig;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::application::{CargoConfig, MatchConfig, RouteConfig, ScanConfig};
use crate::error::{ConfigError, Result};

/// `[scan]` section: matching thresholds and scan-wide switches.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScanSection {
    #[serde(flatten)]
    pub thresholds: MatchConfig,

    /// Only consider orders from the safe-region list.
    #[serde(default)]
    pub safe_regions: bool,

    /// Match items in parallel.
    #[serde(default)]
    pub parallel: bool,
}

/// `[input]` section: snapshot files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputConfig {
    /// Orders CSV.
    #[serde(default = "default_orders")]
    pub orders: PathBuf,

    /// Location security table (JSON).
    #[serde(default = "default_locations")]
    pub locations: PathBuf,

    /// Item volume table (JSON). Required for single cargo mode.
    #[serde(default)]
    pub items: Option<PathBuf>,
}

fn default_orders() -> PathBuf {
    PathBuf::from("orders.csv")
}

fn default_locations() -> PathBuf {
    PathBuf::from("locations.json")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            orders: default_orders(),
            locations: default_locations(),
            items: None,
        }
    }
}

/// `[output]` section: report destination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Report CSV path.
    #[serde(default = "default_report")]
    pub report: PathBuf,

    /// Rows shown in the terminal summary table.
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_report() -> PathBuf {
    PathBuf::from("arbitrage_report.csv")
}

const fn default_top() -> usize {
    10
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report: default_report(),
            top: default_top(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanSection,

    /// Single cargo mode.
    #[serde(default)]
    pub cargo: CargoConfig,

    /// Route enrichment.
    #[serde(default)]
    pub routes: RouteConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: ReportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed or
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` when it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for an existing file.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a bad threshold or capacity,
    /// and `ConfigError::MissingField` when an enabled stage has no input.
    pub fn validate(&self) -> Result<()> {
        self.scan_config().validate()?;
        if self.cargo.enabled && self.input.items.is_none() {
            return Err(ConfigError::MissingField {
                field: "input.items",
            }
            .into());
        }
        if self.routes.enabled && self.routes.table.is_none() {
            return Err(ConfigError::MissingField {
                field: "routes.table",
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got \"{}\"", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    /// Pipeline settings assembled from the `[scan]`, `[cargo]` and
    /// `[routes]` sections.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            matching: self.scan.thresholds.clone(),
            cargo: self.cargo.clone(),
            routes: self.routes.clone(),
            safe_regions: self.scan.safe_regions,
            parallel: self.scan.parallel,
        }
    }

    /// Initialize logging from `[logging]`.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
