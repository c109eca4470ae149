//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.chargewatch.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Feed endpoint settings.
    #[serde(default)]
    pub feeds: FeedsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Watch interval in seconds (0 disables watching).
    #[serde(default)]
    pub watch_seconds: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            watch_seconds: 0,
        }
    }
}

/// Feed endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedsConfig {
    /// URL of the station metadata feed.
    #[serde(default = "default_stations_url")]
    pub stations_url: String,

    /// URL of the live status feed.
    #[serde(default = "default_status_url")]
    pub status_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            stations_url: default_stations_url(),
            status_url: default_status_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_stations_url() -> String {
    "https://data.geo.admin.ch/ch.bfe.ladestellen-elektromobilitaet/data/oicp/ch.bfe.ladestellen-elektromobilitaet.json"
        .to_string()
}

fn default_status_url() -> String {
    "https://data.geo.admin.ch/ch.bfe.ladestellen-elektromobilitaet/status/oicp/ch.bfe.ladestellen-elektromobilitaet.json"
        .to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of operators shown in the chart (0 shows all).
    #[serde(default = "default_top_operators")]
    pub top_operators: usize,

    /// Include the per-station status listing.
    #[serde(default)]
    pub include_stations: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_operators: default_top_operators(),
            include_stations: false,
        }
    }
}

fn default_top_operators() -> usize {
    25
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".chargewatch.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref url) = args.stations_url {
            self.feeds.stations_url = url.clone();
        }
        if let Some(ref url) = args.status_url {
            self.feeds.status_url = url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.feeds.timeout_seconds = timeout;
        }

        if let Some(top) = args.top {
            self.report.top_operators = top;
        }
        if args.stations {
            self.report.include_stations = true;
        }

        if let Some(watch) = args.watch {
            self.general.watch_seconds = watch;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
