//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// chargewatch - terminal dashboard for public EV charging feeds
///
/// Fetches the station metadata and live status feeds, merges them into
/// per-operator statistics, and renders summary cards plus a stacked
/// status bar per operator.
///
/// Examples:
///   chargewatch
///   chargewatch --watch 60
///   chargewatch --format markdown --output dashboard.md
///   chargewatch --top 10 --stations
///   chargewatch --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// URL of the station metadata feed (EVSEData)
    ///
    /// Defaults to the public feed configured in .chargewatch.toml.
    #[arg(long, value_name = "URL", env = "CHARGEWATCH_STATIONS_URL")]
    pub stations_url: Option<String>,

    /// URL of the live status feed (EVSEStatuses)
    #[arg(long, value_name = "URL", env = "CHARGEWATCH_STATUS_URL")]
    pub status_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format (text, markdown, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the rendered dashboard to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Re-fetch and re-render every N seconds
    ///
    /// Each tick is an independent fetch-and-merge cycle; the last
    /// successfully fetched document per feed is kept across failed ticks.
    #[arg(short, long, value_name = "SECS")]
    pub watch: Option<u64>,

    /// Show only the N largest operators in the chart (0 shows all)
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Include the per-station status listing
    #[arg(long)]
    pub stations: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .chargewatch.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .chargewatch.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the rendered dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text dashboard (default)
    #[default]
    Text,
    /// Markdown report
    Markdown,
    /// JSON report
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate feed URL formats when provided
        for url in [&self.stations_url, &self.status_url].into_iter().flatten() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!(
                    "Feed URL must start with 'http://' or 'https://': {}",
                    url
                ));
            }
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Validate watch interval if provided
        if let Some(watch) = self.watch {
            if watch == 0 {
                return Err("Watch interval must be at least 1 second".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
