//! chargewatch - Terminal Dashboard for Public EV Charging Feeds
//!
//! A CLI tool that fetches the station metadata and live status feeds
//! concurrently, merges them into per-operator statistics, and renders
//! summary cards plus a stacked status bar per operator.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (invalid arguments, config failure, both feeds failed)

mod analysis;
mod cli;
mod config;
mod feeds;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use feeds::{EvseDataDocument, EvseStatusDocument, FeedClient};
use indicatif::{ProgressBar, ProgressStyle};
use models::{Dashboard, DashboardMetadata};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("chargewatch v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Dashboard failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .chargewatch.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".chargewatch.toml");

    if path.exists() {
        eprintln!("⚠️  .chargewatch.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .chargewatch.toml")?;

    println!("✅ Created .chargewatch.toml with default settings.");
    println!("   Edit it to customize feed URLs, timeout, and report options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .chargewatch.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Run the dashboard workflow. Returns exit code.
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let client = FeedClient::new(
        config.feeds.stations_url.clone(),
        config.feeds.status_url.clone(),
        config.feeds.timeout_seconds,
    );

    if config.general.watch_seconds > 0 {
        run_watch(&args, &config, &client, config.general.watch_seconds).await
    } else {
        run_once(&args, &config, &client).await
    }
}

/// Last successfully fetched document per source.
///
/// A failed fetch leaves the previous document in place, so a watch tick
/// with one broken feed still renders the most recent good data.
#[derive(Default)]
struct FeedState {
    stations: Option<EvseDataDocument>,
    status: Option<EvseStatusDocument>,
}

/// Single-shot mode: fetch once, render, exit.
async fn run_once(args: &Args, config: &Config, client: &FeedClient) -> Result<i32> {
    let mut state = FeedState::default();
    let (stations_error, status_error) = refresh(client, &mut state, args.quiet).await;

    // One source failing is degraded output; both failing is an error
    if let (Some(stations_err), Some(status_err)) = (&stations_error, &status_error) {
        anyhow::bail!("both feeds failed: {}; {}", stations_err, status_err);
    }

    let dashboard = build_dashboard(client, &state, stations_error, status_error);
    render(args, config, &dashboard)?;

    Ok(0)
}

/// Watch mode: re-fetch and re-render every `interval_seconds`.
///
/// Ticks run strictly sequentially, so no stale response can overwrite a
/// newer one.
async fn run_watch(
    args: &Args,
    config: &Config,
    client: &FeedClient,
    interval_seconds: u64,
) -> Result<i32> {
    info!("Watching feeds every {}s (Ctrl-C to stop)", interval_seconds);

    let mut state = FeedState::default();
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_seconds));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let (stations_error, status_error) = refresh(client, &mut state, args.quiet).await;
        let dashboard = build_dashboard(client, &state, stations_error, status_error);

        if args.output.is_none() && args.format == OutputFormat::Text {
            // Redraw from the top-left between ticks
            print!("\x1B[2J\x1B[1;1H");
        }
        render(args, config, &dashboard)?;
    }
}

/// Fetch both feeds concurrently, updating the state on success per source.
///
/// Returns this round's error message per source, if any.
async fn refresh(
    client: &FeedClient,
    state: &mut FeedState,
    quiet: bool,
) -> (Option<String>, Option<String>) {
    let spinner = fetch_spinner(quiet);

    let (stations, status) = client.fetch_both().await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let stations_error = match stations {
        Ok(doc) => {
            debug!("stations feed: {} operators", doc.operators.len());
            state.stations = Some(doc);
            None
        }
        Err(e) => {
            warn!("stations feed failed: {}", e);
            Some(e.to_string())
        }
    };

    let status_error = match status {
        Ok(doc) => {
            debug!("status feed: {} operator blocks", doc.operators.len());
            state.status = Some(doc);
            None
        }
        Err(e) => {
            warn!("status feed failed: {}", e);
            Some(e.to_string())
        }
    };

    (stations_error, status_error)
}

/// Spinner shown while the fetch pair is in flight.
fn fetch_spinner(quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Fetching feeds...");
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Merge the current feed state into a dashboard snapshot.
fn build_dashboard(
    client: &FeedClient,
    state: &FeedState,
    stations_error: Option<String>,
    status_error: Option<String>,
) -> Dashboard {
    let operators = analysis::merge_documents(state.stations.as_ref(), state.status.as_ref());

    Dashboard::new(
        DashboardMetadata {
            stations_url: client.stations_url().to_string(),
            status_url: client.status_url().to_string(),
            fetched_at: Utc::now(),
            stations_error,
            status_error,
        },
        operators,
    )
}

/// Render a snapshot to stdout or to the requested output file.
fn render(args: &Args, config: &Config, dashboard: &Dashboard) -> Result<()> {
    let top = config.report.top_operators;
    let include_stations = config.report.include_stations;

    let content = match args.format {
        OutputFormat::Text => report::render_dashboard(dashboard, top, include_stations),
        OutputFormat::Markdown => report::generate_markdown_report(dashboard, include_stations),
        OutputFormat::Json => report::generate_json_report(dashboard)?,
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write dashboard to {}", path.display()))?;
            if !args.quiet {
                println!("✅ Dashboard written to: {}", path.display());
            }
        }
        None => println!("{}", content),
    }

    Ok(())
}
