//! Unmatched-assets report CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use shared::Config;
use std::path::PathBuf;
use tracing::{info, warn};
use unmatched_report::{ReportRunner, Resolver, RunOptions, TmdbClient, TvdbClient};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log file to parse (overrides config)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for report files (overrides config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Keep report files from previous runs
    #[arg(long)]
    no_cleanup: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let loaded = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    let config_found = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    config.apply_env_overrides();

    // Initialize logging
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        shared::logging::parse_level(&config.logging.default_level)
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.log_dir().to_string_lossy().to_string(),
        component: "unmatched-report".to_string(),
        default_level: log_level,
        console: config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    if !config_found {
        warn!(path = %args.config.display(), "Config file not found, using defaults");
    }
    info!(config_file = %args.config.display(), "Unmatched report starting");

    let options = RunOptions {
        log_file: args.input.unwrap_or_else(|| config.log_file()),
        output_dir: args.output_dir.unwrap_or_else(|| config.output_dir()),
        batch_size: config.batch_size(),
        cleanup: !args.no_cleanup,
    };

    // Initialize API clients
    let tmdb = TmdbClient::new(&config.tmdb).context("Failed to create TMDb client")?;
    let tvdb = TvdbClient::new(&config.tvdb).context("Failed to create TVDb client")?;
    let resolver = Resolver::new(tmdb, tvdb);

    let mut runner = ReportRunner::new(resolver, options);
    let stdout = std::io::stdout();
    let stats = runner.run(&mut stdout.lock()).await.context("Report failed")?;

    info!(
        lookups = stats.resolver.lookups,
        found = stats.resolver.found,
        files = stats.files_written.len(),
        "Unmatched report finished successfully"
    );

    Ok(())
}
