//! vote-directory main entry point
//!
//! This is the command-line interface for building the per-state voting
//! information directory.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vote_directory::cache::CacheStore;
use vote_directory::config::{load_config_with_hash, Config, ErrorPolicy};
use vote_directory::crawler::{build_directory, BuildReport};
use vote_directory::output::{
    export_directory, print_build_summary, print_cache_statistics, CacheStatistics,
};
use vote_directory::VoteError;

/// vote-directory: per-state voting information from vote.org
///
/// Builds a directory of every state's voting portal, COVID-19 info page and
/// election authority link. Fetched pages are cached on disk, so later runs
/// work offline.
#[derive(Parser, Debug)]
#[command(name = "vote-directory")]
#[command(version)]
#[command(about = "Per-state voting information directory", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Cache file to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    cache: Option<PathBuf>,

    /// Leave out states that cannot be built instead of failing
    #[arg(long)]
    skip_failures: bool,

    /// Print the record for one state
    #[arg(long, value_name = "NAME")]
    state: Option<String>,

    /// Write the directory as JSON to this path
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Show the effective configuration and cache summary without fetching
    #[arg(long, conflicts_with_all = ["cache_stats", "state", "export"])]
    dry_run: bool,

    /// Show cache statistics and exit
    #[arg(long, conflicts_with_all = ["dry_run", "state", "export"])]
    cache_stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load(&cli)?;
    if cli.skip_failures {
        config.build.on_state_error = ErrorPolicy::Skip;
    }

    let cache_path = cli
        .cache
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.cache.path));

    if cli.dry_run {
        handle_dry_run(&config, &cache_path);
        return Ok(());
    }

    let mut cache = CacheStore::load(&cache_path);

    if cli.cache_stats {
        print_cache_statistics(&CacheStatistics::collect(&cache));
        return Ok(());
    }

    let report = handle_build(&config, &mut cache).await?;

    if let Some(path) = &cli.export {
        export_directory(&report, path)
            .with_context(|| format!("Failed to export directory to {}", path.display()))?;
        println!("✓ Directory exported to: {}", path.display());
    }

    if let Some(name) = &cli.state {
        match report.directory.find(name) {
            Some(state) => println!("{}", state),
            None => bail!("'{}' is not a state in the directory", name),
        }
    } else if cli.export.is_none() {
        print_build_summary(&report);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("vote_directory=info,warn"),
            1 => EnvFilter::new("vote_directory=debug,info"),
            2 => EnvFilter::new("vote_directory=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or the defaults when none is given
fn load(cli: &Cli) -> anyhow::Result<Config> {
    let Some(path) = &cli.config else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the --dry-run mode: shows what a build would use
fn handle_dry_run(config: &Config, cache_path: &std::path::Path) {
    println!("=== vote-directory Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Index path: {}", config.site.index_path);
    println!("  COVID-19 path: {}", config.site.covid_path);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nBuild:");
    println!("  On state error: {:?}", config.build.on_state_error);
    println!("  Abbreviation overrides: {}", config.abbreviations.len());

    let cache = CacheStore::load(cache_path);
    println!("\nCache:");
    println!("  Path: {}", cache_path.display());
    println!("  Cached pages: {}", cache.len());

    println!("\n✓ Configuration is valid");
}

/// Handles the main build, racing it against Ctrl-C
async fn handle_build(config: &Config, cache: &mut CacheStore) -> anyhow::Result<BuildReport> {
    tracing::info!("Building state directory from {}", config.site.base_url);

    let result = tokio::select! {
        result = build_directory(config, cache) => result,
        _ = tokio::signal::ctrl_c() => Err(VoteError::Interrupted),
    };

    match result {
        Ok(report) => {
            if !report.is_complete() {
                tracing::warn!(
                    "Directory is incomplete: {} state(s) skipped",
                    report.skipped.len()
                );
            }
            Ok(report)
        }
        Err(e) => {
            tracing::error!("Build failed: {}", e);
            Err(e.into())
        }
    }
}
