//! Aerodex main entry point
//!
//! Command-line interface for the airport directory crawler.

use aerodex::config::load_config;
use aerodex::config::validate;
use aerodex::crawler::crawl;
use aerodex::AirportStore;
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Aerodex: an airport directory crawler
///
/// Walks the directory's continent/country/state/page hierarchy and files
/// structured airport records into a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "aerodex")]
#[command(version)]
#[command(about = "Crawl an airport directory into SQLite", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Start from this continent instead of the full listing
    #[arg(long)]
    continent: Option<String>,

    /// Narrow the crawl to this country (requires --continent)
    #[arg(long)]
    country: Option<String>,

    /// Narrow the crawl to this US state (requires --country)
    #[arg(long)]
    state: Option<String>,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show record counts from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config).context("failed to load configuration")?;

    // CLI scope flags override the config's [scope] table field-by-field,
    // then the merged scope is re-validated.
    if cli.continent.is_some() {
        config.scope.continent = cli.continent.clone();
    }
    if cli.country.is_some() {
        config.scope.country = cli.country.clone();
    }
    if cli.state.is_some() {
        config.scope.state = cli.state.clone();
    }
    validate(&config).context("invalid crawl scope")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    if cli.stats {
        return handle_stats(&config);
    }

    let stats = crawl(config).await.context("crawl failed")?;
    tracing::info!(
        "done: {} airports filed, {} conflicts",
        stats.airports_filed,
        stats.conflicts
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("aerodex=info,warn"),
            1 => EnvFilter::new("aerodex=debug,info"),
            2 => EnvFilter::new("aerodex=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Handles --dry-run: validates config and shows what would be crawled
fn handle_dry_run(config: &aerodex::Config) {
    println!("=== Aerodex Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);

    println!("\nCrawler:");
    println!("  Delay: {}ms", config.crawler.delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\nScope:");
    match &config.scope.continent {
        Some(continent) => {
            println!("  Continent: {}", continent);
            if let Some(country) = &config.scope.country {
                println!("  Country: {}", country);
            }
            if let Some(state) = &config.scope.state {
                println!("  State: {}", state);
            }
        }
        None => println!("  Full directory (all continents)"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles --stats: prints record counts from the database
fn handle_stats(config: &aerodex::Config) -> anyhow::Result<()> {
    let store = AirportStore::open(Path::new(&config.output.database_path))
        .context("failed to open database")?;

    println!("Database: {}", config.output.database_path);
    println!("Airports recorded: {}", store.count()?);

    Ok(())
}
