//! Startup-Harvest main entry point
//!
//! This is the command-line interface for the HK Tech 300 start-up harvester.

use anyhow::Context;
use clap::Parser;
use startup_harvest::config::{load_config_with_hash, validate, Config};
use startup_harvest::crawler::run_harvest;
use startup_harvest::output::print_summary;
use startup_harvest::url::listing_page_url;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Startup-Harvest: a resilient listing-and-detail scraper
///
/// Walks the paginated HK Tech 300 start-up listing, visits every team page,
/// and writes each team's website and contact email to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "startup-harvest")]
#[command(version)]
#[command(about = "Harvests start-up contact details from the HK Tech 300 listing", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the number of listing pages to visit
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Override the CSV output path
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Print the effective configuration and listing URLs without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_hash) = match &cli.config {
        Some(path) => load_config_with_hash(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => (Config::default(), "default".to_string()),
    };

    apply_overrides(&mut config, &cli)?;

    if cli.dry_run {
        return handle_dry_run(&config, &config_hash);
    }

    setup_logging(cli.verbose, cli.quiet, config.output.log_path.as_deref())?;

    match &cli.config {
        Some(path) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            config_hash
        ),
        None => tracing::info!("No configuration file given, using built-in defaults"),
    }

    handle_harvest(config, &config_hash).await
}

/// Applies command-line overrides and re-validates the result
fn apply_overrides(config: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    if let Some(max_pages) = cli.max_pages {
        config.crawl.max_pages = max_pages;
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.clone();
    }

    validate(config).context("Invalid configuration")?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// When `log_path` is set, every event also goes to that file (appended).
fn setup_logging(verbose: u8, quiet: bool, log_path: Option<&str>) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("startup_harvest=info,warn"),
            1 => EnvFilter::new("startup_harvest=debug,info"),
            2 => EnvFilter::new("startup_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    match log_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr.and(Mutex::new(file)))
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .init();
        }
    }

    Ok(())
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, config_hash: &str) -> anyhow::Result<()> {
    println!("=== Startup-Harvest Dry Run ===\n");
    println!("Config hash: {}\n", config_hash);

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Team path root: {}", config.site.team_path_root);
    println!("  Own domain: {}", config.site.own_domain);
    println!("  Generic email: {}", config.site.generic_email);
    println!("  Social domains: {}", config.site.social_domains.join(", "));

    println!("\nCrawl:");
    println!("  Max pages: {}", config.crawl.max_pages);
    println!("  Max attempts: {}", config.crawl.max_attempts);
    println!("  Settle delay: {}ms", config.crawl.settle_delay_ms);
    println!("  Ready timeout: {}ms", config.crawl.ready_timeout_ms);
    println!(
        "  Restart backoff: {}-{}ms",
        config.crawl.backoff_min_ms, config.crawl.backoff_max_ms
    );
    println!("  Rate limit: {}ms", config.crawl.rate_limit_ms);

    println!("\nRenderer:");
    println!("  Kind: {:?}", config.renderer.kind);
    println!("  Headless: {}", config.renderer.headless);
    println!(
        "  Window: {}x{}",
        config.renderer.window_width, config.renderer.window_height
    );
    println!("  User agent: {}", config.renderer.user_agent);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    if let Some(log) = &config.output.log_path {
        println!("  Log: {}", log);
    }
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    let base = Url::parse(&config.site.base_url)?;
    println!("\nListing pages ({}):", config.crawl.max_pages);
    for page in 0..config.crawl.max_pages {
        let url = listing_page_url(
            &base,
            &config.site.listing_path,
            &config.site.page_param,
            page,
        )?;
        println!("  {}", url);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config, config_hash: &str) -> anyhow::Result<()> {
    tracing::info!(
        "Harvesting {} listing pages from {}",
        config.crawl.max_pages,
        config.site.base_url
    );

    match run_harvest(config, config_hash).await {
        Ok(summary) => {
            tracing::info!("Harvest completed successfully");
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
