//! Pagesweep main entry point
//!
//! This is the command-line interface for the Pagesweep batch page scraper.

use clap::Parser;
use pagesweep::config::{load_or_create_config, Config};
use pagesweep::output::{load_urls, print_summary, save_results, RunSummary};
use pagesweep::progress::{ProgressSink, SilentProgress, TerminalProgress};
use pagesweep::{DefaultScraper, HttpFetcher, ScrapeMode, ScrapeRunner};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const SEPARATOR: &str = "------------------------------------------------------------";

/// Pagesweep: a batch page scraper
///
/// Pagesweep fetches every URL in the configured list, extracts page titles,
/// links and images, and reports how many pages succeeded.
#[derive(Parser, Debug)]
#[command(name = "pagesweep")]
#[command(version = "1.0.0")]
#[command(about = "A batch page scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (created with defaults if missing)
    #[arg(short, long, value_name = "CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// How to process the URL list
    #[arg(short, long, value_enum, default_value_t = ScrapeMode::Parallel)]
    mode: ScrapeMode,

    /// Override the configured number of parallel workers
    #[arg(long)]
    concurrency: Option<u32>,

    /// Save results to a timestamped JSON file
    #[arg(short, long)]
    save: bool,

    /// Show configuration and URL count without scraping
    #[arg(long)]
    dry_run: bool,

    /// Hide per-URL progress bars
    #[arg(long)]
    no_progress: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Bars and logs share stderr, so logging goes through the bars when shown
    let terminal = (!cli.no_progress && !cli.quiet).then(TerminalProgress::new);

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet, terminal.as_ref());

    print_banner();

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_or_create_config(&cli.config).with_concurrency(cli.concurrency) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid --concurrency: {}", e);
            return Err(pagesweep::PagesweepError::from(e).into());
        }
    };

    let urls_path = Path::new(&config.scraper.urls_file);
    let urls = match load_urls(urls_path) {
        Ok(urls) => urls,
        Err(e) => {
            tracing::error!("Failed to load URLs: {}", e);
            return Err(e.into());
        }
    };

    print_config(&config, urls.len());

    if urls.is_empty() {
        println!("No URLs configured.");
        println!(
            "Please add URLs to '{}' before running the scraper.",
            config.scraper.urls_file
        );
        return Ok(());
    }

    if cli.dry_run {
        println!("\n✓ Configuration is valid");
        println!("✓ Would scrape {} URLs in {} mode", urls.len(), cli.mode);
        return Ok(());
    }

    handle_scrape(&config, urls, cli.mode, cli.save, terminal).await?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool, progress: Option<&TerminalProgress>) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagesweep=info,warn"),
            1 => EnvFilter::new("pagesweep=debug,info"),
            2 => EnvFilter::new("pagesweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let writer = match progress {
        Some(progress) => BoxMakeWriter::new(progress.log_writer()),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(writer)
        .init();
}

fn print_banner() {
    println!("{}", SEPARATOR);
    println!("  pagesweep {}", env!("CARGO_PKG_VERSION"));
    println!("{}", SEPARATOR);
}

/// Prints the effective configuration
fn print_config(config: &Config, url_count: usize) {
    let scraper = &config.scraper;

    println!("URLs File: {} ({} urls loaded)", scraper.urls_file, url_count);
    println!("Results Directory: {}/", scraper.results_directory);
    println!("Concurrency: {}", scraper.concurrency);
    println!("HTTP Timeout (s): {}", scraper.http_timeout_seconds);

    // Long user agents only clutter the overview
    let user_agent: String = if scraper.user_agent.chars().count() > 80 {
        format!("{}...", scraper.user_agent.chars().take(80).collect::<String>())
    } else {
        scraper.user_agent.clone()
    };
    println!("User-Agent: {}", user_agent);
    println!("{}", SEPARATOR);
}

/// Handles the main scrape operation
async fn handle_scrape(
    config: &Config,
    urls: Vec<String>,
    mode: ScrapeMode,
    save: bool,
    terminal: Option<TerminalProgress>,
) -> pagesweep::Result<()> {
    let fetcher = HttpFetcher::new(&config.scraper.fetcher_config())?;
    let scraper = DefaultScraper::new(Arc::new(fetcher));

    let progress: Arc<dyn ProgressSink> = match terminal {
        Some(terminal) => Arc::new(terminal),
        None => Arc::new(SilentProgress),
    };
    let runner = ScrapeRunner::new(Arc::new(scraper)).with_progress(progress);

    // Ctrl-C cancels in-flight requests and skips the rest
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling remaining work");
            signal_token.cancel();
        }
    });

    println!("Running {} scraper...", mode.as_str());
    let start_time = Instant::now();
    let pages = runner
        .run(
            mode,
            &cancel,
            &urls,
            config.scraper.concurrency as usize,
        )
        .await;

    println!("{}", SEPARATOR);
    let summary = RunSummary::from_pages(&pages, start_time.elapsed());
    print_summary(&summary);
    println!("{}", SEPARATOR);

    if save {
        match save_results(Path::new(&config.scraper.results_directory), &pages) {
            Ok(path) => println!("Results saved to: {}", path.display()),
            Err(e) => {
                tracing::error!("Error saving results: {}", e);
                return Err(e);
            }
        }
    } else {
        println!("Results not saved (use --save to write them).");
    }

    Ok(())
}
