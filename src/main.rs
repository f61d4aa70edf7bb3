//! Newswire main entry point
//!
//! Command-line driver for the news crawler: loads configuration, feeds
//! URLs from list files or stdin into the crawl queue, and prints the
//! summary line once every URL has been processed.

use clap::Parser;
use newswire::config::{load_config, validate, Config};
use newswire::policy::SiteDirectory;
use newswire::Crawler;
use std::io::BufRead;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Newswire: a concurrent news article crawler
///
/// Reads URLs from the given list files (or stdin when none are given),
/// fetches each article, resolves its canonical URL, and adds new articles
/// to the article store.
#[derive(Parser, Debug)]
#[command(name = "newswire")]
#[command(version = "0.1.0")]
#[command(about = "Concurrent news article crawler", long_about = None)]
struct Cli {
    /// URL list files, one URL per line; reads stdin when omitted
    #[arg(value_name = "URLS")]
    urls: Vec<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Article store base URL
    #[arg(long, value_name = "URL")]
    store_url: Option<String>,

    /// News site list file
    #[arg(long, value_name = "FILE")]
    sites: Option<PathBuf>,

    /// Number of crawl workers
    #[arg(long, value_name = "NUM")]
    threads: Option<usize>,

    /// Crawl queue capacity
    #[arg(long, value_name = "NUM")]
    queue_size: Option<usize>,

    /// HTTP fetch timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Consecutive errors before a site is ignored; 0 disables the ceiling
    #[arg(long, value_name = "NUM")]
    max_errors_per_site: Option<u32>,

    /// Largest accepted article body in bytes
    #[arg(long, value_name = "SIZE")]
    max_article_size: Option<usize>,

    /// Crawler instance name recorded in stored articles
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, then apply command-line overrides
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };
    apply_overrides(&mut config, &cli);
    validate(&config)?;

    // Load the news site directory
    let sites = match config.crawler.sites_file.clone() {
        Some(path) => {
            let directory = SiteDirectory::load(&path)?;
            tracing::info!(
                "Loaded {} news sites from {}",
                directory.len(),
                path.display()
            );
            directory
        }
        None => SiteDirectory::empty(),
    };

    let crawler = Crawler::new(config, sites)?;

    // Feed URLs from the listed files, or from stdin when none are given
    if cli.urls.is_empty() {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            submit(&crawler, line?).await;
        }
    } else {
        for path in &cli.urls {
            tracing::info!("Reading URLs from {}", path.display());
            let file = std::fs::File::open(path)?;
            for line in std::io::BufReader::new(file).lines() {
                submit(&crawler, line?).await;
            }
        }
    }

    crawler.wait().await;
    println!("{}", crawler.stats());

    Ok(())
}

/// Admits one line from a URL list, skipping blanks and comments
async fn submit(crawler: &Crawler, line: String) {
    let url = line.trim();
    if url.is_empty() || url.starts_with('#') {
        return;
    }
    crawler.crawl(url.to_string()).await;
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.store_url {
        config.store.url = url.clone();
    }
    if let Some(path) = &cli.sites {
        config.crawler.sites_file = Some(path.clone());
    }
    if let Some(threads) = cli.threads {
        config.crawler.threads = threads;
    }
    if let Some(queue_size) = cli.queue_size {
        config.crawler.queue_size = queue_size;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.fetch_timeout_secs = timeout;
    }
    if let Some(max_errors) = cli.max_errors_per_site {
        config.crawler.max_errors_per_site = max_errors;
    }
    if let Some(size) = cli.max_article_size {
        config.crawler.max_article_size = size;
    }
    if let Some(name) = &cli.name {
        config.crawler.name = name.clone();
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("newswire=info,warn"),
            1 => EnvFilter::new("newswire=debug,info"),
            2 => EnvFilter::new("newswire=trace,debug"),
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
