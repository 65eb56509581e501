//! scopecrawl CLI
//!
//! Offline driver for the page-processing core: plays the external
//! scheduler, feeding fetched-page records from a JSON-lines file into
//! the processor with bounded concurrency.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use futures::stream::{self, StreamExt};
use scopecrawl::{
    error::{AppError, Result},
    models::{Config, FetchedPage, PageOutcome, ProcessStats},
    pipeline::{CrawlState, PageProcessor, StopWords, UrlFilter},
    storage::{
        FREQUENCIES_FILE, LONGEST_PAGE_FILE, LocalStorage, ReportStorage, UNIQUE_PAGES_FILE,
    },
};
use serde::Deserialize;

/// scopecrawl - restricted-domain crawler page processor
#[derive(Parser, Debug)]
#[command(
    name = "scopecrawl",
    version,
    about = "Page-processing and link-discovery core for a restricted-domain crawler"
)]
struct Cli {
    /// Path to storage directory containing config.toml and reports
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process fetched pages from a JSON-lines file
    Process {
        /// Input file: one {"url", "status", "body"} object per line
        #[arg(long)]
        input: PathBuf,
    },

    /// Validate configuration and scope policy
    Validate,

    /// Show the current persisted reports
    Info,
}

/// One fetched-page record as produced by an external fetcher.
#[derive(Debug, Deserialize)]
struct PageRecord {
    url: String,
    status: u16,
    #[serde(default)]
    body: Option<String>,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Arc::new(Config::load_or_default(&config_path));
    let storage = LocalStorage::new(&cli.storage_dir);

    match cli.command {
        Command::Process { input } => {
            run_process(config, storage, &input).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {e}");
                return Err(e);
            }
            UrlFilter::new(&config.scope)?;

            log::info!("✓ Config OK");
            log::info!("  allowed domains: {}", config.scope.allowed_domains.join(", "));
            log::info!("  trap patterns: {}", config.scope.trap_patterns.len());
            log::info!("  blocked extensions: {}", config.scope.blocked_extensions.len());
            log::info!("  stop words: {}", config.stopwords.words.len());
            log::info!("All validations passed!");
        }

        Command::Info => {
            show_info(&storage).await?;
        }
    }

    Ok(())
}

/// Drive the processor over every record in the input file.
async fn run_process(config: Arc<Config>, storage: LocalStorage, input: &PathBuf) -> Result<()> {
    log::info!("scopecrawl starting...");

    if !input.exists() {
        return Err(AppError::config(format!(
            "Input file not found: {}",
            input.display()
        )));
    }

    let content = std::fs::read_to_string(input)?;
    let records: Vec<PageRecord> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect::<std::result::Result<_, _>>()?;
    log::info!("Loaded {} page records from {}", records.len(), input.display());

    let state = Arc::new(CrawlState::new(StopWords::new(&config.stopwords.words)));
    let storage: Arc<dyn ReportStorage> = Arc::new(storage);
    let processor = Arc::new(PageProcessor::new(
        Arc::clone(&config),
        Arc::clone(&state),
        Arc::clone(&storage),
    )?);

    let concurrency = config.processor.max_concurrent.max(1);
    let mut stats = ProcessStats::begin();

    let mut outcomes = stream::iter(records)
        .map(|record| {
            let processor = Arc::clone(&processor);
            async move {
                let page = FetchedPage::new(
                    record.url,
                    record.status,
                    record.body.map(String::into_bytes),
                );
                let url = page.url.clone();
                let outcome = processor.process(&page.url, &page).await;
                (url, outcome)
            }
        })
        .buffer_unordered(concurrency);

    while let Some((url, result)) = outcomes.next().await {
        match result {
            Ok(outcome) => {
                if let PageOutcome::Accepted { links } = &outcome {
                    log::info!("{url}: {} new links", links.len());
                }
                stats.record(&outcome);
            }
            Err(error) => {
                stats.record_failure();
                log::error!("Failed to process {url}: {error}");
            }
        }
    }

    stats.finish();

    // Final flush so the persisted reports reflect the latest state even
    // with a throttled persistence cadence.
    processor.persist().await?;
    storage.write_stats(&stats).await?;

    log::info!("Processing complete!");
    log::info!("  pages seen: {}", stats.pages_seen);
    log::info!("  accepted: {}", stats.accepted);
    log::info!(
        "  skipped: {} fetch errors, {} empty, {} too large, {} too small, {} duplicates",
        stats.skipped_fetch_error,
        stats.skipped_empty,
        stats.skipped_too_large,
        stats.skipped_too_small,
        stats.skipped_duplicate
    );
    log::info!("  links emitted: {}", stats.links_emitted);
    if stats.failed > 0 {
        log::warn!("  failed pages: {}", stats.failed);
    }

    Ok(())
}

/// Print a summary of the persisted artifacts.
async fn show_info(storage: &LocalStorage) -> Result<()> {
    match storage.read_artifact(UNIQUE_PAGES_FILE).await? {
        Some(count) => log::info!("Unique pages: {}", count.trim()),
        None => log::info!("No reports found yet."),
    }

    if let Some(report) = storage.read_artifact(FREQUENCIES_FILE).await? {
        log::info!("Top tokens:");
        for line in report.lines().take(10) {
            log::info!("  {line}");
        }
    }

    if let Some(longest) = storage.read_artifact(LONGEST_PAGE_FILE).await? {
        if let Some(header) = longest.lines().next() {
            log::info!("Longest page: {header}");
        }
    }

    Ok(())
}
