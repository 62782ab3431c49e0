// src/main.rs
// =============================================================================
// Entry point.
//
// 1. Parse command-line arguments
// 2. Validate the start URL and build the HTTP client
// 3. Run the crawl (or single-page harvest); Ctrl-C asks it to stop early
// 4. Print the report (also after Ctrl-C) and exit:
//      0 = every page and asset succeeded
//      1 = finished, but some pages or downloads failed
//      2 = fatal error before the crawl could start
//    130 = interrupted
//
// Rust concepts:
// - anyhow::Result: any error type converts into it with ?, which suits the
//   application layer; the modules below return typed errors instead
// - tokio::sync::watch: a single value many tasks can observe, used here as
//   the stop flag the Ctrl-C task flips
// =============================================================================

mod cli;       // src/cli.rs - command-line parsing
mod crawl;     // src/crawl/ - visited set, work-list loop, report
mod download;  // src/download.rs - writes one asset to disk
mod error;     // src/error.rs - error types for every stage
mod extract;   // src/extract/ - finds <img> and <a> references in a page
mod fetch;     // src/fetch/ - HTTP GET behind the Fetch trait
mod logging;   // src/logging.rs - tracing subscriber setup

#[cfg(test)]
mod test_support;  // src/test_support.rs - local HTTP server for tests

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use crawl::{AssetOutcome, AssetStatus, CrawlReport, PageOutcome, PageStatus};
use error::CrawlError;
use fetch::HttpFetcher;
use tokio::sync::watch;
use tracing::warn;

const EXIT_CLEAN: i32 = 0;
const EXIT_PARTIAL: i32 = 1;
const EXIT_FATAL: i32 = 2;
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    logging::init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FATAL
        }
    };

    std::process::exit(exit_code);
}

// Runs one invocation
//
// Returns:
//   Ok(code) = the crawl ran; code comes from exit_code(&report)
//   Err = the crawl could not start (bad URL, output dir, HTTP client)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let command = &cli.command;

    let start = crawl::parse_seed(command.start_url())?;
    let fetcher = HttpFetcher::new(command.output().timeout()).map_err(CrawlError::from)?;

    // The crawl checks this flag between pages and between assets
    let (stop, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing the current request and stopping");
            let _ = stop.send(true);
        }
    });

    let mut options = command.crawl_options();
    options.stop = Some(stop_rx);

    let report = match command {
        Commands::Site { .. } => crawl::crawl_site(&fetcher, &start, options).await?,
        Commands::Page { .. } => crawl::harvest_page(&fetcher, &start, options).await?,
    };

    print_report(&report, command.output().json)?;

    Ok(exit_code(&report))
}

// Maps a finished (or interrupted) crawl to the process exit code
fn exit_code(report: &CrawlReport) -> i32 {
    if report.interrupted {
        EXIT_INTERRUPTED
    } else if report.is_clean() {
        EXIT_CLEAN
    } else {
        EXIT_PARTIAL
    }
}

fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &CrawlReport) {
    println!("{:<60} {:<12} {:<30}", "ASSET", "STATUS", "DETAIL");
    println!("{}", "=".repeat(102));

    for asset in &report.assets {
        let (status, detail) = asset_row(asset);
        println!("{:<60} {:<12} {:<30}", truncate(&asset.url, 57), status, detail);
    }

    let failed_pages: Vec<_> = report.pages.iter().filter_map(page_failure).collect();

    if !failed_pages.is_empty() {
        println!();
        println!("Pages that could not be fetched:");
        for (url, error) in &failed_pages {
            println!("   {} ({})", truncate(url, 57), error);
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Pages crawled: {}", report.pages_fetched());
    println!("   ⚠️  Pages failed: {}", failed_pages.len());
    println!("   ✅ Assets saved: {}", report.assets_saved());
    println!("   ❌ Assets failed: {}", report.assets.len() - report.assets_saved());
    println!("   ⏭️  References skipped: {}", report.skipped.len());
    println!("   📁 Output directory: {}", report.output_dir.display());
    if report.truncated {
        println!("   ✂️  Stopped at the page limit");
    }
    if report.interrupted {
        println!("   🛑 Interrupted before the crawl finished");
    }
}

// Status column and detail column for one asset
fn asset_row(asset: &AssetOutcome) -> (&'static str, String) {
    match &asset.status {
        AssetStatus::Saved { path, bytes } => {
            ("✅ SAVED", format!("{} ({} bytes)", path.display(), bytes))
        }
        AssetStatus::Failed { error } => ("❌ FAILED", error.clone()),
    }
}

// (url, error) for a page that could not be fetched, None otherwise
fn page_failure(page: &PageOutcome) -> Option<(&str, &str)> {
    match &page.status {
        PageStatus::Failed { error } => Some((page.url.as_str(), error.as_str())),
        PageStatus::Fetched { .. } => None,
    }
}

// Shortens long URLs for the table, on a char boundary
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
