// src/crawl/mod.rs
// =============================================================================
// This module runs a crawl from a seed URL.
//
// Entry points:
// - crawl_site: follow links depth-first, download every image found
// - harvest_page: download the images of one page, follow nothing
//
// Both create the output directory first. That is the only step allowed to
// fail the whole run; everything after it is best-effort and ends up in the
// CrawlReport.
//
// Rust concepts:
// - &dyn Fetch: a trait object, so the same crawl code runs against reqwest
//   in the binary and against an in-memory site in tests
// - Struct update syntax (..options): copy every field except the ones named
// =============================================================================

mod options;   // src/crawl/options.rs - limits, output dir, stop signal
mod report;    // src/crawl/report.rs - per-page / per-asset outcomes
mod session;   // src/crawl/session.rs - visited set and the work-list loop

pub use options::{CrawlOptions, DEFAULT_OUTPUT_DIR};
pub use report::{AssetOutcome, AssetStatus, CrawlReport, PageOutcome, PageStatus};
pub use session::CrawlSession;

use crate::error::CrawlError;
use crate::fetch::Fetch;
use std::path::Path;
use tracing::info;
use url::Url;

// Parses the user-supplied seed. Only http(s) URLs can be crawled.
//
// Example:
//   " https://example.com/a#intro " -> https://example.com/a
//   "example.com"                  -> InvalidSeed (no scheme)
pub fn parse_seed(raw: &str) -> Result<Url, CrawlError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| CrawlError::InvalidSeed {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(CrawlError::InvalidSeed {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    url.set_fragment(None);
    Ok(url)
}

/// Creates the output directory (and parents) if needed.
pub async fn prepare_output_dir(dir: &Path) -> Result<(), CrawlError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| CrawlError::OutputDir {
            path: dir.to_path_buf(),
            source,
        })
}

// Crawls everything reachable from `seed`
//
// Parameters:
//   fetcher: where pages and assets come from
//   seed: the first page
//   options: output directory, limits, stop signal
//
// Returns: the CrawlReport, or CrawlError if the output directory could not
// be created (in which case nothing was fetched)
pub async fn crawl_site(
    fetcher: &dyn Fetch,
    seed: &Url,
    options: CrawlOptions,
) -> Result<CrawlReport, CrawlError> {
    prepare_output_dir(&options.output_dir).await?;
    info!(
        "Saving assets from {} into {}",
        seed,
        options.output_dir.display()
    );

    let session = CrawlSession::new(fetcher, seed, options);
    Ok(session.run(seed.clone()).await)
}

/// Downloads the assets of a single page without following its links.
pub async fn harvest_page(
    fetcher: &dyn Fetch,
    page: &Url,
    options: CrawlOptions,
) -> Result<CrawlReport, CrawlError> {
    let options = CrawlOptions {
        follow_links: false,
        ..options
    };
    crawl_site(fetcher, page, options).await
}
