// src/crawl/options.rs
// =============================================================================
// Knobs for a single crawl.
//
// The defaults reproduce the plain recursive image crawl: follow every link,
// any host, no depth or page limit, save into ./images. The limits exist so a
// caller can wrap an unbounded crawl in a policy of its own.
// =============================================================================

use std::path::PathBuf;
use tokio::sync::watch;

pub const DEFAULT_OUTPUT_DIR: &str = "images";

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Directory every asset is written into (created before the first fetch)
    pub output_dir: PathBuf,
    /// Follow <a href> links at all; false means "this page only"
    pub follow_links: bool,
    /// Links found on a page at this depth are not followed (seed is depth 0)
    pub max_depth: Option<usize>,
    /// Stop after this many page fetch attempts
    pub max_pages: Option<usize>,
    /// Only follow links whose host matches the seed's host
    pub same_host: bool,
    /// Flips to true when the crawl should wind down (Ctrl-C in the binary)
    pub stop: Option<watch::Receiver<bool>>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            follow_links: true,
            max_depth: None,
            max_pages: None,
            same_host: false,
            stop: None,
        }
    }
}

impl CrawlOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Whether links found on a page at `depth` should be queued
    pub fn follows_from(&self, depth: usize) -> bool {
        self.follow_links && self.max_depth.map_or(true, |max| depth < max)
    }

    /// Whether the stop signal has fired
    pub fn stop_requested(&self) -> bool {
        self.stop.as_ref().map_or(false, |stop| *stop.borrow())
    }

    /// Whether `attempted` page fetches already used up the page budget
    pub fn page_budget_spent(&self, attempted: usize) -> bool {
        self.max_pages.map_or(false, |max| attempted >= max)
    }
}
