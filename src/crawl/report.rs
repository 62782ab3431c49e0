// src/crawl/report.rs
// =============================================================================
// The crawl report: one entry per page fetch attempt, one per asset download
// attempt, and one per reference that could not be followed.
//
// Failures are data here, not log lines, so callers (and tests) can inspect
// exactly what happened. The report serializes to JSON for --json output.
// =============================================================================

use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageStatus {
    /// Page was fetched and scanned
    Fetched { assets: usize, links: usize },
    /// Page could not be fetched; nothing below it was followed
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct PageOutcome {
    pub url: String,
    pub depth: usize,
    #[serde(flatten)]
    pub status: PageStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssetStatus {
    Saved { path: PathBuf, bytes: usize },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetOutcome {
    pub url: String,
    /// Page the asset was first found on
    pub page: String,
    #[serde(flatten)]
    pub status: AssetStatus,
}

impl AssetOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self.status, AssetStatus::Saved { .. })
    }
}

/// A reference that was found but could not be followed or downloaded
#[derive(Debug, Clone, Serialize)]
pub struct SkippedReference {
    pub page: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    pub output_dir: PathBuf,
    pub pages: Vec<PageOutcome>,
    pub assets: Vec<AssetOutcome>,
    pub skipped: Vec<SkippedReference>,
    /// True when --max-pages stopped the crawl with pages still queued
    pub truncated: bool,
    /// True when the stop signal ended the crawl early
    pub interrupted: bool,
}

impl CrawlReport {
    pub fn new(seed: &str, output_dir: PathBuf) -> Self {
        Self {
            seed: seed.to_string(),
            output_dir,
            pages: Vec::new(),
            assets: Vec::new(),
            skipped: Vec::new(),
            truncated: false,
            interrupted: false,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| matches!(p.status, PageStatus::Fetched { .. }))
            .count()
    }

    pub fn assets_saved(&self) -> usize {
        self.assets.iter().filter(|a| a.is_saved()).count()
    }

    /// Failed page fetches plus failed downloads
    pub fn failures(&self) -> usize {
        (self.pages.len() - self.pages_fetched()) + (self.assets.len() - self.assets_saved())
    }

    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }

    /// URLs of every page attempt, in visit order
    #[cfg(test)]
    pub fn page_urls(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.url.as_str()).collect()
    }
}
