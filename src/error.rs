// src/error.rs
// =============================================================================
// Error types for every stage of a crawl.
//
// Only CrawlError is fatal, and it is raised before the first request goes
// out. Everything else is recorded per item in the CrawlReport and the crawl
// moves on.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// A page or asset could not be retrieved.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout, body read)
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// Builds a transport error from a reqwest failure, with a short reason
    pub fn transport(url: &str, error: &reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            "request timed out".to_string()
        } else if error.is_connect() {
            format!("connection failed ({})", error)
        } else if error.is_redirect() {
            "too many redirects".to_string()
        } else {
            error.to_string()
        };

        FetchError::Transport {
            url: url.to_string(),
            message,
        }
    }
}

/// A reference found in a page that cannot be turned into a crawlable URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("cannot resolve '{reference}': {reason}")]
    Unresolvable { reference: String, reason: String },

    #[error("unsupported scheme in {url}")]
    UnsupportedScheme { url: String },
}

/// An asset could not be saved.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The asset URL has no last path segment to name the file after
    #[error("no file name in {url}")]
    NoFileName { url: String },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Conditions that stop a crawl before it starts.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
