// src/fetch/mod.rs
// =============================================================================
// The Fetcher: retrieves pages (as text) and assets (as bytes) over HTTP.
//
// The crawl code never talks to reqwest directly. It goes through the Fetch
// trait, so the traversal can be driven by an in-memory site in tests and by
// HttpFetcher in the real binary.
// =============================================================================

mod http;

use crate::error::FetchError;
use futures::future::BoxFuture;
use url::Url;

pub use http::HttpFetcher;

/// Something that can GET a URL.
///
/// Both methods return boxed futures so the trait stays object-safe and can
/// be passed around as `&dyn Fetch`.
pub trait Fetch: Send + Sync {
    /// Fetches a page and returns its body decoded as text
    fn fetch_page<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<String, FetchError>>;

    /// Fetches an asset and returns its raw bytes
    fn fetch_bytes<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<Vec<u8>, FetchError>>;
}
