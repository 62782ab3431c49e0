// src/extract/resolve.rs
// =============================================================================
// Turns raw attribute values into absolute, crawlable URLs.
//
// Examples (page = https://x.test/a/b.html):
//   "../img/c.png"        -> https://x.test/img/c.png
//   "/q.html#top"         -> https://x.test/q.html
//   "https://o.test/p"    -> https://o.test/p
//   "mailto:me@x.test"    -> UnsupportedScheme
// =============================================================================

use crate::error::ExtractError;
use url::Url;

/// Resolves `raw` against `base`, keeping only http(s) URLs.
///
/// The fragment is dropped so that `page#top` and `page` are the same entry
/// in the visited set.
pub fn resolve_reference(base: &Url, raw: &str) -> Result<Url, ExtractError> {
    let raw = raw.trim();

    let mut url = base.join(raw).map_err(|e| ExtractError::Unresolvable {
        reference: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ExtractError::UnsupportedScheme {
            url: url.to_string(),
        });
    }

    url.set_fragment(None);
    Ok(url)
}

/// Removes the query string (and any fragment) from an asset URL.
pub fn strip_query(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);
    stripped
}
