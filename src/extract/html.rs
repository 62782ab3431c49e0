// src/extract/html.rs
// =============================================================================
// Parses a page with `scraper` and yields its references in document order.
//
// html5ever never rejects input: malformed markup is repaired the way a
// browser would, and markup it cannot make sense of simply yields no matching
// elements. That is how "unparseable page" turns into "no references".
//
// Rust concepts:
// - impl Iterator<Item = ...> + '_: a lazy iterator that borrows the parsed
//   document, so nothing is collected until the caller asks for it
// - Closures with `move`: they copy in the references they need so the
//   iterator can outlive the method call that built it
// =============================================================================

use super::resolve::resolve_reference;
use crate::error::ExtractError;
use scraper::{Html, Selector};
use url::Url;

const ASSET_SELECTOR: &str = "img[src]";
const LINK_SELECTOR: &str = "a[href]";

/// A parsed page plus the URL it was fetched from.
///
/// Example:
///   html = `<img src="../i.png"><a href="/q">Q</a>`
///   page_url = https://x.test/a/b.html
///   assets() -> [https://x.test/i.png]
///   links()  -> [https://x.test/q]
pub struct PageDocument {
    document: Html,
    base: Url,
    assets: Selector,
    links: Selector,
}

impl PageDocument {
    pub fn parse(html: &str, page_url: &Url) -> Self {
        // Constant selectors; a parse failure here is a programming error
        let assets = Selector::parse(ASSET_SELECTOR).expect("asset selector is valid");
        let links = Selector::parse(LINK_SELECTOR).expect("link selector is valid");

        Self {
            document: Html::parse_document(html),
            base: page_url.clone(),
            assets,
            links,
        }
    }

    /// `<img src>` references, resolved, in document order
    pub fn assets(&self) -> impl Iterator<Item = Result<Url, ExtractError>> + '_ {
        self.references(&self.assets, "src")
    }

    /// `<a href>` references, resolved, in document order
    pub fn links(&self) -> impl Iterator<Item = Result<Url, ExtractError>> + '_ {
        self.references(&self.links, "href")
    }

    // Shared walk for both reference kinds
    //
    // Parameters:
    //   selector: which elements to visit
    //   attr: which attribute holds the reference ("src" or "href")
    //
    // Returns: one Result per non-empty attribute, in document order
    fn references<'a>(
        &'a self,
        selector: &'a Selector,
        attr: &'static str,
    ) -> impl Iterator<Item = Result<Url, ExtractError>> + 'a {
        self.document
            .select(selector)
            .filter_map(move |element| element.value().attr(attr))
            .filter(|raw| !raw.trim().is_empty())
            .map(move |raw| resolve_reference(&self.base, raw))
    }
}
