// src/extract/mod.rs
// =============================================================================
// The Extractor: finds asset references (<img src>) and link references
// (<a href>) in a fetched page and resolves them against the page URL.
//
// Submodules:
// - html: parses a page once and walks it with CSS selectors
// - resolve: relative -> absolute resolution and query stripping
// =============================================================================

mod html;
mod resolve;

pub use html::PageDocument;
pub use resolve::strip_query;
