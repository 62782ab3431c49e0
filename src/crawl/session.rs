// src/crawl/session.rs
// =============================================================================
// The Traverser: a depth-first walk over a site's link graph.
//
// How it works:
// 1. Pop a page off the work stack
// 2. Mark it visited; if it already was, drop it
// 3. Fetch it; on failure record the error and move on
// 4. Download every new asset on the page (failures are recorded, not fatal)
// 5. Push its unvisited links in reverse, so the first link is popped first
//
// The stop signal in CrawlOptions is checked before every page and every
// asset. When it fires, the loop ends and the report so far is returned with
// `interrupted` set.
//
// Pushing in reverse and checking "visited" at pop time visits pages in the
// same order as a recursive walk would, without growing the call stack.
//
// Rust concepts:
// - HashSet::insert returns false when the value was already present, which
//   makes "check and mark" a single step
// - The session borrows the fetcher (&dyn Fetch) and owns everything else
// =============================================================================

use super::options::CrawlOptions;
use super::report::{
    AssetOutcome, AssetStatus, CrawlReport, PageOutcome, PageStatus, SkippedReference,
};
use crate::download::download_asset;
use crate::error::ExtractError;
use crate::extract::{strip_query, PageDocument};
use crate::fetch::Fetch;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;

// An entry on the work stack
#[derive(Debug)]
struct Frame {
    url: Url,
    depth: usize,
}

/// State for one crawl. Dropped when the crawl ends; nothing is persisted.
pub struct CrawlSession<'f> {
    fetcher: &'f dyn Fetch,
    options: CrawlOptions,
    visited: HashSet<Url>,
    downloaded: HashSet<Url>,
    report: CrawlReport,
}

impl<'f> CrawlSession<'f> {
    pub fn new(fetcher: &'f dyn Fetch, seed: &Url, options: CrawlOptions) -> Self {
        let report = CrawlReport::new(seed.as_str(), options.output_dir.clone());
        Self {
            fetcher,
            options,
            visited: HashSet::new(),
            downloaded: HashSet::new(),
            report,
        }
    }

    /// Marks `url` visited. Returns false if it already was.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.clone())
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    /// Walks everything reachable from `seed` and returns the report.
    pub async fn run(mut self, seed: Url) -> CrawlReport {
        let seed_host = seed.host_str().map(str::to_owned);
        let mut stack = vec![Frame { url: seed, depth: 0 }];

        while let Some(frame) = stack.pop() {
            if self.options.stop_requested() {
                info!("Stopping, {} page(s) left unvisited", stack.len() + 1);
                self.report.interrupted = true;
                break;
            }

            if !self.mark_visited(&frame.url) {
                continue;
            }

            if self.options.page_budget_spent(self.report.pages.len()) {
                info!(
                    "Page limit reached, {} page(s) left unvisited",
                    stack.len() + 1
                );
                self.report.truncated = true;
                break;
            }

            info!(depth = frame.depth, "Crawling {}", frame.url);

            let html = match self.fetcher.fetch_page(&frame.url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Failed to fetch content from {}: {}", frame.url, e);
                    self.report.pages.push(PageOutcome {
                        url: frame.url.to_string(),
                        depth: frame.depth,
                        status: PageStatus::Failed {
                            error: e.to_string(),
                        },
                    });
                    continue;
                }
            };

            let (assets, links) = self.scan(&frame.url, &html);
            self.report.pages.push(PageOutcome {
                url: frame.url.to_string(),
                depth: frame.depth,
                status: PageStatus::Fetched {
                    assets: assets.len(),
                    links: links.len(),
                },
            });

            for asset in assets {
                if self.options.stop_requested() {
                    self.report.interrupted = true;
                    break;
                }
                self.save_asset(&frame.url, asset).await;
            }

            if self.report.interrupted {
                info!("Stopping after {}", frame.url);
                break;
            }

            if !self.options.follows_from(frame.depth) {
                continue;
            }

            for link in links.into_iter().rev() {
                if self.is_visited(&link) {
                    continue;
                }
                if self.options.same_host && link.host_str() != seed_host.as_deref() {
                    debug!("Not following off-site link {}", link);
                    continue;
                }
                stack.push(Frame {
                    url: link,
                    depth: frame.depth + 1,
                });
            }
        }

        self.report
    }

    // Parses the page and returns (assets, links). Kept synchronous so the
    // parsed document never lives across an await point.
    fn scan(&mut self, page: &Url, html: &str) -> (Vec<Url>, Vec<Url>) {
        let document = PageDocument::parse(html, page);

        let mut assets = Vec::new();
        for reference in document.assets() {
            match reference {
                Ok(url) => assets.push(strip_query(&url)),
                Err(e) => self.skip(page, e),
            }
        }

        let mut links = Vec::new();
        for reference in document.links() {
            match reference {
                Ok(url) => links.push(url),
                Err(e) => self.skip(page, e),
            }
        }

        (assets, links)
    }

    fn skip(&mut self, page: &Url, error: ExtractError) {
        debug!("Skipping reference on {}: {}", page, error);
        self.report.skipped.push(SkippedReference {
            page: page.to_string(),
            reason: error.to_string(),
        });
    }

    async fn save_asset(&mut self, page: &Url, url: Url) {
        // Each distinct asset URL is downloaded once per crawl
        if !self.downloaded.insert(url.clone()) {
            debug!("Already downloaded {}", url);
            return;
        }

        let status = match download_asset(self.fetcher, &url, &self.options.output_dir).await {
            Ok(saved) => {
                info!("Downloaded: {}", url);
                AssetStatus::Saved {
                    path: saved.path,
                    bytes: saved.bytes,
                }
            }
            Err(e) => {
                warn!("Failed to download {}: {}", url, e);
                AssetStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        self.report.assets.push(AssetOutcome {
            url: url.to_string(),
            page: page.to_string(),
            status,
        });
    }
}
