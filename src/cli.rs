// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
//   site-harvester site https://example.com --output-dir images
//   site-harvester page https://example.com/gallery.html --json
// =============================================================================

use crate::crawl::{CrawlOptions, DEFAULT_OUTPUT_DIR};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "site-harvester",
    version,
    about = "Crawl a website and download every image it embeds",
    long_about = "site-harvester walks a website depth-first from a seed URL, following links \
                  and saving every <img> it finds into a local directory. Failed pages and \
                  downloads are reported and skipped; the crawl keeps going."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a site from a seed URL, following links recursively
    ///
    /// Example: site-harvester site https://example.com --max-depth 3
    Site {
        /// URL of the first page to crawl
        seed_url: String,

        #[command(flatten)]
        output: OutputArgs,

        /// Do not follow links found on pages this many hops from the seed
        /// (0 = seed page only). Unbounded when omitted.
        #[arg(long)]
        max_depth: Option<usize>,

        /// Stop after fetching this many pages. Unbounded when omitted.
        #[arg(long)]
        max_pages: Option<usize>,

        /// Only follow links on the seed URL's host
        #[arg(long)]
        same_host: bool,
    },

    /// Download the images of a single page without following links
    ///
    /// Example: site-harvester page https://example.com/gallery.html
    Page {
        /// URL of the page to harvest
        page_url: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Flags shared by both subcommands
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Directory the images are saved into (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Print the crawl report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

impl OutputArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Commands {
    pub fn output(&self) -> &OutputArgs {
        match self {
            Commands::Site { output, .. } | Commands::Page { output, .. } => output,
        }
    }

    /// The URL the run starts from
    pub fn start_url(&self) -> &str {
        match self {
            Commands::Site { seed_url, .. } => seed_url,
            Commands::Page { page_url, .. } => page_url,
        }
    }

    /// Crawl options for this invocation
    pub fn crawl_options(&self) -> CrawlOptions {
        let output_dir = self.output().output_dir.clone();
        match self {
            Commands::Site {
                max_depth,
                max_pages,
                same_host,
                ..
            } => CrawlOptions {
                output_dir,
                follow_links: true,
                max_depth: *max_depth,
                max_pages: *max_pages,
                same_host: *same_host,
                stop: None,
            },
            Commands::Page { .. } => CrawlOptions {
                follow_links: false,
                ..CrawlOptions::new(output_dir)
            },
        }
    }
}
