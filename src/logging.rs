// src/logging.rs
// =============================================================================
// Logging setup.
//
// Every diagnostic goes through `tracing`: one "Downloaded: <url>" line per
// saved asset, a warning per failed page or download, debug lines for skipped
// references. Logs go to stderr so that --json output on stdout stays clean.
//
// RUST_LOG overrides the default filter, e.g. RUST_LOG=debug.
// =============================================================================

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. Call once, at the top of main.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
