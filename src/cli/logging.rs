//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! Logs always go to stderr so `--format json` output on stdout stays
//! machine-readable. The filter comes from, in order: `RUST_LOG`, the
//! `--verbose` flag (debug), the configured `log.level`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Picks the filter directive for this run
pub fn filter_directive(verbose: bool, configured: &str) -> String {
    if verbose {
        "debug".to_string()
    } else {
        configured.to_string()
    }
}

/// Installs the global subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool, configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(verbose, configured)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time();

    // A second init (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
