//! Tracing setup for the `tour` binary.
//!
//! Logs go to stderr so that demo output on stdout stays untouched. The
//! default filter is `warn`; set `RUST_LOG` (e.g. `RUST_LOG=feature_tour=debug`)
//! to see dispatch and request logs.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
