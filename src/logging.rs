//! Tracing subscriber setup for the binary.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directive used when neither `--verbose` nor `RUST_LOG` is given
pub const DEFAULT_FILTER: &str = "futebol_app=info,futebol=info";

/// Pick the filter: `--verbose` wins, then `RUST_LOG`, then the default.
pub fn build_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(build_filter(verbose))
        .try_init();
}
