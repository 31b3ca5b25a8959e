//! Tracing setup for the `nutrinova` binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter for the interactive dashboard; `RUST_LOG` overrides it.
pub const DEFAULT_LEVEL: &str = "warn";

pub fn init(verbose: bool) {
    init_with_level(if verbose { "debug" } else { DEFAULT_LEVEL })
}

/// Installs a compact stderr subscriber so log lines never mix with
/// dashboard output on stdout.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
