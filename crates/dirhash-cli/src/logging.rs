//! Tracing subscriber setup

use std::io;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset
#[must_use]
pub fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}

/// Install the global subscriber, logging to stderr
///
/// `-v` forces debug output; otherwise `RUST_LOG` wins when set.
pub fn setup_logging(verbose: bool) {
    let filter = if verbose {
        default_filter(true)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(false))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}
