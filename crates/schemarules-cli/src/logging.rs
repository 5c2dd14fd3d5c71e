//! Tracing subscriber setup for the CLI.
//!
//! Diagnostics go to stderr so stdout only ever carries the rendered rules.
//! `RUST_LOG` takes precedence over the level implied by the flags.

use std::io;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default level for the CLI's own crates.
pub fn default_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_ascii_lowercase();
        EnvFilter::new(format!(
            "warn,schemarules_core={level},schemarules_cli={level},schemarules={level}"
        ))
    })
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging(verbose: bool) {
    let layer = fmt::layer()
        .compact()
        .without_time()
        .with_target(verbose)
        .with_writer(io::stderr);

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(default_level(verbose)))
        .with(layer)
        .try_init();
}
