//! Logging setup for the hoist CLI.
//!
//! Structured logging through the `tracing` ecosystem. Verbosity order:
//! `--verbose` wins, then `--quiet`, then `RUST_LOG`, then info level for
//! the hoist crates.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("hoist_cli=debug,hoist_build=debug,hoist_config=debug")
    } else if quiet {
        EnvFilter::new("hoist_cli=error,hoist_build=error,hoist_config=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("hoist_cli=info,hoist_build=info,hoist_config=info")
        })
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
