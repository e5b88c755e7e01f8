//! Diagnostic logging to standard error.
//!
//! Standard output carries only the `KEY=value` lines, so every log event is
//! written to standard error. Without `--debug` only warnings and errors are
//! shown; with it, this crate's raw responses and internal state are echoed
//! too. Dependencies (the AWS SDK) stay at warn either way.

use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

/// Log target of this crate and its binary.
const CRATE_TARGET: &str = "secrets_to_env";

/// Level for this crate's own events.
pub fn level(debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Per-target filter for a run.
pub fn filter(debug: bool) -> Targets {
    Targets::new()
        .with_target(CRATE_TARGET, level(debug))
        .with_default(Level::WARN)
}

/// Installs the global subscriber.
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_logging(debug: bool) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .with(filter(debug))
        .try_init();
}
