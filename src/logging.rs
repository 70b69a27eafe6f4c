//! Tracing subscriber setup for the command-line tools.

use tracing_subscriber::fmt;

use crate::cli::LogLevel;
use crate::foundation::error::{TopoError, TopoResult};

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV: &str = "TOPOFRAMES_LOG";

/// Install a stderr `fmt` subscriber.
///
/// The level is `--log-level` when given, else `TOPOFRAMES_LOG` (any name or number
/// `tracing::Level` parses), else `info`.
pub fn init_logging(flag: Option<LogLevel>) -> TopoResult<()> {
    let level = max_level(flag, std::env::var(LOG_ENV).ok().as_deref());
    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| TopoError::Other(anyhow::anyhow!("install log subscriber: {e}")))
}

fn max_level(flag: Option<LogLevel>, env: Option<&str>) -> tracing::Level {
    flag.map(tracing::Level::from)
        .or_else(|| env.and_then(|v| v.trim().parse().ok()))
        .unwrap_or(tracing::Level::INFO)
}

#[cfg(test)]
#[path = "../tests/unit/logging.rs"]
mod tests;
