//! Log file setup.
//!
//! The terminal belongs to the UI, so events go to
//! `$INDYFY_HOME/logs/indyfy.log` through a non-blocking writer. The filter
//! comes from `INDYFY_LOG` and defaults to `info`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "INDYFY_LOG";

pub const LOG_FILE: &str = "indyfy.log";

/// Builds the filter from `INDYFY_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to `dir/indyfy.log`.
///
/// Keep the returned guard alive for the lifetime of the program; dropping
/// it flushes pending events.
pub fn init(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        // A subscriber is already installed (tests, embedding).
        tracing::warn!(error = %e, "tracing init failed");
    }

    Ok(guard)
}
