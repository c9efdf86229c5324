// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Level precedence: the `--log-level` flag, then the `TRIALRUN_LOG`
//! environment variable, then info. Logs go to stderr; stdout carries only
//! the result line.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

const ENV_VAR: &str = "TRIALRUN_LOG";

/// Initialise the global logging subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = cli_level.map(LogLevel::as_level).unwrap_or_else(level_from_env);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn level_from_env() -> Level {
    std::env::var(ENV_VAR)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(Level::INFO)
}
