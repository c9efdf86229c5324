// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `trialrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "trialrun",
    version,
    about = "Run one executable test case in an isolated, supervised child process.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the test program to execute.
    #[arg(value_name = "PROGRAM")]
    pub program: PathBuf,

    /// Test case name, used for logging and result attribution only.
    #[arg(long, value_name = "NAME", default_value = "main")]
    pub name: String,

    /// Path to an optional runner configuration file (TOML).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Wall-clock timeout for the test body, in seconds.
    ///
    /// Overrides `[runner].timeout_secs` from the configuration file.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TRIALRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
