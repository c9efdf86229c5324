// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrialrunError {
    /// Operator-requested cancellation, carrying the signal number that
    /// triggered it. The only error the public run entry point can return.
    #[error("Interrupted by signal {0}")]
    Interrupted(i32),

    /// Work-directory creation or removal failure.
    #[error("{0}")]
    Workdir(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected OS-level failure in the spawn/wait machinery.
    #[error("System error: {0}")]
    System(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TrialrunError>;
