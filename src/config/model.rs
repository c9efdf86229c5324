// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [runner]
/// timeout_secs = 60
/// ```
///
/// The section and every field are optional and default to the built-in
/// values, so an empty file is a valid configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// Runner behaviour from `[runner]`.
    #[serde(default)]
    pub runner: RunnerSection,
}

/// `[runner]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerSection {
    /// Wall-clock limit for one test body, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Validated runtime configuration handed to the run entry point.
///
/// The execution core reads only the timeout from it; everything else about a
/// run is fixed by the core itself.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(default_timeout_secs()),
        }
    }
}
