// src/config/loader.rs

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::config::model::{ConfigFile, RunnerConfig};
use crate::errors::{Result, TrialrunError};

/// Load a configuration file from a given path and return the raw
/// `ConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_config`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|err| {
        TrialrunError::Config(format!("cannot read {}: {err}", path.display()))
    })?;

    let config: ConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load the runner configuration, applying defaults and validation.
///
/// This is the entry point the binary uses:
///
/// - `None` means "no file given": the built-in defaults apply.
/// - Reads TOML, applies defaults (handled by `serde` + `Default` impls).
/// - Checks basic sanity (the timeout must be at least one second).
pub fn load_config(path: Option<&Path>) -> Result<RunnerConfig> {
    let file = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration file");
            load_from_path(path)?
        }
        None => ConfigFile::default(),
    };

    validate(&file)?;

    Ok(RunnerConfig {
        timeout: Duration::from_secs(file.runner.timeout_secs),
    })
}

fn validate(file: &ConfigFile) -> Result<()> {
    if file.runner.timeout_secs == 0 {
        return Err(TrialrunError::Config(
            "[runner].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
