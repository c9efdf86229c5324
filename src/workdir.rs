// src/workdir.rs

//! Per-run work directory lifecycle.
//!
//! Each run gets a uniquely named private directory under `$TMPDIR` (or
//! `/tmp`), with three locations carved out inside it: a `run/` subdirectory
//! that becomes the child's working directory and the two capture files for
//! the child's standard streams. The directory is removed exactly once, on
//! whichever path ends the run first; an early explicit [`WorkDir::cleanup`]
//! makes the implicit drop-time removal a no-op.

use std::fs::DirBuilder;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::errors::{Result, TrialrunError};

const PREFIX: &str = "trialrun.";
const FALLBACK_BASE: &str = "/tmp";

const RUN_SUBDIR: &str = "run";
const STDOUT_FILE: &str = "stdout.txt";
const STDERR_FILE: &str = "stderr.txt";

/// Paths of the per-run locations inside a work directory.
#[derive(Debug, Clone)]
pub struct RunLayout {
    /// The child's working directory.
    pub run_dir: PathBuf,
    /// Capture file for the child's stdout.
    pub stdout_path: PathBuf,
    /// Capture file for the child's stderr.
    pub stderr_path: PathBuf,
}

/// Owning handle for one run's work directory.
#[derive(Debug)]
pub struct WorkDir {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl WorkDir {
    /// Create a work directory under `$TMPDIR`, or `/tmp` when unset.
    pub fn create() -> Result<Self> {
        let base = std::env::var_os("TMPDIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(FALLBACK_BASE));
        Self::create_in(&base)
    }

    /// Create a work directory with a random unique suffix under `base`.
    pub fn create_in(base: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir_in(base)
            .map_err(|err| {
                TrialrunError::Workdir(format!(
                    "cannot create work directory under {}: {err}",
                    base.display()
                ))
            })?;
        let path = dir.path().to_path_buf();
        debug!(path = %path.display(), "created work directory");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the `run/` subdirectory and return the per-run paths.
    ///
    /// The capture files themselves come into existence when the executor
    /// redirects the child's streams to them.
    pub fn layout(&self) -> Result<RunLayout> {
        let run_dir = self.path.join(RUN_SUBDIR);
        DirBuilder::new()
            .mode(0o755)
            .create(&run_dir)
            .map_err(|err| {
                TrialrunError::Workdir(format!(
                    "cannot create run directory {}: {err}",
                    run_dir.display()
                ))
            })?;
        Ok(RunLayout {
            run_dir,
            stdout_path: self.path.join(STDOUT_FILE),
            stderr_path: self.path.join(STDERR_FILE),
        })
    }

    /// Remove the directory and its contents now.
    ///
    /// Idempotent: once this has run (successfully or not), later calls and
    /// the drop-time removal do nothing.
    pub fn cleanup(&mut self) -> Result<()> {
        match self.dir.take() {
            Some(dir) => {
                debug!(path = %self.path.display(), "removing work directory");
                dir.close().map_err(|err| {
                    TrialrunError::Workdir(format!(
                        "cannot remove work directory {}: {err}",
                        self.path.display()
                    ))
                })
            }
            None => Ok(()),
        }
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(err) = dir.close() {
                warn!(path = %self.path.display(), error = %err, "best-effort work directory removal failed");
            }
        }
    }
}
