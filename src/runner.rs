// src/runner.rs

//! Orchestration of one test-case run.
//!
//! [`run_test_case`] sequences signal programming, work-directory lifecycle,
//! supervised execution and classification around a single invocation, with
//! interrupt checkpoints between the steps. The signal guard is installed
//! before the work directory exists and restored only after the directory is
//! gone, so an interrupt at any point of the run is observed and converted at
//! a checkpoint instead of being dropped.
//!
//! [`TestCase::run`] wraps that sequence in the public contract: it never
//! fails except with `Interrupted`; any other error becomes a `Broken`
//! result.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::RunnerConfig;
use crate::errors::{Result, TrialrunError};
use crate::exec::{isolated_command, spawn_and_wait};
use crate::interrupt::{self, SignalGuard};
use crate::verdict::{TestResult, apply_cleanup_failure, classify};
use crate::workdir::WorkDir;

/// A single executable test case.
///
/// The program path points at the binary to run; the name only feeds logging
/// and result attribution.
#[derive(Debug, Clone)]
pub struct TestCase {
    program: PathBuf,
    name: String,
}

impl TestCase {
    pub fn new(program: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            name: name.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier used in logs and diagnostics.
    pub fn identifier(&self) -> String {
        format!("{}:{}", self.program.display(), self.name)
    }

    /// Run this test case to completion (or interruption).
    ///
    /// Never fails with anything but [`TrialrunError::Interrupted`]: every
    /// other error is converted into a `Broken` result. Cancellation is
    /// re-raised after best-effort cleanup and is never turned into a result.
    pub async fn run(&self, config: &RunnerConfig) -> Result<TestResult> {
        info!(
            test_case = %self.identifier(),
            timeout_secs = config.timeout.as_secs(),
            "running test case"
        );
        match run_test_case(self, config).await {
            Ok(result) => {
                info!(test_case = %self.identifier(), result = %result, "test case finished");
                Ok(result)
            }
            Err(TrialrunError::Interrupted(signo)) => {
                info!(test_case = %self.identifier(), signo, "test case interrupted");
                Err(TrialrunError::Interrupted(signo))
            }
            Err(err) => {
                warn!(test_case = %self.identifier(), error = %err, "runtime error during test case");
                Ok(TestResult::Broken(format!(
                    "The test caused an error in the runtime system: {err}"
                )))
            }
        }
    }
}

/// Run one test case with full cleanup discipline.
///
/// Interrupts and unexpected errors escape as `Err`; the work directory is
/// removed on every path before the signal guard is restored.
pub async fn run_test_case(test_case: &TestCase, config: &RunnerConfig) -> Result<TestResult> {
    // Guard first, directory second: their reverse drop order keeps handlers
    // armed until the directory is gone.
    let _signals = SignalGuard::install()?;
    let mut workdir = WorkDir::create()?;

    let run = run_in_workdir(test_case, config, &workdir).await;
    match run {
        Ok(result) => finish_run(result, &mut workdir),
        Err(err) => {
            // Interrupted or a hard failure: the directory still has to go,
            // best effort, without masking the original error.
            if let Err(cleanup_err) = workdir.cleanup() {
                warn!(error = %cleanup_err, "work directory cleanup failed during error handling");
            }
            Err(err)
        }
    }
}

async fn run_in_workdir(
    test_case: &TestCase,
    config: &RunnerConfig,
    workdir: &WorkDir,
) -> Result<TestResult> {
    let layout = workdir.layout()?;
    interrupt::check_interrupt()?;

    let program = std::path::absolute(test_case.program())?;
    debug!(
        test_case = %test_case.identifier(),
        program = %program.display(),
        run_dir = %layout.run_dir.display(),
        "spawning test program"
    );
    let command = isolated_command(&program, &layout.run_dir);
    let outcome = spawn_and_wait(
        command,
        &layout.stdout_path,
        &layout.stderr_path,
        config.timeout,
    )
    .await?;

    interrupt::check_interrupt()?;
    Ok(classify(&outcome))
}

/// Explicit cleanup and the final checkpoint.
///
/// A cleanup failure downgrades only a good result; a signal that arrived
/// while cleaning up still interrupts the run (the directory is already gone
/// by then, and removal is idempotent for the error path above).
fn finish_run(result: TestResult, workdir: &mut WorkDir) -> Result<TestResult> {
    let result = match workdir.cleanup() {
        Ok(()) => result,
        Err(err) => {
            if !result.good() {
                warn!(error = %err, "not reporting cleanup failure; keeping the test's own result");
            }
            apply_cleanup_failure(result, &err)
        }
    };
    interrupt::check_interrupt()?;
    Ok(result)
}
