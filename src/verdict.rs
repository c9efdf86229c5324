// src/verdict.rs

//! Test results and outcome classification.

use std::fmt;

use crate::errors::TrialrunError;
use crate::exec::{EXEC_FAILURE_CODE, TerminationStatus, WaitOutcome};

/// The verdict for one test-case run.
///
/// `Passed` and `Failed` are the test's own verdict, derived from its exit
/// code. `Broken` means the infrastructure failed the test: it could not be
/// executed, crashed, timed out, or its work directory could not be cleaned
/// up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Failed(String),
    Broken(String),
}

impl TestResult {
    /// Whether the result reports a successful run.
    pub fn good(&self) -> bool {
        matches!(self, TestResult::Passed)
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Passed => write!(f, "passed"),
            TestResult::Failed(reason) => write!(f, "failed: {reason}"),
            TestResult::Broken(reason) => write!(f, "broken: {reason}"),
        }
    }
}

/// Map a wait outcome to a result. Total over the outcome space.
pub fn classify(outcome: &WaitOutcome) -> TestResult {
    match outcome {
        WaitOutcome::TimedOut => TestResult::Broken("Test case timed out".to_string()),
        WaitOutcome::ExecFailed => {
            TestResult::Broken("Failed to execute test program".to_string())
        }
        WaitOutcome::Completed(status) => classify_status(*status),
    }
}

fn classify_status(status: TerminationStatus) -> TestResult {
    match status {
        TerminationStatus::Exited(0) => TestResult::Passed,
        // The reserved code is claimed before the generic non-zero arm; a
        // test that exits 120 of its own accord reads as an exec failure.
        TerminationStatus::Exited(EXEC_FAILURE_CODE) => {
            TestResult::Broken("Failed to execute test program".to_string())
        }
        TerminationStatus::Exited(_) => TestResult::Failed(status.to_string()),
        TerminationStatus::Signaled { .. } | TerminationStatus::Unknown => {
            TestResult::Broken(status.to_string())
        }
    }
}

/// Cleanup-failure policy: a good result is downgraded to `Broken` carrying
/// the cleanup error, while a test that already failed keeps its original
/// result so the cleanup problem cannot mask it.
pub fn apply_cleanup_failure(result: TestResult, err: &TrialrunError) -> TestResult {
    if result.good() {
        TestResult::Broken(format!("Could not clean up test work directory: {err}"))
    } else {
        result
    }
}
