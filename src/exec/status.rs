// src/exec/status.rs

//! Raw child-termination observations.

use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// Exit code reserved for "could not exec the test binary".
///
/// A test program exiting with this exact code of its own accord is
/// indistinguishable from an exec failure and reported the same way.
pub const EXEC_FAILURE_CODE: i32 = 120;

/// How the child terminated, as reported by the wait primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationStatus {
    Exited(i32),
    Signaled { signal: i32, core_dumped: bool },
    Unknown,
}

impl From<ExitStatus> for TerminationStatus {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            TerminationStatus::Exited(code)
        } else if let Some(signal) = status.signal() {
            TerminationStatus::Signaled {
                signal,
                core_dumped: status.core_dumped(),
            }
        } else {
            TerminationStatus::Unknown
        }
    }
}

impl fmt::Display for TerminationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationStatus::Exited(code) => write!(f, "Exited with code {code}"),
            TerminationStatus::Signaled {
                signal,
                core_dumped,
            } => {
                write!(f, "Received signal {signal}")?;
                if *core_dumped {
                    write!(f, " (core dumped)")?;
                }
                Ok(())
            }
            TerminationStatus::Unknown => write!(f, "Terminated in an unknown manner"),
        }
    }
}

/// What the supervised wait produced.
///
/// `TimedOut` and `ExecFailed` carry no status: in the first case the child
/// was killed without reporting one, in the second there never was a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Completed(TerminationStatus),
    TimedOut,
    ExecFailed,
}
