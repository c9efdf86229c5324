// src/exec/supervisor.rs

//! Spawn-and-wait supervision for one test child.
//!
//! The wait is bounded by the configured timeout and raced against the
//! interrupt monitor. Both abnormal endings converge on the same discipline:
//! SIGKILL to the child's process group, then a blocking reap, so neither a
//! timeout nor a cancellation can leave a live or unreaped child behind.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::errors::Result;
use crate::exec::status::{TerminationStatus, WaitOutcome};
use crate::interrupt;

/// Run `command` with its standard streams captured to the given files and
/// wait for it, bounded by `timeout`.
///
/// - Normal termination yields `Completed` with the raw status.
/// - A pending interrupt kills and reaps the child, then fails with
///   `Interrupted` via the checkpoint; no status is ever returned on this
///   path.
/// - An expired timeout kills and reaps the child and yields `TimedOut`.
/// - A spawn failure yields `ExecFailed`, with a diagnostic appended to the
///   stderr capture file where a child-side exec diagnostic would have
///   landed.
///
/// Unexpected wait errors are re-raised unchanged.
pub async fn spawn_and_wait(
    mut command: Command,
    stdout_path: &Path,
    stderr_path: &Path,
    timeout: Duration,
) -> Result<WaitOutcome> {
    let stdout_file = File::create(stdout_path)?;
    let stderr_file = File::create(stderr_path)?;
    command.stdout(Stdio::from(stdout_file));
    command.stderr(Stdio::from(stderr_file));

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) => {
            warn!(error = %err, "failed to spawn test program");
            append_exec_diagnostic(stderr_path, &err);
            return Ok(WaitOutcome::ExecFailed);
        }
    };
    let pid = child.id();
    debug!(pid, timeout_secs = timeout.as_secs(), "child spawned; waiting for termination");

    tokio::select! {
        signo = interrupt::wait_for_interrupt() => {
            debug!(pid, signo, "interrupt while waiting for child; killing and reaping");
            kill_and_reap(&mut child).await;
            interrupt::check_interrupt()?;
            unreachable!("interrupt flag cleared while converting it to an error");
        }

        waited = tokio::time::timeout(timeout, child.wait()) => match waited {
            Ok(status) => {
                let status = TerminationStatus::from(status?);
                debug!(pid, %status, "child terminated");
                Ok(WaitOutcome::Completed(status))
            }
            Err(_elapsed) => {
                debug!(pid, "timeout expired; killing and reaping child");
                kill_and_reap(&mut child).await;
                Ok(WaitOutcome::TimedOut)
            }
        },
    }
}

/// Kill the child's whole process group with SIGKILL, then reap it with a
/// blocking wait. ESRCH means the group is already gone; the wait below still
/// collects the zombie.
async fn kill_and_reap(child: &mut Child) {
    if let Some(pid) = child.id() {
        let pgrp = Pid::from_raw(pid as i32);
        if let Err(errno) = killpg(pgrp, Signal::SIGKILL) {
            if errno != Errno::ESRCH {
                warn!(%pgrp, error = %errno, "failed to kill child process group");
            }
        }
    }
    match child.wait().await {
        Ok(status) => debug!(status = %TerminationStatus::from(status), "child reaped after kill"),
        Err(err) => warn!(error = %err, "failed to reap child after kill"),
    }
}

/// Record a spawn failure in the stderr capture file, best effort.
fn append_exec_diagnostic(stderr_path: &Path, err: &std::io::Error) {
    let line = format!("Failed to execute test program: {err}\n");
    match OpenOptions::new().append(true).create(true).open(stderr_path) {
        Ok(mut file) => {
            let _ = file.write_all(line.as_bytes());
        }
        Err(open_err) => {
            warn!(error = %open_err, "could not record exec diagnostic in capture file");
        }
    }
}
