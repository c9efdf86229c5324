// src/exec/isolation.rs

//! Child environment isolation.
//!
//! The test body must run under a deterministic baseline: its own process
//! group, a conservative umask, default signal dispositions, a scrubbed
//! locale, and the run directory as both working directory and HOME.
//!
//! Isolation is split in two. Whatever the `Command` builder can express
//! (environment, working directory, process group) is configured there, so it
//! takes effect during the kernel-side child setup. The rest (umask, signal
//! dispositions, the leadership assertion) runs in a `pre_exec` hook, which
//! executes between fork and exec and is therefore limited to
//! async-signal-safe calls: raw libc only, no allocation.

use std::io;
use std::path::Path;

use tokio::process::Command;

/// Locale variables cleared so the child sees no inherited localisation.
const LOCALE_VARS: [&str; 8] = [
    "LANG",
    "LC_ALL",
    "LC_COLLATE",
    "LC_CTYPE",
    "LC_MESSAGES",
    "LC_MONETARY",
    "LC_NUMERIC",
    "LC_TIME",
];

const CHILD_UMASK: libc::mode_t = 0o022;

/// Highest signal number whose disposition is reset. Covers the classic and
/// realtime ranges on the supported platforms; numbers without a signal are
/// rejected by the kernel and skipped like the uncatchable ones.
const MAX_SIGNO: libc::c_int = 64;

/// Build the command that runs `program`, with no arguments, isolated inside
/// `run_dir`.
///
/// `program` must already be absolute: the child changes its working
/// directory before exec, so a relative path would resolve against the wrong
/// directory.
pub fn isolated_command(program: &Path, run_dir: &Path) -> Command {
    debug_assert!(program.is_absolute());

    let mut cmd = Command::new(program);
    for var in LOCALE_VARS {
        cmd.env_remove(var);
    }
    cmd.env("TZ", "UTC");
    cmd.env("HOME", run_dir);
    cmd.current_dir(run_dir);
    cmd.process_group(0);
    cmd.kill_on_drop(true);

    unsafe {
        cmd.pre_exec(|| {
            if libc::getpgrp() != libc::getpid() {
                // process_group(0) above must have made the child a leader.
                return Err(io::Error::other(
                    "child is not its own process-group leader",
                ));
            }
            libc::umask(CHILD_UMASK);
            reset_signal_dispositions();
            Ok(())
        });
    }

    cmd
}

/// Restore the default disposition of every catchable signal, silently
/// skipping SIGKILL and SIGSTOP and ignoring per-signal errors.
fn reset_signal_dispositions() {
    for signo in 1..=MAX_SIGNO {
        if signo == libc::SIGKILL || signo == libc::SIGSTOP {
            continue;
        }
        unsafe {
            libc::signal(signo, libc::SIG_DFL);
        }
    }
}
