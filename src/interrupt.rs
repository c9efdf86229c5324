// src/interrupt.rs

//! Interrupt monitoring and scoped signal programming.
//!
//! A single process-wide flag records the number of the signal that requested
//! cancellation. The handler installed for SIGHUP/SIGINT/SIGTERM does the
//! minimum legal in signal-delivery context: one raw unbuffered write of a
//! fixed notice to stderr, one atomic store. Everything else happens at
//! checkpoints, where [`check_interrupt`] turns a pending signal into a
//! [`TrialrunError::Interrupted`] error that unwinds through normal control
//! flow.
//!
//! One run at a time: the flag is global, and [`SignalGuard::install`] resets
//! it, so concurrent runs in one process would race each other.

use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;

use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use tracing::{debug, info, warn};

use crate::errors::{Result, TrialrunError};

/// Signals that request interactive cancellation of a run.
const INTERRUPT_SIGNALS: [Signal; 3] = [Signal::SIGHUP, Signal::SIGINT, Signal::SIGTERM];

/// How often the in-wait interrupt future re-checks the flag.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Signal number of a pending interrupt; 0 means none.
static INTERRUPT_SIGNO: AtomicI32 = AtomicI32::new(0);

const NOTICE: &[u8] = b"[-- Signal caught; please wait for clean up --]\n";

/// The installed handler. Restricted to async-signal-safe operations: no
/// allocation, no buffered I/O, no locks.
extern "C" fn handle_signal(signo: libc::c_int) {
    unsafe {
        let _ = libc::write(
            libc::STDERR_FILENO,
            NOTICE.as_ptr() as *const libc::c_void,
            NOTICE.len(),
        );
    }
    INTERRUPT_SIGNO.store(signo, Ordering::SeqCst);
}

/// Signal number of the pending interrupt, if any.
pub fn pending() -> Option<i32> {
    match INTERRUPT_SIGNO.load(Ordering::SeqCst) {
        0 => None,
        signo => Some(signo),
    }
}

/// Checkpoint: fail with `Interrupted` if a signal arrived since the handlers
/// were programmed.
///
/// Every blocking step of a run calls this immediately before and after the
/// blocking operation; it is the only place where asynchronous signal
/// delivery becomes synchronous control flow.
pub fn check_interrupt() -> Result<()> {
    debug!("checking for pending interrupts");
    match pending() {
        Some(signo) => {
            info!(signo, "interrupt pending; raising error to trigger cleanup");
            Err(TrialrunError::Interrupted(signo))
        }
        None => Ok(()),
    }
}

/// Resolves with the signal number once an interrupt is pending.
///
/// Pending interrupts are detected with a short polling interval; the latency
/// only delays the start of kill-and-reap handling, never its outcome.
pub async fn wait_for_interrupt() -> i32 {
    let mut tick = tokio::time::interval(POLL_INTERVAL);
    loop {
        tick.tick().await;
        if let Some(signo) = pending() {
            return signo;
        }
    }
}

/// Scoped programming of the interrupt signals.
///
/// Installing the guard routes SIGHUP, SIGINT and SIGTERM to [`handle_signal`]
/// and clears any stale interrupt flag; dropping it restores every previous
/// disposition in reverse order. The orchestrator keeps the guard alive from
/// before the work directory exists until after it has been removed, so no
/// interrupt in that window can be missed.
pub struct SignalGuard {
    saved: Vec<(Signal, SigAction)>,
}

impl SignalGuard {
    pub fn install() -> Result<Self> {
        INTERRUPT_SIGNO.store(0, Ordering::SeqCst);

        let action = SigAction::new(
            SigHandler::Handler(handle_signal),
            SaFlags::empty(),
            SigSet::empty(),
        );

        // Install one by one; if a later sigaction fails, dropping the
        // partially filled guard restores the ones already replaced.
        let mut guard = SignalGuard {
            saved: Vec::with_capacity(INTERRUPT_SIGNALS.len()),
        };
        for sig in INTERRUPT_SIGNALS {
            let old = unsafe { signal::sigaction(sig, &action) }.map_err(|errno| {
                TrialrunError::System(std::io::Error::from_raw_os_error(errno as i32))
            })?;
            guard.saved.push((sig, old));
        }

        debug!("interrupt signal handlers installed");
        Ok(guard)
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        while let Some((sig, old)) = self.saved.pop() {
            if let Err(errno) = unsafe { signal::sigaction(sig, &old) } {
                warn!(signal = %sig, error = %errno, "failed to restore signal disposition");
            }
        }
        debug!("interrupt signal handlers restored");
    }
}
