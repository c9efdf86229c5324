#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard, Once, OnceLock, PoisonError};

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

static PROCESS_STATE: OnceLock<Mutex<()>> = OnceLock::new();

/// Serialise tests that touch process-global state: signal dispositions, the
/// interrupt flag, or environment variables like `TMPDIR`.
///
/// Ignores poisoning so one panicking holder does not wedge the rest.
pub fn process_state_lock() -> MutexGuard<'static, ()> {
    PROCESS_STATE
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Set an environment variable for the lifetime of the returned guard, then
/// restore the previous value.
///
/// Callers must hold [`process_state_lock`] across the guard's lifetime.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<std::ffi::OsString>,
}

impl EnvVarGuard {
    pub fn set(key: &'static str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let previous = std::env::var_os(key);
        unsafe { std::env::set_var(key, value) };
        Self { key, previous }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => unsafe { std::env::set_var(self.key, value) },
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}
