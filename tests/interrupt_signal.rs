// These tests manipulate process-wide signal state, so every one of them
// holds the process-state lock.

mod common;

use std::time::{Duration, Instant};

use nix::errno::Errno;
use nix::sys::signal::{Signal, kill, raise};
use nix::unistd::Pid;
use trialrun::config::RunnerConfig;
use trialrun::errors::TrialrunError;
use trialrun::interrupt::{SignalGuard, check_interrupt, pending};
use trialrun::runner::TestCase;
use trialrun_test_utils::fixtures::ScriptDir;

#[test]
fn checkpoint_is_clean_without_signals() {
    let _lock = common::process_state_lock();
    common::init_tracing();

    let _guard = SignalGuard::install().expect("install signal guard");
    assert_eq!(pending(), None);
    check_interrupt().expect("no interrupt pending");
}

#[test]
fn raised_signal_sets_flag_and_checkpoint_errors() {
    let _lock = common::process_state_lock();
    common::init_tracing();

    {
        let _guard = SignalGuard::install().expect("install signal guard");
        raise(Signal::SIGINT).expect("raise SIGINT");

        assert_eq!(pending(), Some(libc::SIGINT));
        match check_interrupt() {
            Err(TrialrunError::Interrupted(signo)) => assert_eq!(signo, libc::SIGINT),
            other => panic!("expected an interrupted error, got {other:?}"),
        }
    }

    // A fresh programming starts with a clean flag.
    let _guard = SignalGuard::install().expect("reinstall signal guard");
    assert_eq!(pending(), None);
}

#[test]
fn nested_guards_restore_the_previous_handler() {
    let _lock = common::process_state_lock();
    common::init_tracing();

    let _outer = SignalGuard::install().expect("install outer guard");
    {
        let _inner = SignalGuard::install().expect("install inner guard");
    }
    // The inner guard restored the outer handler, not the default
    // disposition, so raising now must set the flag instead of killing us.
    raise(Signal::SIGTERM).expect("raise SIGTERM");
    assert_eq!(pending(), Some(libc::SIGTERM));
}

#[tokio::test]
async fn sigterm_mid_run_interrupts_and_cleans_up() {
    let _lock = common::process_state_lock();
    common::init_tracing();
    // Fixtures go in first so the TMPDIR pin does not pull them into the
    // observed base.
    let scripts = ScriptDir::new();
    let (script, pid_file) = scripts.sleep_script_with_pid_file(30);
    let base = tempfile::tempdir().expect("create base dir");
    let _tmpdir = common::EnvVarGuard::set("TMPDIR", base.path());

    let case = TestCase::new(script, "main");
    let config = RunnerConfig::default();
    let started = Instant::now();
    let handle = tokio::spawn(async move { case.run(&config).await });

    // Let the run program its handlers and spawn the sleeper, then interrupt.
    tokio::time::sleep(Duration::from_millis(500)).await;
    raise(Signal::SIGTERM).expect("raise SIGTERM");

    let run_result = handle.await.expect("join run task");
    match run_result {
        Err(TrialrunError::Interrupted(signo)) => assert_eq!(signo, libc::SIGTERM),
        other => panic!("expected an interrupted run, got {other:?}"),
    }
    assert!(
        started.elapsed() < Duration::from_secs(10),
        "cancellation did not cut the run short"
    );

    // The child is gone and so is the work directory.
    let pid_text = std::fs::read_to_string(&pid_file).expect("read recorded pid");
    let pid = Pid::from_raw(pid_text.trim().parse().expect("parse recorded pid"));
    assert_eq!(kill(pid, None), Err(Errno::ESRCH), "child survived the interrupt");

    let leftovers: Vec<_> = std::fs::read_dir(base.path())
        .expect("read workdir base")
        .map(|entry| entry.expect("read dir entry").file_name())
        .collect();
    assert!(
        leftovers.is_empty(),
        "work directory survived the interrupt: {leftovers:?}"
    );
}
