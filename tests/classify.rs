use proptest::prelude::*;
use trialrun::exec::{EXEC_FAILURE_CODE, TerminationStatus, WaitOutcome};
use trialrun::verdict::{TestResult, apply_cleanup_failure, classify};

fn exited(code: i32) -> WaitOutcome {
    WaitOutcome::Completed(TerminationStatus::Exited(code))
}

fn signaled(signal: i32, core_dumped: bool) -> WaitOutcome {
    WaitOutcome::Completed(TerminationStatus::Signaled {
        signal,
        core_dumped,
    })
}

#[test]
fn exit_zero_is_passed() {
    assert_eq!(classify(&exited(0)), TestResult::Passed);
}

#[test]
fn exit_one_is_failed_with_code() {
    assert_eq!(
        classify(&exited(1)),
        TestResult::Failed("Exited with code 1".to_string())
    );
}

#[test]
fn reserved_exit_code_is_exec_failure() {
    // Indistinguishable from a test that legitimately exits 120; the
    // reserved code wins.
    assert_eq!(
        classify(&exited(EXEC_FAILURE_CODE)),
        TestResult::Broken("Failed to execute test program".to_string())
    );
}

#[test]
fn spawn_failure_is_exec_failure() {
    assert_eq!(
        classify(&WaitOutcome::ExecFailed),
        TestResult::Broken("Failed to execute test program".to_string())
    );
}

#[test]
fn timeout_is_broken() {
    assert_eq!(
        classify(&WaitOutcome::TimedOut),
        TestResult::Broken("Test case timed out".to_string())
    );
}

#[test]
fn signal_without_core_dump() {
    let result = classify(&signaled(9, false));
    assert_eq!(
        result,
        TestResult::Broken("Received signal 9".to_string())
    );
}

#[test]
fn signal_with_core_dump() {
    assert_eq!(
        classify(&signaled(6, true)),
        TestResult::Broken("Received signal 6 (core dumped)".to_string())
    );
}

#[test]
fn unknown_termination_is_broken() {
    assert_eq!(
        classify(&WaitOutcome::Completed(TerminationStatus::Unknown)),
        TestResult::Broken("Terminated in an unknown manner".to_string())
    );
}

#[test]
fn good_holds_only_for_passed() {
    assert!(TestResult::Passed.good());
    assert!(!TestResult::Failed("Exited with code 1".to_string()).good());
    assert!(!TestResult::Broken("Test case timed out".to_string()).good());
}

#[test]
fn result_display_forms() {
    assert_eq!(TestResult::Passed.to_string(), "passed");
    assert_eq!(
        TestResult::Failed("Exited with code 7".to_string()).to_string(),
        "failed: Exited with code 7"
    );
    assert_eq!(
        TestResult::Broken("Test case timed out".to_string()).to_string(),
        "broken: Test case timed out"
    );
}

#[test]
fn cleanup_failure_downgrades_only_good_results() {
    let err = trialrun::errors::TrialrunError::Workdir("directory busy".to_string());

    match apply_cleanup_failure(TestResult::Passed, &err) {
        TestResult::Broken(reason) => {
            assert!(reason.starts_with("Could not clean up test work directory:"));
            assert!(reason.contains("directory busy"));
        }
        other => panic!("expected broken, got {other:?}"),
    }

    let failed = TestResult::Failed("Exited with code 1".to_string());
    assert_eq!(apply_cleanup_failure(failed.clone(), &err), failed);

    let broken = TestResult::Broken("Test case timed out".to_string());
    assert_eq!(apply_cleanup_failure(broken.clone(), &err), broken);
}

proptest! {
    /// Every exit code other than 0 and the reserved one fails with the code
    /// in the message.
    #[test]
    fn nonzero_exit_codes_fail_with_code_in_message(code in 1..=255i32) {
        prop_assume!(code != EXEC_FAILURE_CODE);
        match classify(&exited(code)) {
            TestResult::Failed(reason) => {
                prop_assert!(reason.contains(&code.to_string()));
            }
            other => prop_assert!(false, "expected failed for code {}, got {:?}", code, other),
        }
    }

    /// Core-dump annotation appears exactly when a dump was produced.
    #[test]
    fn signal_messages_mention_core_dumps_exactly_when_present(
        signal in 1..=31i32,
        core_dumped in any::<bool>(),
    ) {
        match classify(&signaled(signal, core_dumped)) {
            TestResult::Broken(reason) => {
                prop_assert!(reason.contains(&signal.to_string()));
                prop_assert_eq!(reason.contains("(core dumped)"), core_dumped);
            }
            other => prop_assert!(false, "expected broken, got {:?}", other),
        }
    }
}
