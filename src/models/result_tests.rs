use super::*;
use yare::parameterized;

fn id() -> TestId {
    TestId::new("Sample", "test_pass")
}

#[test]
fn test_id_display_and_qualified_name() {
    assert_eq!(id().to_string(), "test_pass (Sample)");
    assert_eq!(id().qualified_name(), "Sample.test_pass");
}

#[parameterized(
    success = { CompletionStatus::Success, false, false },
    failure = { CompletionStatus::Failure, true, false },
    error = { CompletionStatus::Error, true, false },
    skipped = { CompletionStatus::Skipped, false, true },
    expected_failure = { CompletionStatus::ExpectedFailure, true, false },
    unexpected_success = { CompletionStatus::UnexpectedSuccess, false, false },
)]
fn payloads_are_gated_by_status(status: CompletionStatus, has_exception: bool, has_message: bool) {
    let result = TestResult::from_test_case(
        id(),
        status,
        Some(ExceptionInfo::new("RuntimeError", "boom")),
        Some("reason".to_string()),
    );
    assert_eq!(result.status(), status);
    assert_eq!(result.exception().is_some(), has_exception);
    assert_eq!(result.message().is_some(), has_message);
}

#[test]
fn results_compare_by_value() {
    let a = TestResult::from_test_case(id(), CompletionStatus::Skipped, None, Some("x".into()));
    let b = TestResult::from_test_case(id(), CompletionStatus::Skipped, None, Some("x".into()));
    assert_eq!(a, b);
}

#[test]
fn exception_display_includes_traceback() {
    let info = ExceptionInfo::new("AssertionFailure", "1 != 2").with_traceback("at test_fail\n");
    assert_eq!(info.to_string(), "at test_fail\nAssertionFailure: 1 != 2");
}

#[test]
fn summary_tracks_verdict() {
    let mut summary = RunSummary::default();
    assert!(summary.was_successful());

    summary.record(CompletionStatus::Success);
    summary.record(CompletionStatus::Skipped);
    summary.record(CompletionStatus::ExpectedFailure);
    assert!(summary.was_successful());

    summary.record(CompletionStatus::UnexpectedSuccess);
    assert!(!summary.was_successful());
    assert_eq!(summary.total, 4);
    assert_eq!(summary.unexpected_successes, 1);
}
