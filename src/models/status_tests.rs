use super::*;
use yare::parameterized;

#[parameterized(
    success = { CompletionStatus::Success, false, false },
    failure = { CompletionStatus::Failure, true, true },
    error = { CompletionStatus::Error, true, true },
    skipped = { CompletionStatus::Skipped, false, false },
    expected_failure = { CompletionStatus::ExpectedFailure, false, true },
    unexpected_success = { CompletionStatus::UnexpectedSuccess, true, false },
)]
fn verdict_and_payload_gating(status: CompletionStatus, is_failure: bool, carries: bool) {
    assert_eq!(status.is_failure(), is_failure);
    assert_eq!(status.carries_exception(), carries);
}

#[test]
fn symbols_are_distinct() {
    let mut symbols: Vec<_> = CompletionStatus::ALL.iter().map(|s| s.symbol()).collect();
    symbols.sort();
    symbols.dedup();
    assert_eq!(symbols.len(), CompletionStatus::ALL.len());
}

#[test]
fn serializes_as_snake_case() {
    let json = serde_json::to_string(&CompletionStatus::UnexpectedSuccess).unwrap();
    assert_eq!(json, "\"unexpected_success\"");
}
