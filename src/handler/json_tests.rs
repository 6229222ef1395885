use super::*;
use crate::models::{CompletionStatus, ExceptionInfo};

#[test]
fn writes_one_line_per_event() {
    let mut handler = JsonLinesHandler::new(Vec::new());
    let test = TestId::new("Sample", "test_fail");
    let result = TestResult::from_test_case(
        test.clone(),
        CompletionStatus::Failure,
        Some(ExceptionInfo::new("AssertionFailure", "1 != 2")),
        None,
    );

    handler.start_test(&test).unwrap();
    handler.on_result(&result).unwrap();
    handler.stop_test(&test).unwrap();

    let output = String::from_utf8(handler.into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);

    let finished: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(finished["type"], "test-finished");
    assert_eq!(finished["result"]["status"], "failure");
    assert_eq!(finished["result"]["exception"]["message"], "1 != 2");

    let decoded: TestEvent = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(decoded, TestEvent::TestFinished { result });
}
