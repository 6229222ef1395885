use std::fmt;

use serde::{Deserialize, Serialize};

use super::status::CompletionStatus;

/// Identity of one bound test unit: the container type and the method it runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TestId {
    pub container: String,
    pub method: String,
}

impl TestId {
    pub fn new(container: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            method: method.into(),
        }
    }

    /// `Container.method`, the form ignore patterns are matched against.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.container, self.method)
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.method, self.container)
    }
}

/// Captured failure information, detached from the frame that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub type_name: String,
    pub message: String,
    pub traceback: Option<String>,
}

impl ExceptionInfo {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            traceback: None,
        }
    }

    pub fn with_traceback(mut self, traceback: impl Into<String>) -> Self {
        self.traceback = Some(traceback.into());
        self
    }
}

impl fmt::Display for ExceptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref traceback) = self.traceback {
            writeln!(f, "{}", traceback.trim_end())?;
        }
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

/// Outcome of one completed test unit. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    test: TestId,
    status: CompletionStatus,
    exception: Option<ExceptionInfo>,
    message: Option<String>,
}

impl TestResult {
    /// Build a result, keeping each payload only where `status` allows it:
    /// the exception for failure, error and expected failure, the message
    /// for skipped.
    pub fn from_test_case(
        test: TestId,
        status: CompletionStatus,
        exception: Option<ExceptionInfo>,
        message: Option<String>,
    ) -> Self {
        Self {
            test,
            status,
            exception: exception.filter(|_| status.carries_exception()),
            message: message.filter(|_| status == CompletionStatus::Skipped),
        }
    }

    pub fn test(&self) -> &TestId {
        &self.test
    }

    pub fn status(&self) -> CompletionStatus {
        self.status
    }

    pub fn exception(&self) -> Option<&ExceptionInfo> {
        self.exception.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Per-status tally of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub skipped: usize,
    pub expected_failures: usize,
    pub unexpected_successes: usize,
}

impl RunSummary {
    pub fn record(&mut self, status: CompletionStatus) {
        self.total += 1;
        let slot = match status {
            CompletionStatus::Success => &mut self.passed,
            CompletionStatus::Failure => &mut self.failed,
            CompletionStatus::Error => &mut self.errors,
            CompletionStatus::Skipped => &mut self.skipped,
            CompletionStatus::ExpectedFailure => &mut self.expected_failures,
            CompletionStatus::UnexpectedSuccess => &mut self.unexpected_successes,
        };
        *slot += 1;
    }

    /// False once any failure, error or unexpected success has been recorded.
    pub fn was_successful(&self) -> bool {
        self.failed == 0 && self.errors == 0 && self.unexpected_successes == 0
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
