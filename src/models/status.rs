use serde::{Deserialize, Serialize};

/// Terminal classification of a finished test unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Success,
    /// An assertion-style condition was raised.
    Failure,
    /// Any other condition was raised.
    Error,
    Skipped,
    ExpectedFailure,
    UnexpectedSuccess,
}

impl CompletionStatus {
    pub const ALL: [CompletionStatus; 6] = [
        CompletionStatus::Success,
        CompletionStatus::Failure,
        CompletionStatus::Error,
        CompletionStatus::Skipped,
        CompletionStatus::ExpectedFailure,
        CompletionStatus::UnexpectedSuccess,
    ];

    /// Single-character progress mark.
    pub fn symbol(&self) -> &'static str {
        match self {
            CompletionStatus::Success => ".",
            CompletionStatus::Failure => "F",
            CompletionStatus::Error => "E",
            CompletionStatus::Skipped => "s",
            CompletionStatus::ExpectedFailure => "x",
            CompletionStatus::UnexpectedSuccess => "u",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompletionStatus::Success => "ok",
            CompletionStatus::Failure => "FAIL",
            CompletionStatus::Error => "ERROR",
            CompletionStatus::Skipped => "skipped",
            CompletionStatus::ExpectedFailure => "expected failure",
            CompletionStatus::UnexpectedSuccess => "unexpected success",
        }
    }

    /// Whether this outcome breaks the run verdict.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            CompletionStatus::Failure | CompletionStatus::Error | CompletionStatus::UnexpectedSuccess
        )
    }

    /// Whether a result with this status keeps its exception payload.
    pub fn carries_exception(&self) -> bool {
        matches!(
            self,
            CompletionStatus::Failure | CompletionStatus::Error | CompletionStatus::ExpectedFailure
        )
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
