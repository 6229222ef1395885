pub mod result;
pub mod status;

pub use result::{ExceptionInfo, RunSummary, TestId, TestResult};
pub use status::CompletionStatus;
