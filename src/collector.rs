//! Result collection and broadcast.
//!
//! [`ResultCollecter`] is the only place where raw lifecycle signals from a
//! runner become [`TestResult`]s. It owns the registered handlers, the run
//! verdict and the stop flag for exactly one run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};
use crate::handler::ResultHandler;
use crate::models::{CompletionStatus, ExceptionInfo, RunSummary, TestId, TestResult};

/// Cloneable handle to a collector's stop flag, safe to trigger from another
/// thread or an interrupt handler.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        if !self.0.swap(true, Ordering::SeqCst) {
            tracing::debug!("stop requested; no further tests will be scheduled");
        }
    }

    pub fn should_stop(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct ResultCollecter {
    handlers: Vec<Box<dyn ResultHandler>>,
    summary: RunSummary,
    stop: StopHandle,
    failfast: bool,
}

impl ResultCollecter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop scheduling after the first failure, error or unexpected success.
    pub fn with_failfast(mut self, failfast: bool) -> Self {
        self.failfast = failfast;
        self
    }

    /// Register a handler. Handlers are notified in registration order;
    /// registering the same kind of handler twice notifies both.
    pub fn add_result_handler(&mut self, handler: impl ResultHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn start_test_run(&mut self) -> Result<()> {
        self.dispatch("start_test_run", |h| h.start_test_run())
    }

    pub fn stop_test_run(&mut self) -> Result<()> {
        self.dispatch("stop_test_run", |h| h.stop_test_run())
    }

    pub fn start_test(&mut self, test: &TestId) -> Result<()> {
        self.dispatch("start_test", |h| h.start_test(test))
    }

    pub fn stop_test(&mut self, test: &TestId) -> Result<()> {
        self.dispatch("stop_test", |h| h.stop_test(test))
    }

    pub fn add_error(&mut self, test: &TestId, exception: ExceptionInfo) -> Result<()> {
        self.record(test, CompletionStatus::Error, Some(exception), None)
    }

    pub fn add_failure(&mut self, test: &TestId, exception: ExceptionInfo) -> Result<()> {
        self.record(test, CompletionStatus::Failure, Some(exception), None)
    }

    pub fn add_success(&mut self, test: &TestId) -> Result<()> {
        self.record(test, CompletionStatus::Success, None, None)
    }

    pub fn add_skip(&mut self, test: &TestId, reason: impl Into<String>) -> Result<()> {
        self.record(test, CompletionStatus::Skipped, None, Some(reason.into()))
    }

    pub fn add_expected_failure(&mut self, test: &TestId, exception: ExceptionInfo) -> Result<()> {
        self.record(test, CompletionStatus::ExpectedFailure, Some(exception), None)
    }

    pub fn add_unexpected_success(&mut self, test: &TestId) -> Result<()> {
        self.record(test, CompletionStatus::UnexpectedSuccess, None, None)
    }

    /// Ask the runner to stop scheduling new tests. Permanent and idempotent.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn should_stop(&self) -> bool {
        self.stop.should_stop()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// False iff any failure, error or unexpected success was recorded.
    pub fn was_successful(&self) -> bool {
        self.summary.was_successful()
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    fn record(
        &mut self,
        test: &TestId,
        status: CompletionStatus,
        exception: Option<ExceptionInfo>,
        message: Option<String>,
    ) -> Result<()> {
        let result = TestResult::from_test_case(test.clone(), status, exception, message);
        self.summary.record(status);
        if self.failfast && status.is_failure() {
            self.stop();
        }
        self.dispatch("on_result", |h| h.on_result(&result))
    }

    /// Notify every handler in registration order. The first handler error
    /// ends the broadcast of this event and is returned to the caller.
    fn dispatch<F>(&mut self, event: &'static str, mut notify: F) -> Result<()>
    where
        F: FnMut(&mut dyn ResultHandler) -> anyhow::Result<()>,
    {
        tracing::trace!(event, handlers = self.handlers.len(), "dispatching");
        for handler in &mut self.handlers {
            notify(handler.as_mut()).map_err(|source| Error::Handler { event, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
