//! Observers of a test run.
//!
//! Every plugin that wants to see a run implements [`ResultHandler`] and is
//! registered on a [`ResultCollecter`](crate::ResultCollecter). Handlers are
//! free to ignore any event; nothing here assumes they produce output.

pub mod events;
pub mod json;
mod text;

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Result, anyhow};

use crate::models::{TestId, TestResult};

pub use events::{EventForwarder, TestEvent};
pub use json::JsonLinesHandler;
pub use text::{QuietTestResultHandler, StandardTestResultHandler, VerboseTestResultHandler};

/// Observer contract: four lifecycle hooks plus the outcome sink.
pub trait ResultHandler: Send {
    /// Called once before any test starts.
    fn start_test_run(&mut self) -> Result<()>;

    /// Called once after the last test (or after an early stop).
    fn stop_test_run(&mut self) -> Result<()>;

    fn start_test(&mut self, test: &TestId) -> Result<()>;

    /// Called after the outcome of `test` was delivered, whatever it was.
    fn stop_test(&mut self, test: &TestId) -> Result<()>;

    /// Called exactly once per completed test with its outcome.
    fn on_result(&mut self, result: &TestResult) -> Result<()>;
}

/// A shared handler: register a clone of the `Arc` and keep the other to
/// read the handler after the run.
impl<H: ResultHandler> ResultHandler for Arc<Mutex<H>> {
    fn start_test_run(&mut self) -> Result<()> {
        locked(self)?.start_test_run()
    }

    fn stop_test_run(&mut self) -> Result<()> {
        locked(self)?.stop_test_run()
    }

    fn start_test(&mut self, test: &TestId) -> Result<()> {
        locked(self)?.start_test(test)
    }

    fn stop_test(&mut self, test: &TestId) -> Result<()> {
        locked(self)?.stop_test(test)
    }

    fn on_result(&mut self, result: &TestResult) -> Result<()> {
        locked(self)?.on_result(result)
    }
}

fn locked<H>(handler: &Mutex<H>) -> Result<MutexGuard<'_, H>> {
    handler
        .lock()
        .map_err(|_| anyhow!("shared result handler was poisoned"))
}

#[cfg(test)]
#[path = "shared_tests.rs"]
mod tests;
