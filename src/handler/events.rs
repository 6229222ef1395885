use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::models::{TestId, TestResult};

use super::ResultHandler;

/// One lifecycle event of a run, in the order the collector emits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TestEvent {
    RunStarted,
    TestStarted { test: TestId },
    TestFinished { result: TestResult },
    TestStopped { test: TestId },
    RunFinished,
}

/// Handler that streams every event over an unbounded channel, for consumers
/// living on another task or thread (a UI, a socket writer).
pub struct EventForwarder {
    tx: mpsc::UnboundedSender<TestEvent>,
}

impl EventForwarder {
    pub fn new(tx: mpsc::UnboundedSender<TestEvent>) -> Self {
        Self { tx }
    }

    /// Create a forwarder together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TestEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: TestEvent) -> Result<()> {
        self.tx
            .send(event)
            .ok()
            .context("test event receiver was dropped")
    }
}

impl ResultHandler for EventForwarder {
    fn start_test_run(&mut self) -> Result<()> {
        self.send(TestEvent::RunStarted)
    }

    fn stop_test_run(&mut self) -> Result<()> {
        self.send(TestEvent::RunFinished)
    }

    fn start_test(&mut self, test: &TestId) -> Result<()> {
        self.send(TestEvent::TestStarted { test: test.clone() })
    }

    fn stop_test(&mut self, test: &TestId) -> Result<()> {
        self.send(TestEvent::TestStopped { test: test.clone() })
    }

    fn on_result(&mut self, result: &TestResult) -> Result<()> {
        self.send(TestEvent::TestFinished {
            result: result.clone(),
        })
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
