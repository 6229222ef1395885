//! Shared helpers for unit tests.

use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};

use crate::handler::ResultHandler;
use crate::models::{TestId, TestResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    StartRun,
    StopRun,
    StartTest(TestId),
    StopTest(TestId),
    Result(TestResult),
}

pub type CallLog = Arc<Mutex<Vec<(&'static str, Call)>>>;

/// Handler that appends every call, tagged with its own name, to a shared log.
pub struct Recorder {
    name: &'static str,
    log: CallLog,
    fail_on_result: bool,
}

impl Recorder {
    pub fn new(name: &'static str, log: &CallLog) -> Self {
        Self {
            name,
            log: Arc::clone(log),
            fail_on_result: false,
        }
    }

    /// A recorder whose `on_result` logs the call and then fails.
    pub fn failing(name: &'static str, log: &CallLog) -> Self {
        Self {
            fail_on_result: true,
            ..Self::new(name, log)
        }
    }

    fn push(&self, call: Call) {
        self.log.lock().unwrap().push((self.name, call));
    }
}

impl ResultHandler for Recorder {
    fn start_test_run(&mut self) -> Result<()> {
        self.push(Call::StartRun);
        Ok(())
    }

    fn stop_test_run(&mut self) -> Result<()> {
        self.push(Call::StopRun);
        Ok(())
    }

    fn start_test(&mut self, test: &TestId) -> Result<()> {
        self.push(Call::StartTest(test.clone()));
        Ok(())
    }

    fn stop_test(&mut self, test: &TestId) -> Result<()> {
        self.push(Call::StopTest(test.clone()));
        Ok(())
    }

    fn on_result(&mut self, result: &TestResult) -> Result<()> {
        self.push(Call::Result(result.clone()));
        if self.fail_on_result {
            bail!("{} refused the result", self.name);
        }
        Ok(())
    }
}

pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Calls recorded so far, without the handler names.
pub fn calls(log: &CallLog) -> Vec<Call> {
    log.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
}
