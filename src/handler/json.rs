use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::models::{TestId, TestResult};

use super::{ResultHandler, TestEvent};

/// Writes one JSON object per event (NDJSON), suitable for piping into
/// another process.
pub struct JsonLinesHandler<W: Write + Send = io::Stdout> {
    out: W,
}

impl JsonLinesHandler {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonLinesHandler<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &TestEvent) -> Result<()> {
        serde_json::to_writer(&mut self.out, event).context("failed to encode test event")?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> ResultHandler for JsonLinesHandler<W> {
    fn start_test_run(&mut self) -> Result<()> {
        self.emit(&TestEvent::RunStarted)
    }

    fn stop_test_run(&mut self) -> Result<()> {
        self.emit(&TestEvent::RunFinished)
    }

    fn start_test(&mut self, test: &TestId) -> Result<()> {
        self.emit(&TestEvent::TestStarted { test: test.clone() })
    }

    fn stop_test(&mut self, test: &TestId) -> Result<()> {
        self.emit(&TestEvent::TestStopped { test: test.clone() })
    }

    fn on_result(&mut self, result: &TestResult) -> Result<()> {
        self.emit(&TestEvent::TestFinished {
            result: result.clone(),
        })
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
