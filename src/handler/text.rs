use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;

use crate::models::{CompletionStatus, RunSummary, TestId, TestResult};

use super::ResultHandler;

const SEPARATOR_HEAVY: &str =
    "======================================================================";
const SEPARATOR_LIGHT: &str =
    "----------------------------------------------------------------------";

/// Prints nothing but a trailing newline when the run stops.
pub struct QuietTestResultHandler<W: Write + Send = io::Stderr> {
    test_count: usize,
    out: W,
}

impl QuietTestResultHandler {
    pub fn new(test_count: usize) -> Self {
        Self::with_writer(test_count, io::stderr())
    }
}

impl<W: Write + Send> QuietTestResultHandler<W> {
    pub fn with_writer(test_count: usize, out: W) -> Self {
        Self { test_count, out }
    }

    pub fn test_count(&self) -> usize {
        self.test_count
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ResultHandler for QuietTestResultHandler<W> {
    fn start_test_run(&mut self) -> Result<()> {
        Ok(())
    }

    fn stop_test_run(&mut self) -> Result<()> {
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn start_test(&mut self, _test: &TestId) -> Result<()> {
        Ok(())
    }

    fn stop_test(&mut self, _test: &TestId) -> Result<()> {
        Ok(())
    }

    fn on_result(&mut self, _result: &TestResult) -> Result<()> {
        Ok(())
    }
}

/// Shared state of the textual handlers: tally, collected problems and the
/// end-of-run report.
struct Report<W: Write + Send> {
    test_count: usize,
    out: W,
    summary: RunSummary,
    problems: Vec<TestResult>,
    started: Option<Instant>,
}

impl<W: Write + Send> Report<W> {
    fn new(test_count: usize, out: W) -> Self {
        Self {
            test_count,
            out,
            summary: RunSummary::default(),
            problems: Vec::new(),
            started: None,
        }
    }

    fn record(&mut self, result: &TestResult) {
        self.summary.record(result.status());
        if result.status().is_failure() {
            self.problems.push(result.clone());
        }
    }

    fn finish(&mut self) -> Result<()> {
        for problem in &self.problems {
            writeln!(self.out, "{SEPARATOR_HEAVY}")?;
            writeln!(self.out, "{}: {}", problem.status().label(), problem.test())?;
            writeln!(self.out, "{SEPARATOR_LIGHT}")?;
            if let Some(exception) = problem.exception() {
                writeln!(self.out, "{exception}")?;
            }
            writeln!(self.out)?;
        }

        let elapsed = self.started.map(|s| s.elapsed().as_secs_f64()).unwrap_or(0.0);
        let total = self.summary.total;
        writeln!(self.out, "{SEPARATOR_LIGHT}")?;
        writeln!(
            self.out,
            "Ran {} test{} in {:.3}s",
            total,
            if total == 1 { "" } else { "s" },
            elapsed
        )?;
        if total < self.test_count {
            writeln!(self.out, "({} of {} tests not run)", self.test_count - total, self.test_count)?;
        }
        let verdict = self.verdict_line();
        writeln!(self.out)?;
        writeln!(self.out, "{verdict}")?;
        self.out.flush()?;
        Ok(())
    }

    fn verdict_line(&self) -> String {
        let s = &self.summary;
        let counts = [
            ("failures", s.failed),
            ("errors", s.errors),
            ("skipped", s.skipped),
            ("expected failures", s.expected_failures),
            ("unexpected successes", s.unexpected_successes),
        ];
        let details: Vec<String> = counts
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(name, n)| format!("{name}={n}"))
            .collect();

        let head = if s.was_successful() { "OK" } else { "FAILED" };
        if details.is_empty() {
            head.to_string()
        } else {
            format!("{head} ({})", details.join(", "))
        }
    }
}

/// One progress mark per test, then a report with failure details.
pub struct StandardTestResultHandler<W: Write + Send = io::Stderr> {
    report: Report<W>,
}

impl StandardTestResultHandler {
    pub fn new(test_count: usize) -> Self {
        Self::with_writer(test_count, io::stderr())
    }
}

impl<W: Write + Send> StandardTestResultHandler<W> {
    pub fn with_writer(test_count: usize, out: W) -> Self {
        Self {
            report: Report::new(test_count, out),
        }
    }

    pub fn into_inner(self) -> W {
        self.report.out
    }
}

impl<W: Write + Send> ResultHandler for StandardTestResultHandler<W> {
    fn start_test_run(&mut self) -> Result<()> {
        self.report.started = Some(Instant::now());
        Ok(())
    }

    fn stop_test_run(&mut self) -> Result<()> {
        writeln!(self.report.out)?;
        self.report.finish()
    }

    fn start_test(&mut self, _test: &TestId) -> Result<()> {
        Ok(())
    }

    fn stop_test(&mut self, _test: &TestId) -> Result<()> {
        Ok(())
    }

    fn on_result(&mut self, result: &TestResult) -> Result<()> {
        self.report.record(result);
        write!(self.report.out, "{}", result.status().symbol())?;
        self.report.out.flush()?;
        Ok(())
    }
}

/// One line per test with its outcome, then the same report as the standard
/// handler.
pub struct VerboseTestResultHandler<W: Write + Send = io::Stderr> {
    report: Report<W>,
}

impl VerboseTestResultHandler {
    pub fn new(test_count: usize) -> Self {
        Self::with_writer(test_count, io::stderr())
    }
}

impl<W: Write + Send> VerboseTestResultHandler<W> {
    pub fn with_writer(test_count: usize, out: W) -> Self {
        Self {
            report: Report::new(test_count, out),
        }
    }

    pub fn into_inner(self) -> W {
        self.report.out
    }
}

impl<W: Write + Send> ResultHandler for VerboseTestResultHandler<W> {
    fn start_test_run(&mut self) -> Result<()> {
        self.report.started = Some(Instant::now());
        Ok(())
    }

    fn stop_test_run(&mut self) -> Result<()> {
        self.report.finish()
    }

    fn start_test(&mut self, test: &TestId) -> Result<()> {
        write!(self.report.out, "{test} ... ")?;
        self.report.out.flush()?;
        Ok(())
    }

    fn stop_test(&mut self, _test: &TestId) -> Result<()> {
        Ok(())
    }

    fn on_result(&mut self, result: &TestResult) -> Result<()> {
        self.report.record(result);
        match (result.status(), result.message()) {
            (CompletionStatus::Skipped, Some(reason)) => {
                writeln!(self.report.out, "skipped '{reason}'")?
            }
            (status, _) => writeln!(self.report.out, "{}", status.label())?,
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
