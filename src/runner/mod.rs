mod unit;

use crate::collector::ResultCollecter;
use crate::coverage::Instrumentation;
use crate::error::Result;
use crate::loader::{Suite, Test};

pub use unit::{BoundTest, error_kind, from_error, from_panic};

/// Drives a suite through a collector: one `start_test_run`, every unit in
/// suite order until a stop is requested, one `stop_test_run`.
pub struct TestRunner {
    collector: ResultCollecter,
    instrumentation: Vec<Box<dyn Instrumentation>>,
}

impl TestRunner {
    pub fn new(collector: ResultCollecter) -> Self {
        Self {
            collector,
            instrumentation: Vec::new(),
        }
    }

    /// Hook set up before the run starts and torn down after it ends.
    pub fn with_instrumentation(mut self, hook: impl Instrumentation + 'static) -> Self {
        self.instrumentation.push(Box::new(hook));
        self
    }

    pub fn collector(&self) -> &ResultCollecter {
        &self.collector
    }

    pub fn collector_mut(&mut self) -> &mut ResultCollecter {
        &mut self.collector
    }

    pub fn into_collector(self) -> ResultCollecter {
        self.collector
    }

    /// Run `suite` and return the verdict.
    ///
    /// Instrumentation is torn down in reverse order even when the run
    /// fails; a run error takes precedence over a teardown error.
    pub fn run(&mut self, suite: &mut Suite) -> Result<bool> {
        let mut started = 0;
        let mut outcome = Ok(());
        for hook in &mut self.instrumentation {
            if let Err(e) = hook.setup() {
                outcome = Err(e);
                break;
            }
            started += 1;
        }

        if outcome.is_ok() {
            outcome = self.run_inner(suite);
        }

        for hook in self.instrumentation[..started].iter_mut().rev() {
            let teardown = hook.teardown();
            if outcome.is_ok() {
                outcome = teardown;
            }
        }

        outcome?;
        let successful = self.collector.was_successful();
        tracing::debug!(successful, summary = ?self.collector.summary(), "test run finished");
        Ok(successful)
    }

    fn run_inner(&mut self, suite: &mut Suite) -> Result<()> {
        tracing::debug!(tests = suite.count_test_cases(), "starting test run");
        self.collector.start_test_run()?;
        run_suite(&mut self.collector, suite)?;
        self.collector.stop_test_run()
    }
}

fn run_suite(collector: &mut ResultCollecter, suite: &mut Suite) -> Result<()> {
    for test in suite.tests_mut() {
        if collector.should_stop() {
            break;
        }
        match test {
            Test::Unit(unit) => unit.run(collector)?,
            Test::Suite(inner) => run_suite(collector, inner)?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
