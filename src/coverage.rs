//! Coverage collection around a run.
//!
//! The core only sees an [`Instrumentation`]: `setup` once before the run,
//! `teardown` once after it.

use crate::error::{Error, Result};

/// Scoped hook around a whole run.
pub trait Instrumentation: Send {
    fn setup(&mut self) -> Result<()>;
    fn teardown(&mut self) -> Result<()>;
}

/// The instrumentation engine that actually measures coverage.
pub trait CoverageBackend: Send {
    fn start(&mut self) -> anyhow::Result<()>;
    fn stop(&mut self) -> anyhow::Result<()>;
    /// Persist whatever was collected.
    fn save(&mut self) -> anyhow::Result<()>;
}

/// Adapts a [`CoverageBackend`] to the run lifecycle: start on setup, stop
/// and save on teardown.
pub struct Coverage<B: CoverageBackend> {
    backend: B,
    active: bool,
}

impl<B: CoverageBackend> Coverage<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Start collecting now and stop when the guard is dropped.
    pub fn scoped(self) -> Result<CoverageGuard<B>> {
        let mut coverage = self;
        coverage.setup()?;
        Ok(CoverageGuard { coverage })
    }
}

impl<B: CoverageBackend> Instrumentation for Coverage<B> {
    fn setup(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        self.backend.start().map_err(Error::Instrumentation)?;
        self.active = true;
        Ok(())
    }

    fn teardown(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.backend.stop().map_err(Error::Instrumentation)?;
        self.backend.save().map_err(Error::Instrumentation)
    }
}

/// Tears coverage down on drop.
pub struct CoverageGuard<B: CoverageBackend> {
    coverage: Coverage<B>,
}

impl<B: CoverageBackend> CoverageGuard<B> {
    pub fn coverage(&self) -> &Coverage<B> {
        &self.coverage
    }

    /// Tear down now, surfacing the error instead of logging it on drop.
    pub fn finish(&mut self) -> Result<()> {
        self.coverage.teardown()
    }
}

impl<B: CoverageBackend> Drop for CoverageGuard<B> {
    fn drop(&mut self) {
        if let Err(e) = self.coverage.teardown() {
            tracing::warn!("coverage teardown failed: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;
