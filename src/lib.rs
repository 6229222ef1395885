//! Core of a pluggable test runner.
//!
//! A [`Loader`] turns test case types into a [`Suite`] tree, a
//! [`TestRunner`] walks the tree, and a [`ResultCollecter`] turns every
//! lifecycle signal into a broadcast to the registered
//! [`ResultHandler`]s while keeping the run verdict.

pub mod collector;
pub mod config;
pub mod coverage;
pub mod error;
pub mod handler;
pub mod loader;
pub mod models;
pub mod runner;

#[cfg(test)]
mod test_utils;

pub use collector::{ResultCollecter, StopHandle};
pub use config::Config;
pub use coverage::{Coverage, CoverageBackend, CoverageGuard, Instrumentation};
pub use error::{Error, Result};
pub use handler::{
    EventForwarder, JsonLinesHandler, QuietTestResultHandler, ResultHandler,
    StandardTestResultHandler, TestEvent, VerboseTestResultHandler,
};
pub use loader::{Loader, Member, Module, Suite, Test, TestCase, TestUnit, TypeInfo};
pub use models::{CompletionStatus, ExceptionInfo, RunSummary, TestId, TestResult};
pub use runner::TestRunner;
