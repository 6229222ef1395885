use std::any::Any;
use std::cell::Cell;
use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::collector::ResultCollecter;
use crate::error::Result;
use crate::loader::{AssertionFailure, SkipTest, TestCase, TestFn, TestUnit};
use crate::models::{ExceptionInfo, TestId};

/// What a test raised, before it is turned into an outcome.
#[derive(Debug)]
enum Raised {
    Skip(String),
    Failure(ExceptionInfo),
    Error(ExceptionInfo),
}

/// A test method bound to its own instance of the test case.
pub struct BoundTest<T: TestCase> {
    id: TestId,
    instance: T,
    body: TestFn<T>,
    expected_failure: bool,
}

impl<T: TestCase> BoundTest<T> {
    pub fn new(method_name: &str, body: TestFn<T>, expected_failure: bool) -> Self {
        Self {
            id: TestId::new(T::NAME, method_name),
            instance: T::new(method_name),
            body,
            expected_failure,
        }
    }

    /// set_up, body, tear_down. tear_down runs whenever set_up succeeded;
    /// its error only counts when the body passed.
    fn invoke(&mut self) -> std::result::Result<(), Raised> {
        guarded(|| self.instance.set_up())?;
        let body = self.body;
        let outcome = guarded(|| body(&mut self.instance));
        let teardown = guarded(|| self.instance.tear_down());
        outcome.and(teardown)
    }
}

impl<T: TestCase> TestUnit for BoundTest<T> {
    fn id(&self) -> &TestId {
        &self.id
    }

    fn run(&mut self, collector: &mut ResultCollecter) -> Result<()> {
        collector.start_test(&self.id)?;
        let id = self.id.clone();
        match (self.invoke(), self.expected_failure) {
            (Ok(()), false) => collector.add_success(&id)?,
            (Ok(()), true) => collector.add_unexpected_success(&id)?,
            (Err(Raised::Skip(reason)), _) => collector.add_skip(&id, reason)?,
            (Err(Raised::Failure(info) | Raised::Error(info)), true) => {
                collector.add_expected_failure(&id, info)?
            }
            (Err(Raised::Failure(info)), false) => collector.add_failure(&id, info)?,
            (Err(Raised::Error(info)), false) => collector.add_error(&id, info)?,
        }
        collector.stop_test(&id)
    }
}

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wrap the panic hook once so panics caught from a test body on this thread
/// are not printed. Panics anywhere else still reach the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !CAPTURING.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

fn guarded<F>(f: F) -> std::result::Result<(), Raised>
where
    F: FnOnce() -> anyhow::Result<()>,
{
    install_quiet_hook();
    let outer = CAPTURING.with(|c| c.replace(true));
    let caught = panic::catch_unwind(AssertUnwindSafe(f));
    CAPTURING.with(|c| c.set(outer));
    match caught {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(classify(&err)),
        Err(payload) => Err(Raised::Failure(from_panic(payload.as_ref()))),
    }
}

fn classify(err: &anyhow::Error) -> Raised {
    if let Some(skip) = err.chain().find_map(|e| e.downcast_ref::<SkipTest>()) {
        return Raised::Skip(skip.reason.clone());
    }
    let info = from_error(err);
    if err.chain().any(|e| e.is::<AssertionFailure>()) {
        Raised::Failure(info)
    } else {
        Raised::Error(info)
    }
}

/// Name of what was raised: `AssertionFailure` anywhere in the chain,
/// otherwise the type of the root cause when it is a known error type.
pub fn error_kind(err: &anyhow::Error) -> &'static str {
    if err.chain().any(|e| e.is::<AssertionFailure>()) {
        return "AssertionFailure";
    }
    let root: &(dyn StdError + 'static) = err.root_cause();
    let known: [(&'static str, fn(&(dyn StdError + 'static)) -> bool); 10] = [
        ("std::io::Error", |e| e.is::<std::io::Error>()),
        ("std::num::ParseIntError", |e| e.is::<std::num::ParseIntError>()),
        ("std::num::ParseFloatError", |e| e.is::<std::num::ParseFloatError>()),
        ("std::num::TryFromIntError", |e| e.is::<std::num::TryFromIntError>()),
        ("std::str::ParseBoolError", |e| e.is::<std::str::ParseBoolError>()),
        ("std::str::Utf8Error", |e| e.is::<std::str::Utf8Error>()),
        ("std::string::FromUtf8Error", |e| e.is::<std::string::FromUtf8Error>()),
        ("std::fmt::Error", |e| e.is::<std::fmt::Error>()),
        ("serde_json::Error", |e| e.is::<serde_json::Error>()),
        ("toml::de::Error", |e| e.is::<toml::de::Error>()),
    ];
    known
        .iter()
        .find(|(_, is_kind)| is_kind(root))
        .map(|(name, _)| *name)
        .unwrap_or("Error")
}

/// Capture an error as an owned payload; the cause chain becomes the
/// traceback.
pub fn from_error(err: &anyhow::Error) -> ExceptionInfo {
    let info = ExceptionInfo::new(error_kind(err), err.to_string());
    let causes: Vec<String> = err
        .chain()
        .skip(1)
        .enumerate()
        .map(|(i, cause)| format!("    {i}: {cause}"))
        .collect();
    if causes.is_empty() {
        info
    } else {
        info.with_traceback(format!("Caused by:\n{}", causes.join("\n")))
    }
}

pub fn from_panic(payload: &(dyn Any + Send)) -> ExceptionInfo {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "test panicked".to_string()
    };
    ExceptionInfo::new("panic", message)
}

#[cfg(test)]
#[path = "unit_tests.rs"]
mod tests;
