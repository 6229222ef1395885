//! The test-container capability and the runtime type metadata the loader
//! discovers tests through.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::runner::BoundTest;

use super::suite::TestUnit;

/// Body of a test method. Returning an error that is (or wraps)
/// [`SkipTest`] skips the test, [`AssertionFailure`] or a panic fails it,
/// anything else is an error.
pub type TestFn<T> = fn(&mut T) -> anyhow::Result<()>;

/// A group of test methods; one instance is built per method to run.
pub trait TestCase: Sized + Send + 'static {
    /// Type name used in test identities.
    const NAME: &'static str;

    fn new(method_name: &str) -> Self;

    /// All members of the type, in declaration order. Non-callable members
    /// are listed too so discovery can tell them apart.
    fn members() -> Vec<Member<Self>>;

    fn set_up(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn tear_down(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct Member<T> {
    name: &'static str,
    kind: MemberKind<T>,
}

enum MemberKind<T> {
    Method {
        body: TestFn<T>,
        expected_failure: bool,
    },
    Attribute,
}

impl<T> Member<T> {
    pub fn method(name: &'static str, body: TestFn<T>) -> Self {
        Self {
            name,
            kind: MemberKind::Method {
                body,
                expected_failure: false,
            },
        }
    }

    /// A plain data member; never collected as a test.
    pub fn attribute(name: &'static str) -> Self {
        Self {
            name,
            kind: MemberKind::Attribute,
        }
    }

    /// Mark a method as known to fail.
    pub fn expected_failure(mut self) -> Self {
        if let MemberKind::Method {
            ref mut expected_failure,
            ..
        } = self.kind
        {
            *expected_failure = true;
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }
}

/// Skip the running test with `reason`.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct SkipTest {
    pub reason: String,
}

/// An assertion-style condition; reported as a failure rather than an error.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AssertionFailure {
    pub message: String,
}

pub fn skip(reason: impl Into<String>) -> anyhow::Error {
    SkipTest {
        reason: reason.into(),
    }
    .into()
}

pub fn assertion(message: impl Into<String>) -> anyhow::Error {
    AssertionFailure {
        message: message.into(),
    }
    .into()
}

/// Fail with an [`AssertionFailure`] unless `condition` holds.
pub fn check(condition: bool, message: impl Into<String>) -> anyhow::Result<()> {
    if condition {
        Ok(())
    } else {
        Err(assertion(message))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub name: String,
    pub callable: bool,
}

/// Binds a method name on a test case type to a runnable unit.
trait CaseFactory: Send + Sync {
    fn bind(&self, method_name: &str) -> Option<Box<dyn TestUnit>>;
}

struct Factory<T>(PhantomData<fn() -> T>);

impl<T: TestCase> CaseFactory for Factory<T> {
    fn bind(&self, method_name: &str) -> Option<Box<dyn TestUnit>> {
        T::members().into_iter().find_map(|member| match member.kind {
            MemberKind::Method {
                body,
                expected_failure,
            } if member.name == method_name => Some(Box::new(BoundTest::<T>::new(
                method_name,
                body,
                expected_failure,
            )) as Box<dyn TestUnit>),
            _ => None,
        })
    }
}

/// Runtime description of a type: its name, its members and whether it
/// carries the test-case capability.
#[derive(Clone)]
pub struct TypeInfo {
    name: String,
    members: Vec<MemberInfo>,
    factory: Option<Arc<dyn CaseFactory>>,
}

impl TypeInfo {
    pub fn of<T: TestCase>() -> Self {
        let members = T::members()
            .iter()
            .map(|m| MemberInfo {
                name: m.name.to_string(),
                callable: m.is_callable(),
            })
            .collect();
        Self {
            name: T::NAME.to_string(),
            members,
            factory: Some(Arc::new(Factory::<T>(PhantomData))),
        }
    }

    /// A type without the test-case capability, described by
    /// `(member name, callable)` pairs.
    pub fn plain<'a>(
        name: impl Into<String>,
        members: impl IntoIterator<Item = (&'a str, bool)>,
    ) -> Self {
        Self {
            name: name.into(),
            members: members
                .into_iter()
                .map(|(name, callable)| MemberInfo {
                    name: name.to_string(),
                    callable,
                })
                .collect(),
            factory: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    pub fn is_test_case(&self) -> bool {
        self.factory.is_some()
    }

    pub(crate) fn bind(&self, method_name: &str) -> Option<Option<Box<dyn TestUnit>>> {
        self.factory.as_ref().map(|f| f.bind(method_name))
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("members", &self.members)
            .field("is_test_case", &self.is_test_case())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum ModuleItem {
    Type(TypeInfo),
    /// Anything that is not a type (functions, constants).
    Value(String),
}

/// A named collection of items, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Module {
    name: String,
    items: Vec<ModuleItem>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_case<T: TestCase>(self) -> Self {
        self.with_type(TypeInfo::of::<T>())
    }

    pub fn with_type(mut self, info: TypeInfo) -> Self {
        self.items.push(ModuleItem::Type(info));
        self
    }

    pub fn with_value(mut self, name: impl Into<String>) -> Self {
        self.items.push(ModuleItem::Value(name.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[ModuleItem] {
        &self.items
    }
}
