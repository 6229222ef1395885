//! Test discovery and suite assembly.
//!
//! The [`Loader`] walks a [`Module`] for test case types, collects their
//! test methods by name prefix, binds each to a fresh instance and assembles
//! the result into a [`Suite`] tree. All ordering is declaration order.

pub mod case;
pub mod suite;

use std::sync::Arc;

use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::models::TestId;

pub use case::{
    AssertionFailure, Member, MemberInfo, Module, ModuleItem, SkipTest, TestCase, TestFn,
    TypeInfo, assertion, check, skip,
};
pub use suite::{Suite, Test, TestUnit};

pub const DEFAULT_METHOD_PREFIX: &str = "test";

/// Builds a suite from an ordered list of tests.
pub type SuiteFactory = Arc<dyn Fn(Vec<Test>) -> Suite + Send + Sync>;

#[derive(Clone)]
pub struct Loader {
    method_prefix: String,
    suite_factory: SuiteFactory,
    ignore: Vec<glob::Pattern>,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            method_prefix: DEFAULT_METHOD_PREFIX.to_string(),
            suite_factory: Arc::new(Suite::new),
            ignore: Vec::new(),
        }
    }
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        Self::new()
            .with_method_prefix(&config.method_prefix)
            .with_ignore(config.ignore.as_slice())
    }

    pub fn with_method_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.method_prefix = prefix.into();
        self
    }

    pub fn with_suite_factory(
        mut self,
        factory: impl Fn(Vec<Test>) -> Suite + Send + Sync + 'static,
    ) -> Self {
        self.suite_factory = Arc::new(factory);
        self
    }

    /// Exclude methods whose `Container.method` name matches any glob.
    pub fn with_ignore<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let compiled = glob::Pattern::new(pattern).map_err(|e| Error::Config {
                message: format!("invalid ignore pattern '{pattern}': {e}"),
                path: None,
            })?;
            self.ignore.push(compiled);
        }
        Ok(self)
    }

    pub fn method_prefix(&self) -> &str {
        &self.method_prefix
    }

    pub fn create_suite(&self, tests: Vec<Test>) -> Suite {
        (self.suite_factory)(tests)
    }

    /// Names of callable members starting with the method prefix, in
    /// declaration order, without duplicates.
    pub fn find_test_method_names(&self, case: &TypeInfo) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for member in case.members() {
            if !member.callable || !member.name.starts_with(&self.method_prefix) {
                continue;
            }
            if names.contains(&member.name) || self.is_ignored(case.name(), &member.name) {
                continue;
            }
            names.push(member.name.clone());
        }
        names
    }

    /// Bind `method_name` to a new instance of `case`.
    pub fn load_test(&self, case: &TypeInfo, method_name: &str) -> Result<Box<dyn TestUnit>> {
        match case.bind(method_name) {
            None => Err(Error::NotATestCase {
                type_name: case.name().to_string(),
            }),
            Some(None) => Err(Error::UnknownTestMethod {
                type_name: case.name().to_string(),
                method: method_name.to_string(),
            }),
            Some(Some(unit)) => Ok(unit),
        }
    }

    /// A suite with one unit per discovered test method.
    pub fn load_case(&self, case: &TypeInfo) -> Result<Suite> {
        if !case.is_test_case() {
            return Err(Error::NotATestCase {
                type_name: case.name().to_string(),
            });
        }
        let tests = self
            .find_test_method_names(case)
            .iter()
            .map(|name| self.load_test(case, name).map(Test::Unit))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(case = case.name(), tests = tests.len(), "loaded test case");
        Ok(self.create_suite(tests))
    }

    /// Test case types of `module`, in declaration order.
    pub fn get_test_cases_from_module<'m>(&self, module: &'m Module) -> Vec<&'m TypeInfo> {
        module
            .items()
            .iter()
            .filter_map(|item| match item {
                ModuleItem::Type(info) if info.is_test_case() => Some(info),
                _ => None,
            })
            .collect()
    }

    /// A suite holding one suite per test case type of `module`.
    pub fn load_module(&self, module: &Module) -> Result<Suite> {
        let cases = self.get_test_cases_from_module(module);
        tracing::debug!(module = module.name(), cases = cases.len(), "loading module");
        let suites = cases
            .into_iter()
            .map(|case| self.load_case(case).map(Test::Suite))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.create_suite(suites))
    }

    fn is_ignored(&self, container: &str, method: &str) -> bool {
        if self.ignore.is_empty() {
            return false;
        }
        let qualified = TestId::new(container, method).qualified_name();
        self.ignore.iter().any(|p| p.matches(&qualified))
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
