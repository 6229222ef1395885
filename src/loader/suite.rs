use std::fmt;

use crate::collector::ResultCollecter;
use crate::error::Result;
use crate::models::TestId;

/// One bound, executable test.
pub trait TestUnit: Send {
    fn id(&self) -> &TestId;

    /// Execute the test, reporting `start_test`, exactly one outcome and
    /// `stop_test` to `collector`.
    fn run(&mut self, collector: &mut ResultCollecter) -> Result<()>;
}

/// A suite member: a single unit or a nested suite.
pub enum Test {
    Unit(Box<dyn TestUnit>),
    Suite(Suite),
}

impl Test {
    pub fn count_test_cases(&self) -> usize {
        match self {
            Test::Unit(_) => 1,
            Test::Suite(suite) => suite.count_test_cases(),
        }
    }
}

impl From<Box<dyn TestUnit>> for Test {
    fn from(unit: Box<dyn TestUnit>) -> Self {
        Test::Unit(unit)
    }
}

impl From<Suite> for Test {
    fn from(suite: Suite) -> Self {
        Test::Suite(suite)
    }
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Test::Unit(unit) => f.debug_tuple("Unit").field(unit.id()).finish(),
            Test::Suite(suite) => fmt::Debug::fmt(suite, f),
        }
    }
}

/// Ordered, possibly nested collection of tests. Insertion order is run order.
#[derive(Debug, Default)]
pub struct Suite {
    tests: Vec<Test>,
}

impl Suite {
    pub fn new(tests: Vec<Test>) -> Self {
        Self { tests }
    }

    pub fn add_test(&mut self, test: impl Into<Test>) {
        self.tests.push(test.into());
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn tests_mut(&mut self) -> &mut [Test] {
        &mut self.tests
    }

    /// Number of direct members.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Number of leaf units, recursively.
    pub fn count_test_cases(&self) -> usize {
        self.tests.iter().map(Test::count_test_cases).sum()
    }

    /// Identities of all leaf units, depth-first in run order.
    pub fn test_ids(&self) -> Vec<TestId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<TestId>) {
        for test in &self.tests {
            match test {
                Test::Unit(unit) => ids.push(unit.id().clone()),
                Test::Suite(suite) => suite.collect_ids(ids),
            }
        }
    }
}
