//! Named test cases: an ordered list of stage names.

use serde::{Deserialize, Serialize};

/// A named, ordered list of stages to run together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Test case name.
    pub name: String,
    /// Stage names, in execution order.
    pub stages: Vec<String>,
}

/// Fluent builder for [`TestCase`].
#[derive(Debug, Clone)]
pub struct TestCaseBuilder {
    name: String,
    stages: Vec<String>,
}

impl TestCaseBuilder {
    /// Starts a test case.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    /// Appends a stage.
    #[must_use]
    pub fn add_stage(mut self, stage: impl Into<String>) -> Self {
        self.stages.push(stage.into());
        self
    }

    /// Appends several stages.
    #[must_use]
    pub fn add_stages(mut self, stages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.stages.extend(stages.into_iter().map(Into::into));
        self
    }

    /// Finishes the test case.
    #[must_use]
    pub fn build(self) -> TestCase {
        TestCase {
            name: self.name,
            stages: self.stages,
        }
    }
}
