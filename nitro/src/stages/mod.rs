//! Stage definitions, stage records and the stage factory registry.
//!
//! A [`StageDefinition`] is the static description a factory produces from
//! run parameters. A [`Stage`] wraps a definition with the lifecycle state
//! the orchestrator drives during a run.

mod builtin;
mod registry;
mod stage;

pub use builtin::{
    graphs_stage, http_get, metrics_stage, read_file, recover_db, register_builtin_stages,
    register_demo_stages, report_stage, sleep_2s, GRAPHS_STAGE, HTTP_GET, METRICS_STAGE,
    READ_FILE, RECOVER_DB, REPORT_STAGE, SLEEP_2S,
};
pub use registry::{StageDefinitionRegistry, StageFactory};
pub use stage::{transition_message, RetrySettings, Stage};

use crate::core::Params;
use serde::{Deserialize, Serialize};

/// Static description of a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDefinition {
    /// Stage name, unique within a run.
    pub name: String,
    /// Identifier of the action to execute.
    pub action: String,
    /// Action-specific parameters.
    #[serde(default)]
    pub params: Params,
    /// Name of the single stage this one depends on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
}

impl StageDefinition {
    /// Creates a definition with no parameters and no dependency.
    #[must_use]
    pub fn new(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            params: Params::new(),
            depends_on: None,
        }
    }

    /// Replaces the parameters.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Adds a single parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets the dependency.
    #[must_use]
    pub fn depends_on(mut self, stage: impl Into<String>) -> Self {
        self.depends_on = Some(stage.into());
        self
    }
}
