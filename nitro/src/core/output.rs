//! Action results and per-stage outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value produced by executing an action.
///
/// Actions have two distinct failure channels: a semantic failure, where the
/// action ran to completion but reports that it did not succeed, and a hard
/// failure, where the action could not run at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ActionResult {
    /// The action succeeded with a value (possibly `null`).
    Success(serde_json::Value),
    /// The action ran but reported failure with the given value.
    SemanticFailure(serde_json::Value),
    /// The action raised an error.
    HardFailure(String),
}

impl ActionResult {
    /// Creates a successful result.
    #[must_use]
    pub fn success(value: impl Into<serde_json::Value>) -> Self {
        Self::Success(value.into())
    }

    /// Creates a successful result with no meaningful value.
    #[must_use]
    pub fn success_empty() -> Self {
        Self::Success(serde_json::Value::Null)
    }

    /// Creates a semantic failure.
    #[must_use]
    pub fn semantic_failure(value: impl Into<serde_json::Value>) -> Self {
        Self::SemanticFailure(value.into())
    }

    /// Creates a hard failure.
    #[must_use]
    pub fn hard_failure(message: impl Into<String>) -> Self {
        Self::HardFailure(message.into())
    }

    /// Returns true if the action succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if the action failed through either channel.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }
}

impl From<bool> for ActionResult {
    fn from(ok: bool) -> Self {
        if ok {
            Self::Success(serde_json::Value::Bool(true))
        } else {
            Self::SemanticFailure(serde_json::Value::Bool(false))
        }
    }
}

/// The recorded outcome of one attempted stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StageOutcome {
    /// The stage's action succeeded.
    Completed {
        /// The value returned by the action.
        value: serde_json::Value,
    },
    /// The stage was skipped because its dependency had no recorded outcome.
    Skipped {
        /// The skipped stage.
        stage: String,
        /// The dependency that was not met.
        dependency: String,
    },
    /// The stage's action identifier was not registered.
    Unknown {
        /// The unresolved action identifier.
        action: String,
    },
    /// The stage's action failed.
    Failed {
        /// The failure message.
        message: String,
    },
}

impl StageOutcome {
    /// Creates a completed outcome.
    #[must_use]
    pub fn completed(value: serde_json::Value) -> Self {
        Self::Completed { value }
    }

    /// Creates a skip marker.
    #[must_use]
    pub fn skipped(stage: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self::Skipped {
            stage: stage.into(),
            dependency: dependency.into(),
        }
    }

    /// Creates an unknown action outcome.
    #[must_use]
    pub fn unknown(action: impl Into<String>) -> Self {
        Self::Unknown {
            action: action.into(),
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Returns true for a completed outcome.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Returns true for a skip marker.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Returns true for an unknown action outcome.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }

    /// Returns true for a failed outcome.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns the success value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Completed { value } => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed {
                value: serde_json::Value::String(s),
            } => write!(f, "{s}"),
            Self::Completed { value } => write!(f, "{value}"),
            Self::Skipped { stage, .. } => write!(f, "Skipped: Dependency not met for {stage}"),
            Self::Unknown { action } => write!(f, "Unknown action: {action}"),
            Self::Failed { message } => write!(f, "Failed: {message}"),
        }
    }
}
