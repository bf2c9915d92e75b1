//! Error types for the nitro engine.
//!
//! Configuration absence (unknown stage names, unknown actions) is never an
//! error here: it is logged and recorded as an outcome. Only run aborts,
//! illegal state changes and configuration parsing surface as errors.

use crate::core::StageState;
use std::collections::HashMap;
use thiserror::Error;

/// Fixed abort message used when an action reports a semantic failure.
pub const ACTION_EXECUTION_FAILED: &str = "Action execution failed.";

/// The main error type for nitro operations.
#[derive(Debug, Error)]
pub enum NitroError {
    /// A run was aborted by a failing stage.
    #[error("{0}")]
    Run(#[from] RunError),

    /// A stage attempted an illegal state change.
    #[error("{0}")]
    Transition(#[from] TransitionError),

    /// Engine configuration could not be loaded.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

/// Error raised when a run aborts.
#[derive(Debug, Clone, Error)]
pub enum RunError {
    /// A stage's action failed, either by reporting a semantic failure or by
    /// raising an error.
    #[error("Stage '{stage}' failed: {message}")]
    StageFailed {
        /// The stage that failed.
        stage: String,
        /// The failure message.
        message: String,
        /// The value returned by a semantically failing action.
        payload: Option<serde_json::Value>,
    },

    /// The orchestrator drove a stage through an illegal transition.
    #[error("{0}")]
    Transition(#[from] TransitionError),
}

impl RunError {
    /// Creates a stage failure.
    #[must_use]
    pub fn stage_failed(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StageFailed {
            stage: stage.into(),
            message: message.into(),
            payload: None,
        }
    }

    /// Creates the abort raised for a semantic action failure.
    ///
    /// The message is always [`ACTION_EXECUTION_FAILED`]; the returned value
    /// is only kept as the payload.
    #[must_use]
    pub fn semantic_failure(stage: impl Into<String>, payload: serde_json::Value) -> Self {
        Self::StageFailed {
            stage: stage.into(),
            message: ACTION_EXECUTION_FAILED.to_string(),
            payload: Some(payload),
        }
    }

    /// Returns the name of the stage that aborted the run, if any.
    #[must_use]
    pub fn stage(&self) -> Option<&str> {
        match self {
            Self::StageFailed { stage, .. } => Some(stage),
            Self::Transition(err) => Some(&err.stage),
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::StageFailed {
                stage,
                message,
                payload,
            } => {
                map.insert("type".to_string(), serde_json::json!("StageFailed"));
                map.insert("stage".to_string(), serde_json::json!(stage));
                map.insert("reason".to_string(), serde_json::json!(message));
                if let Some(payload) = payload {
                    map.insert("payload".to_string(), payload.clone());
                }
            }
            Self::Transition(err) => {
                map.insert("type".to_string(), serde_json::json!("InvalidTransition"));
                map.insert("stage".to_string(), serde_json::json!(err.stage));
                map.insert("from".to_string(), serde_json::json!(err.from.to_string()));
                map.insert("to".to_string(), serde_json::json!(err.to.to_string()));
            }
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Error raised when a stage is asked to leave a terminal state.
#[derive(Debug, Clone, Error)]
#[error("Stage '{stage}' cannot transition from '{from}' to '{to}'")]
pub struct TransitionError {
    /// The stage name.
    pub stage: String,
    /// The current (terminal) state.
    pub from: StageState,
    /// The requested state.
    pub to: StageState,
}

impl TransitionError {
    /// Creates a new transition error.
    #[must_use]
    pub fn new(stage: impl Into<String>, from: StageState, to: StageState) -> Self {
        Self {
            stage: stage.into(),
            from,
            to,
        }
    }
}

/// Errors raised while loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("Invalid engine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the engine cannot use.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_failed_message() {
        let err = RunError::stage_failed("http_get", "connection refused");
        assert_eq!(err.to_string(), "Stage 'http_get' failed: connection refused");
        assert_eq!(err.stage(), Some("http_get"));
    }

    #[test]
    fn test_semantic_failure_keeps_payload_out_of_message() {
        let err = RunError::semantic_failure("sleep_2s", serde_json::json!(false));
        assert_eq!(err.to_string(), "Stage 'sleep_2s' failed: Action execution failed.");

        let RunError::StageFailed { payload, .. } = &err else {
            panic!("expected StageFailed");
        };
        assert_eq!(payload, &Some(serde_json::json!(false)));
    }

    #[test]
    fn test_run_error_to_dict() {
        let dict = RunError::semantic_failure("sleep_2s", serde_json::json!(false)).to_dict();

        assert_eq!(dict.get("type").unwrap(), "StageFailed");
        assert_eq!(dict.get("stage").unwrap(), "sleep_2s");
        assert_eq!(dict.get("payload").unwrap(), &serde_json::json!(false));
    }

    #[test]
    fn test_transition_error() {
        let err = TransitionError::new("read_file", StageState::Completed, StageState::Failed);
        assert_eq!(
            err.to_string(),
            "Stage 'read_file' cannot transition from 'completed' to 'failed'"
        );

        let run_err: RunError = err.into();
        assert_eq!(run_err.to_dict().get("type").unwrap(), "InvalidTransition");
    }

    #[test]
    fn test_nitro_error_from() {
        let err: NitroError = RunError::stage_failed("a", "boom").into();
        assert!(matches!(err, NitroError::Run(_)));

        let err: NitroError = ConfigError::invalid_value("sleep_failure_seconds", "negative").into();
        assert!(err.to_string().contains("sleep_failure_seconds"));
    }
}
