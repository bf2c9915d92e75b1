//! The stage record and its state machine.

use super::StageDefinition;
use crate::core::{Params, StageState};
use crate::errors::TransitionError;
use crate::events::NotificationChannel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Formats the notification published on a state change.
#[must_use]
pub fn transition_message(stage: &str, from: StageState, to: StageState) -> String {
    format!("Stage '{stage}' transitioned from '{from}' to '{to}'")
}

/// Retry bookkeeping carried by every stage.
///
/// These fields are reserved: the orchestrator does not retry stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrySettings {
    /// Retries performed so far.
    pub retry_count: u32,
    /// Maximum retries allowed.
    pub max_retries: u32,
    /// Delay between retries in seconds.
    pub retry_delay_seconds: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            retry_count: 0,
            max_retries: 3,
            retry_delay_seconds: 5.0,
        }
    }
}

/// A stage instance within one run.
#[derive(Debug, Clone, Serialize)]
pub struct Stage {
    #[serde(flatten)]
    definition: StageDefinition,
    state: StageState,
    result: Option<serde_json::Value>,
    error: Option<String>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    duration_ms: Option<f64>,
    #[serde(flatten)]
    retry: RetrySettings,
    #[serde(skip)]
    observer: Option<Arc<NotificationChannel>>,
}

impl Stage {
    /// Creates a stage in the `not_started` state.
    #[must_use]
    pub fn new(definition: StageDefinition) -> Self {
        Self {
            definition,
            state: StageState::NotStarted,
            result: None,
            error: None,
            started_at: None,
            ended_at: None,
            duration_ms: None,
            retry: RetrySettings::default(),
            observer: None,
        }
    }

    /// Sets the channel that receives transition notifications.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<NotificationChannel>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Returns the stage name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Returns the action identifier.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.definition.action
    }

    /// Returns the action parameters.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.definition.params
    }

    /// Returns the dependency, if any.
    #[must_use]
    pub fn depends_on(&self) -> Option<&str> {
        self.definition.depends_on.as_deref()
    }

    /// Returns the underlying definition.
    #[must_use]
    pub fn definition(&self) -> &StageDefinition {
        &self.definition
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> StageState {
        self.state
    }

    /// Returns the value the action returned, once executed.
    #[must_use]
    pub fn result(&self) -> Option<&serde_json::Value> {
        self.result.as_ref()
    }

    /// Returns the failure description, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns when the orchestrator started the stage.
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns when the stage reached its terminal state.
    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Returns the wall-clock duration of the attempt in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> Option<f64> {
        self.duration_ms
    }

    /// Returns the reserved retry settings.
    #[must_use]
    pub fn retry(&self) -> &RetrySettings {
        &self.retry
    }

    /// Moves the stage to `state`.
    ///
    /// Returns `Ok(false)` without notifying when the stage is already in
    /// `state`, and `Ok(true)` after a real change.
    ///
    /// # Errors
    ///
    /// Returns an error if the stage is in a terminal state.
    pub fn set_state(&mut self, state: StageState) -> Result<bool, TransitionError> {
        if self.state == state {
            return Ok(false);
        }
        if self.state.is_terminal() {
            return Err(TransitionError::new(self.name(), self.state, state));
        }

        let old = std::mem::replace(&mut self.state, state);
        debug!(stage = %self.name(), from = %old, to = %state, "Stage transition");
        if let Some(ref observer) = self.observer {
            observer.notify(&transition_message(self.name(), old, state));
        }
        Ok(true)
    }

    pub(crate) fn set_result(&mut self, value: serde_json::Value) {
        self.result = Some(value);
    }

    pub(crate) fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub(crate) fn mark_started(&mut self) {
        self.started_at = Some(Utc::now());
    }

    pub(crate) fn mark_finished(&mut self, duration_ms: f64) {
        self.ended_at = Some(Utc::now());
        self.duration_ms = Some(duration_ms);
    }

    /// Serializes the full record, reserved fields included.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
