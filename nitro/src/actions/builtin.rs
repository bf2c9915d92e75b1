//! Built-in actions.
//!
//! None of these touch the network or supervise processes; they reproduce
//! the result contract of the real operations so runs can be exercised
//! end to end.

use super::Action;
use crate::core::{param_str, ActionResult, Params};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

/// Identifier of the HTTP action.
pub const HTTP: &str = "http";
/// Identifier of the file-reading action.
pub const FILE_READ: &str = "file_read";
/// Identifier of the sleep action.
pub const SLEEP: &str = "sleep";
/// Identifier of the recovery action.
pub const RECOVERY: &str = "recovery";

/// Value returned by `file_read` when the file does not exist.
pub const FILE_NOT_FOUND: &str = "File not found.";

fn missing(key: &str) -> ActionResult {
    ActionResult::hard_failure(format!("missing parameter '{key}'"))
}

/// Reads an optional numeric parameter. A present non-number is a hard failure.
fn number_param(params: &Params, key: &str) -> Result<Option<f64>, ActionResult> {
    match params.get(key) {
        None => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            ActionResult::hard_failure(format!(
                "invalid parameter '{key}': expected a number, got {value}"
            ))
        }),
    }
}

fn duration_from(key: &str, seconds: f64) -> Result<Duration, ActionResult> {
    Duration::try_from_secs_f64(seconds).map_err(|e| {
        ActionResult::hard_failure(format!("invalid '{key}' value {seconds}: {e}"))
    })
}

/// Simulated HTTP request.
///
/// Succeeds with `true` for every URL except the failure sentinel, which
/// yields a semantic failure. An absent or non-string `url` never matches
/// the sentinel and succeeds.
#[derive(Debug, Clone)]
pub struct HttpAction {
    failure_url: String,
}

impl HttpAction {
    /// Creates an HTTP action failing on `failure_url`.
    #[must_use]
    pub fn new(failure_url: impl Into<String>) -> Self {
        Self {
            failure_url: failure_url.into(),
        }
    }
}

#[async_trait]
impl Action for HttpAction {
    async fn execute(&self, params: &Params) -> ActionResult {
        let url = param_str(params, "url");
        info!(url, "Executing HTTP action");

        if url == Some(self.failure_url.as_str()) {
            warn!(url, "Simulating failure for HTTP action");
            return ActionResult::from(false);
        }
        ActionResult::from(true)
    }
}

/// Reads a whole file as text.
///
/// A missing file is not a failure: the action succeeds with
/// [`FILE_NOT_FOUND`]. Any other I/O error is a hard failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReadAction;

#[async_trait]
impl Action for FileReadAction {
    async fn execute(&self, params: &Params) -> ActionResult {
        let Some(path) = param_str(params, "filepath") else {
            return missing("filepath");
        };

        match tokio::fs::read_to_string(path).await {
            Ok(content) => ActionResult::success(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path, "File not found");
                ActionResult::success(FILE_NOT_FOUND)
            }
            Err(e) => ActionResult::hard_failure(e.to_string()),
        }
    }
}

/// Suspends the run for `seconds`.
///
/// Sleeping for exactly the failure sentinel yields a semantic failure;
/// any other duration succeeds with `null`.
#[derive(Debug, Clone, Copy)]
pub struct SleepAction {
    failure_seconds: f64,
}

impl SleepAction {
    /// Creates a sleep action failing on `failure_seconds`.
    #[must_use]
    pub fn new(failure_seconds: f64) -> Self {
        Self { failure_seconds }
    }
}

#[async_trait]
impl Action for SleepAction {
    async fn execute(&self, params: &Params) -> ActionResult {
        let seconds = match number_param(params, "seconds") {
            Ok(Some(seconds)) => seconds,
            Ok(None) => return missing("seconds"),
            Err(failure) => return failure,
        };
        let duration = match duration_from("seconds", seconds) {
            Ok(d) => d,
            Err(failure) => return failure,
        };

        tokio::time::sleep(duration).await;

        if (seconds - self.failure_seconds).abs() < f64::EPSILON {
            warn!(seconds, "Simulating failure for sleep action");
            return ActionResult::from(false);
        }
        ActionResult::success_empty()
    }
}

/// Simulated recovery operation, such as restarting a service.
#[derive(Debug, Clone, Copy)]
pub struct RecoveryAction {
    default_delay: Duration,
}

impl RecoveryAction {
    /// Creates a recovery action that waits `default_delay` unless the stage
    /// sets `recovery_delay`.
    #[must_use]
    pub fn new(default_delay: Duration) -> Self {
        Self { default_delay }
    }
}

#[async_trait]
impl Action for RecoveryAction {
    async fn execute(&self, params: &Params) -> ActionResult {
        let recovery_type = match params.get("recovery_type") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => return missing("recovery_type"),
        };
        let delay = match number_param(params, "recovery_delay") {
            Ok(Some(seconds)) => match duration_from("recovery_delay", seconds) {
                Ok(d) => d,
                Err(failure) => return failure,
            },
            Ok(None) => self.default_delay,
            Err(failure) => return failure,
        };

        info!(recovery_type = %recovery_type, "Performing recovery action");
        tokio::time::sleep(delay).await;

        ActionResult::success(format!("Recovery action {recovery_type} completed."))
    }
}
