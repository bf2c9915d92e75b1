//! Mock actions and probes for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::actions::Action;
use crate::core::{ActionResult, Params};
use crate::probes::Probe;

/// An action that records calls and returns a fixed result.
#[derive(Debug)]
pub struct StaticAction {
    result: Mutex<ActionResult>,
    delay: Option<Duration>,
    calls: Mutex<Vec<Params>>,
}

impl StaticAction {
    /// Creates an action returning `result`.
    #[must_use]
    pub fn new(result: ActionResult) -> Self {
        Self {
            result: Mutex::new(result),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates an action that succeeds with `value`.
    #[must_use]
    pub fn success(value: impl Into<serde_json::Value>) -> Self {
        Self::new(ActionResult::success(value))
    }

    /// Creates an action that reports a semantic failure with `value`.
    #[must_use]
    pub fn semantic_failure(value: impl Into<serde_json::Value>) -> Self {
        Self::new(ActionResult::semantic_failure(value))
    }

    /// Creates an action that fails hard with `message`.
    #[must_use]
    pub fn hard_failure(message: impl Into<String>) -> Self {
        Self::new(ActionResult::hard_failure(message))
    }

    /// Sleeps for `delay` before returning.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replaces the result to return.
    pub fn set_result(&self, result: ActionResult) {
        *self.result.lock() = result;
    }

    /// Returns the number of times the action was executed.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns the parameters of each call.
    #[must_use]
    pub fn recorded_params(&self) -> Vec<Params> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Action for StaticAction {
    async fn execute(&self, params: &Params) -> ActionResult {
        self.calls.lock().push(params.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.lock().clone()
    }
}

/// A probe that counts its invocations.
#[derive(Debug, Default)]
pub struct CountingProbe {
    count: AtomicUsize,
}

impl CountingProbe {
    /// Creates a new counting probe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of invocations.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Probe for CountingProbe {
    fn execute(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
