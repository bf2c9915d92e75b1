//! Pluggable stage actions.
//!
//! An action is looked up by its string identifier and executed with the
//! stage's parameters. The registry holds exactly one implementation per
//! identifier; the last registration wins.

mod builtin;

pub use builtin::{
    FileReadAction, HttpAction, RecoveryAction, SleepAction, FILE_NOT_FOUND, FILE_READ, HTTP,
    RECOVERY, SLEEP,
};

use crate::config::EngineConfig;
use crate::core::{ActionResult, Params};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Trait for stage actions.
#[async_trait]
pub trait Action: Send + Sync {
    /// Executes the action with the stage's parameters.
    ///
    /// # Returns
    ///
    /// `Success` with the action's value, `SemanticFailure` when the action
    /// ran but did not succeed, or `HardFailure` when it could not run.
    async fn execute(&self, params: &Params) -> ActionResult;
}

/// Registry mapping action identifiers to implementations.
#[derive(Default)]
pub struct ActionRegistry {
    actions: RwLock<HashMap<String, Arc<dyn Action>>>,
}

impl ActionRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the `http`, `file_read`, `sleep` and
    /// `recovery` actions configured from `config`.
    #[must_use]
    pub fn with_builtins(config: &EngineConfig) -> Self {
        let registry = Self::new();
        registry.register(HTTP, Arc::new(HttpAction::new(&config.http_failure_url)));
        registry.register(FILE_READ, Arc::new(FileReadAction));
        registry.register(SLEEP, Arc::new(SleepAction::new(config.sleep_failure_seconds)));
        registry.register(
            RECOVERY,
            Arc::new(RecoveryAction::new(config.default_recovery_delay())),
        );
        registry
    }

    /// Registers an action, replacing any previous one with the same identifier.
    pub fn register(&self, id: impl Into<String>, action: Arc<dyn Action>) {
        let id = id.into();
        debug!(action = %id, "Registering action");
        self.actions.write().insert(id, action);
    }

    /// Removes an action. Returns false if it was not registered.
    pub fn unregister(&self, id: &str) -> bool {
        let removed = self.actions.write().remove(id).is_some();
        if !removed {
            warn!(action = %id, "Action not found");
        }
        removed
    }

    /// Looks up an action by identifier.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<Arc<dyn Action>> {
        self.actions.read().get(id).cloned()
    }

    /// Checks whether an action is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.actions.read().contains_key(id)
    }

    /// Lists registered action identifiers, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.actions.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Clears all registered actions.
    pub fn clear(&self) {
        self.actions.write().clear();
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.list())
            .finish()
    }
}
