//! Registry of stage factories.

use super::StageDefinition;
use crate::core::Params;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Factory producing a stage definition from run parameters.
pub type StageFactory = Arc<dyn Fn(&Params) -> StageDefinition + Send + Sync>;

/// Registry mapping stage names to factories.
#[derive(Default)]
pub struct StageDefinitionRegistry {
    factories: RwLock<HashMap<String, StageFactory>>,
}

impl StageDefinitionRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory, replacing any previous one with the same name.
    pub fn register<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Params) -> StageDefinition + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(stage = %name, "Registering stage factory");
        self.factories.write().insert(name, Arc::new(factory));
    }

    /// Removes a factory. Returns false if it was not registered.
    pub fn unregister(&self, name: &str) -> bool {
        if self.factories.write().remove(name).is_some() {
            info!(stage = %name, "Stage factory unregistered");
            true
        } else {
            warn!(stage = %name, "Stage factory not found");
            false
        }
    }

    /// Looks up a factory by stage name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<StageFactory> {
        self.factories.read().get(name).cloned()
    }

    /// Builds a stage definition with the named factory.
    #[must_use]
    pub fn create(&self, name: &str, params: &Params) -> Option<StageDefinition> {
        match self.lookup(name) {
            Some(factory) => Some(factory(params)),
            None => {
                warn!(stage = %name, "Factory for stage not found");
                None
            }
        }
    }

    /// Builds definitions for `names` in order, omitting unregistered names.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, names: &[S], params: &Params) -> Vec<StageDefinition> {
        names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let factory = self.lookup(name);
                if factory.is_none() {
                    warn!(stage = %name, "Stage not found, omitting it from the run");
                }
                factory.map(|f| f(params))
            })
            .collect()
    }

    /// Checks whether a factory is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.read().contains_key(name)
    }

    /// Lists registered stage names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Clears all registered factories.
    pub fn clear(&self) {
        self.factories.write().clear();
    }
}

impl std::fmt::Debug for StageDefinitionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageDefinitionRegistry")
            .field("stages", &self.list())
            .finish()
    }
}
