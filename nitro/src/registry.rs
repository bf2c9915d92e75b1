//! The process-wide registry set.
//!
//! Actions, probes and stage factories live together in a [`Registries`]
//! value. A process normally calls [`init_registries`] once at startup; tests
//! and embedders can instead build their own `Registries` and hand it to an
//! orchestrator directly.

use crate::actions::ActionRegistry;
use crate::config::EngineConfig;
use crate::probes::ProbeRegistry;
use crate::stages::{register_builtin_stages, StageDefinitionRegistry};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Actions, probes and stage factories used by a run.
#[derive(Debug, Default)]
pub struct Registries {
    actions: ActionRegistry,
    probes: ProbeRegistry,
    stages: StageDefinitionRegistry,
    config: EngineConfig,
}

impl Registries {
    /// Creates empty registries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates registries populated with every built-in action, probe and
    /// default stage factory.
    #[must_use]
    pub fn with_builtins(config: EngineConfig) -> Self {
        let stages = StageDefinitionRegistry::new();
        register_builtin_stages(&stages, &config);

        Self {
            actions: ActionRegistry::with_builtins(&config),
            probes: ProbeRegistry::with_builtins(),
            stages,
            config,
        }
    }

    /// Returns the action registry.
    #[must_use]
    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Returns the probe registry.
    #[must_use]
    pub fn probes(&self) -> &ProbeRegistry {
        &self.probes
    }

    /// Returns the stage factory registry.
    #[must_use]
    pub fn stages(&self) -> &StageDefinitionRegistry {
        &self.stages
    }

    /// Returns the configuration the built-ins were created from.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

static GLOBAL_REGISTRIES: RwLock<Option<Arc<Registries>>> = RwLock::new(None);

/// Installs built-in registries built from `config` as the process-wide set.
pub fn init_registries(config: EngineConfig) -> Arc<Registries> {
    let registries = Arc::new(Registries::with_builtins(config));
    install_registries(Arc::clone(&registries));
    info!(
        actions = ?registries.actions().list(),
        probes = ?registries.probes().list(),
        stages = ?registries.stages().list(),
        "Registries initialized"
    );
    registries
}

/// Installs `registries` as the process-wide set.
pub fn install_registries(registries: Arc<Registries>) {
    *GLOBAL_REGISTRIES.write() = Some(registries);
}

/// Gets the process-wide registries.
///
/// Returns empty registries if [`init_registries`] has not been called.
pub fn registries() -> Arc<Registries> {
    let read = GLOBAL_REGISTRIES.read();
    if let Some(ref registries) = *read {
        return Arc::clone(registries);
    }
    drop(read);

    let mut write = GLOBAL_REGISTRIES.write();
    Arc::clone(write.get_or_insert_with(|| Arc::new(Registries::new())))
}

/// Clears the process-wide registries.
pub fn reset_registries() {
    *GLOBAL_REGISTRIES.write() = None;
}
