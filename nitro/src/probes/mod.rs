//! Instrumentation probes.
//!
//! A probe is a side-effect-only hook invoked around stage execution. The
//! orchestrator triggers the metrics probe once per stage attempt.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Identifier of the built-in metrics probe.
pub const METRICS: &str = "metrics";
/// Identifier of the built-in logging probe.
pub const LOGGING: &str = "logging";
/// Identifier of the built-in debug probe.
pub const DEBUG: &str = "debug";

/// Trait for instrumentation probes.
#[cfg_attr(test, mockall::automock)]
pub trait Probe: Send + Sync {
    /// Runs the probe for its side effects.
    fn execute(&self);
}

/// Probe that records how many stage attempts it has observed.
#[derive(Debug, Default)]
pub struct MetricsProbe {
    collected: AtomicUsize,
}

impl MetricsProbe {
    /// Creates a new metrics probe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times metrics were collected.
    #[must_use]
    pub fn collected(&self) -> usize {
        self.collected.load(Ordering::Relaxed)
    }
}

impl Probe for MetricsProbe {
    fn execute(&self) {
        let count = self.collected.fetch_add(1, Ordering::Relaxed) + 1;
        info!(probe = METRICS, collected = count, "Collecting metrics");
    }
}

/// Probe that logs execution details.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingProbe;

impl Probe for LoggingProbe {
    fn execute(&self) {
        info!(probe = LOGGING, "Logging execution details");
    }
}

/// Probe that emits debug output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugProbe;

impl Probe for DebugProbe {
    fn execute(&self) {
        debug!(probe = DEBUG, "Debugging test execution");
    }
}

/// Registry mapping probe identifiers to probes.
#[derive(Default)]
pub struct ProbeRegistry {
    probes: RwLock<HashMap<String, Arc<dyn Probe>>>,
}

impl ProbeRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the `metrics`, `logging` and `debug` probes.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(METRICS, Arc::new(MetricsProbe::new()));
        registry.register(LOGGING, Arc::new(LoggingProbe));
        registry.register(DEBUG, Arc::new(DebugProbe));
        registry
    }

    /// Registers a probe, replacing any previous one with the same identifier.
    pub fn register(&self, id: impl Into<String>, probe: Arc<dyn Probe>) {
        let id = id.into();
        debug!(probe = %id, "Registering probe");
        self.probes.write().insert(id, probe);
    }

    /// Removes a probe. Returns false if it was not registered.
    pub fn unregister(&self, id: &str) -> bool {
        let removed = self.probes.write().remove(id).is_some();
        if !removed {
            warn!(probe = %id, "Probe not found");
        }
        removed
    }

    /// Looks up a probe by identifier.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<Arc<dyn Probe>> {
        self.probes.read().get(id).cloned()
    }

    /// Looks up several probes, dropping unknown identifiers.
    #[must_use]
    pub fn resolve_many<S: AsRef<str>>(&self, ids: &[S]) -> Vec<Arc<dyn Probe>> {
        let probes = self.probes.read();
        ids.iter()
            .filter_map(|id| probes.get(id.as_ref()).cloned())
            .collect()
    }

    /// Lists registered probe identifiers, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.probes.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Clears all registered probes.
    pub fn clear(&self) {
        self.probes.write().clear();
    }
}

impl std::fmt::Debug for ProbeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeRegistry")
            .field("probes", &self.list())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        let registry = ProbeRegistry::with_builtins();
        assert_eq!(registry.list(), vec!["debug", "logging", "metrics"]);
        assert!(registry.lookup(METRICS).is_some());
        assert!(registry.lookup("tracing").is_none());
    }

    #[test]
    fn test_metrics_probe_counts() {
        let probe = MetricsProbe::new();
        probe.execute();
        probe.execute();
        assert_eq!(probe.collected(), 2);
    }

    #[test]
    fn test_builtin_probes_run() {
        LoggingProbe.execute();
        DebugProbe.execute();
        // Should not panic
    }

    #[test]
    fn test_resolve_many_drops_unknown() {
        let registry = ProbeRegistry::new();
        let mut metrics = MockProbe::new();
        metrics.expect_execute().times(1).return_const(());
        let mut debug = MockProbe::new();
        debug.expect_execute().times(1).return_const(());
        registry.register(METRICS, Arc::new(metrics));
        registry.register(DEBUG, Arc::new(debug));

        let probes = registry.resolve_many(&["metrics", "nope", "debug"]);
        assert_eq!(probes.len(), 2);
        for probe in probes {
            probe.execute();
        }
    }

    #[test]
    fn test_register_replaces_and_unregister() {
        let registry = ProbeRegistry::new();
        let mut replaced = MockProbe::new();
        replaced.expect_execute().never();
        let mut current = MockProbe::new();
        current.expect_execute().times(1).return_const(());

        registry.register(LOGGING, Arc::new(replaced));
        registry.register(LOGGING, Arc::new(current));
        registry.lookup(LOGGING).unwrap().execute();

        assert!(registry.unregister(LOGGING));
        assert!(!registry.unregister(LOGGING));
        assert!(registry.lookup(LOGGING).is_none());
    }
}
