//! Built-in stage factories.

use super::{StageDefinition, StageDefinitionRegistry};
use crate::actions::{FILE_READ, HTTP, RECOVERY, SLEEP};
use crate::config::EngineConfig;
use crate::core::{param_str_or, Params};

/// Name of the HTTP GET stage.
pub const HTTP_GET: &str = "http_get";
/// Name of the two-second sleep stage.
pub const SLEEP_2S: &str = "sleep_2s";
/// Name of the file-reading stage.
pub const READ_FILE: &str = "read_file";
/// Name of the database recovery stage.
pub const RECOVER_DB: &str = "recover_db";
/// Name of the metrics stage.
pub const METRICS_STAGE: &str = "metrics_stage";
/// Name of the demo graphs stage.
pub const GRAPHS_STAGE: &str = "graphs_stage";
/// Name of the demo report stage.
pub const REPORT_STAGE: &str = "report_stage";

/// `http_get`: requests the run's `http_url`.
pub fn http_get(config: &EngineConfig) -> impl Fn(&Params) -> StageDefinition + Send + Sync + 'static {
    let default_url = config.default_http_url.clone();
    move |params: &Params| {
        StageDefinition::new(HTTP_GET, HTTP)
            .with_param("url", param_str_or(params, "http_url", &default_url))
    }
}

/// `sleep_2s`: sleeps for two seconds.
pub fn sleep_2s(_params: &Params) -> StageDefinition {
    StageDefinition::new(SLEEP_2S, SLEEP).with_param("seconds", 2)
}

/// `read_file`: reads the run's `file_path`.
pub fn read_file(config: &EngineConfig) -> impl Fn(&Params) -> StageDefinition + Send + Sync + 'static {
    let default_path = config.default_file_path.clone();
    move |params: &Params| {
        StageDefinition::new(READ_FILE, FILE_READ)
            .with_param("filepath", param_str_or(params, "file_path", &default_path))
    }
}

/// `recover_db`: restarts the database.
pub fn recover_db(_params: &Params) -> StageDefinition {
    StageDefinition::new(RECOVER_DB, RECOVERY).with_param("recovery_type", "Restart Database")
}

/// `metrics_stage`: sleeps for one second once `dependent_strategy` has run.
pub fn metrics_stage(_params: &Params) -> StageDefinition {
    StageDefinition::new(METRICS_STAGE, SLEEP)
        .with_param("seconds", 1)
        .depends_on("dependent_strategy")
}

/// `graphs_stage`: bound to the unregistered `graph` action.
pub fn graphs_stage(_params: &Params) -> StageDefinition {
    StageDefinition::new(GRAPHS_STAGE, "graph")
        .with_param("graph_type", "bar")
        .depends_on(METRICS_STAGE)
}

/// `report_stage`: bound to the unregistered `generate_report` action.
pub fn report_stage(_params: &Params) -> StageDefinition {
    StageDefinition::new(REPORT_STAGE, "generate_report")
        .with_param("report_type", "macro")
        .depends_on(GRAPHS_STAGE)
}

/// Registers the default stage factories.
pub fn register_builtin_stages(registry: &StageDefinitionRegistry, config: &EngineConfig) {
    registry.register(HTTP_GET, http_get(config));
    registry.register(SLEEP_2S, sleep_2s);
    registry.register(READ_FILE, read_file(config));
    registry.register(RECOVER_DB, recover_db);
    registry.register(METRICS_STAGE, metrics_stage);
}

/// Registers the demo stages, whose actions are not registered by default.
pub fn register_demo_stages(registry: &StageDefinitionRegistry) {
    registry.register(GRAPHS_STAGE, graphs_stage);
    registry.register(REPORT_STAGE, report_stage);
}
