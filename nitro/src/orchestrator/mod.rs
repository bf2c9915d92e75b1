//! Sequential stage orchestration.
//!
//! The [`Orchestrator`] resolves stage names into stages, walks them in
//! order and aborts on the first failing action:
//!
//! 1. A stage whose dependency has no recorded outcome is skipped. Only the
//!    presence of an outcome is checked, so a skipped or failed dependency
//!    still counts as met.
//! 2. The metrics probe fires once per attempted stage.
//! 3. An unregistered action marks the stage `unknown` and the run goes on.
//! 4. A semantic or hard action failure marks the stage `failed` and aborts.

mod builder;
mod results;

pub use builder::{TestCase, TestCaseBuilder};
pub use results::RunResults;

use crate::core::{ActionResult, Params, StageOutcome, StageState};
use crate::errors::{RunError, ACTION_EXECUTION_FAILED};
use crate::events::NotificationChannel;
use crate::observability::StageTimer;
use crate::registry::{registries, Registries};
use crate::stages::Stage;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Formats the notification published when a stage is skipped.
#[must_use]
pub fn skip_message(stage: &str, dependency: &str) -> String {
    format!("Skipping action: {stage} due to unmet dependency: {dependency}")
}

/// Runs an ordered list of stages against one set of run parameters.
#[derive(Debug)]
pub struct Orchestrator {
    name: Option<String>,
    stage_names: Vec<String>,
    params: Params,
    registries: Arc<Registries>,
    channel: Arc<NotificationChannel>,
    results: RunResults,
    stages: Vec<Stage>,
}

impl Orchestrator {
    /// Creates an orchestrator over the process-wide registries, publishing
    /// progress through a [`ProgressSubscriber`](crate::events::ProgressSubscriber).
    #[must_use]
    pub fn new<S: Into<String>>(stage_names: impl IntoIterator<Item = S>, params: Params) -> Self {
        Self {
            name: None,
            stage_names: stage_names.into_iter().map(Into::into).collect(),
            params,
            registries: registries(),
            channel: Arc::new(NotificationChannel::with_progress()),
            results: RunResults::new(),
            stages: Vec::new(),
        }
    }

    /// Creates an orchestrator for a named test case.
    #[must_use]
    pub fn from_test_case(case: TestCase, params: Params) -> Self {
        let mut orchestrator = Self::new(case.stages, params);
        orchestrator.name = Some(case.name);
        orchestrator
    }

    /// Uses `registries` instead of the process-wide set.
    #[must_use]
    pub fn with_registries(mut self, registries: Arc<Registries>) -> Self {
        self.registries = registries;
        self
    }

    /// Publishes progress through `channel`.
    #[must_use]
    pub fn with_channel(mut self, channel: Arc<NotificationChannel>) -> Self {
        self.channel = channel;
        self
    }

    /// Returns the test case name, if created from one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the requested stage names.
    #[must_use]
    pub fn stage_names(&self) -> &[String] {
        &self.stage_names
    }

    /// Returns the notification channel.
    #[must_use]
    pub fn channel(&self) -> &Arc<NotificationChannel> {
        &self.channel
    }

    /// Returns the result map of the latest run, complete or aborted.
    #[must_use]
    pub fn results(&self) -> &RunResults {
        &self.results
    }

    /// Returns the stages attempted by the latest run.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Returns an attempted stage by name.
    #[must_use]
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name() == name)
    }

    /// Runs every stage in order.
    ///
    /// Each call starts from an empty result map.
    ///
    /// # Returns
    ///
    /// One outcome per attempted stage, in order. Names without a registered
    /// factory are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::StageFailed`] as soon as an action fails; later
    /// stages are not attempted.
    pub async fn execute(&mut self) -> Result<Vec<StageOutcome>, RunError> {
        self.results.clear();
        self.stages.clear();

        let definitions = self
            .registries
            .stages()
            .resolve(&self.stage_names, &self.params);
        info!(
            run = self.name.as_deref().unwrap_or("-"),
            requested = self.stage_names.len(),
            resolved = definitions.len(),
            "Starting run"
        );

        let mut outcomes = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let mut stage = Stage::new(definition).with_observer(Arc::clone(&self.channel));
            let attempt = self.run_stage(&mut stage, &mut outcomes).await;
            self.stages.push(stage);

            if let Err(err) = attempt {
                error!(error = %err, "Run aborted");
                return Err(err);
            }
        }

        info!(stages = outcomes.len(), "Run finished");
        Ok(outcomes)
    }

    async fn run_stage(
        &mut self,
        stage: &mut Stage,
        outcomes: &mut Vec<StageOutcome>,
    ) -> Result<(), RunError> {
        let name = stage.name().to_string();
        debug!(stage = %name, definition = ?stage.definition(), "Executing stage");

        if let Some(dependency) = stage
            .depends_on()
            .filter(|dep| !self.results.contains(dep))
            .map(str::to_string)
        {
            self.channel.notify(&skip_message(&name, &dependency));
            stage.set_state(StageState::Skipped)?;
            self.record(outcomes, name.clone(), StageOutcome::skipped(name, dependency));
            return Ok(());
        }

        stage.mark_started();
        let timer = StageTimer::start(&name);
        self.trigger_metrics_probe();

        let action_id = stage.action().to_string();
        let Some(action) = self.registries.actions().lookup(&action_id) else {
            warn!(stage = %name, action = %action_id, "Unknown action");
            let outcome = StageOutcome::unknown(&action_id);
            self.channel.notify(&outcome.to_string());
            stage.set_state(StageState::Unknown)?;
            stage.set_error(outcome.to_string());
            stage.mark_finished(timer.finish());
            self.record(outcomes, name, outcome);
            return Ok(());
        };

        let params_json = serde_json::to_string(stage.params()).unwrap_or_default();
        self.channel
            .notify(&format!("Executing action: {action_id} with params: {params_json}"));
        let result = action.execute(stage.params()).await;
        stage.mark_finished(timer.finish());

        match result {
            ActionResult::Success(value) => {
                self.channel.notify(&format!("Action {action_id} completed."));
                stage.set_state(StageState::Completed)?;
                stage.set_result(value.clone());
                self.record(outcomes, name, StageOutcome::completed(value));
                Ok(())
            }
            ActionResult::SemanticFailure(value) => {
                self.channel.notify(&format!(
                    "Action {action_id} reported failure with result: {value}"
                ));
                self.channel.notify(&format!(
                    "Action {action_id} failed with error: {ACTION_EXECUTION_FAILED}"
                ));
                stage.set_result(value.clone());
                stage.set_state(StageState::Failed)?;
                stage.set_error(ACTION_EXECUTION_FAILED);
                self.record(outcomes, name.clone(), StageOutcome::failed(ACTION_EXECUTION_FAILED));
                Err(RunError::semantic_failure(name, value))
            }
            ActionResult::HardFailure(message) => {
                self.channel.notify(&format!(
                    "Action {action_id} failed with error: {message}"
                ));
                stage.set_state(StageState::Failed)?;
                stage.set_error(message.clone());
                self.record(outcomes, name.clone(), StageOutcome::failed(message.clone()));
                Err(RunError::stage_failed(name, message))
            }
        }
    }

    fn trigger_metrics_probe(&self) {
        let probe_id = &self.registries.config().metrics_probe;
        match self.registries.probes().lookup(probe_id) {
            Some(probe) => probe.execute(),
            None => warn!(probe = %probe_id, "Metrics probe not registered"),
        }
    }

    fn record(&mut self, outcomes: &mut Vec<StageOutcome>, stage: String, outcome: StageOutcome) {
        outcomes.push(outcome.clone());
        self.results.insert(stage, outcome);
    }
}
