//! Engine configuration.
//!
//! Holds the failure sentinels of the built-in actions and the defaults the
//! built-in stage factories fall back to when a run parameter is absent.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for built-in actions and stage factories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// URL that makes the `http` action report a semantic failure.
    #[serde(default = "default_http_failure_url")]
    pub http_failure_url: String,
    /// Duration that makes the `sleep` action report a semantic failure.
    #[serde(default = "default_sleep_failure_seconds")]
    pub sleep_failure_seconds: f64,
    /// URL used by `http_get` when the run has no `http_url`.
    #[serde(default = "default_http_url")]
    pub default_http_url: String,
    /// Path used by `read_file` when the run has no `file_path`.
    #[serde(default = "default_file_path")]
    pub default_file_path: String,
    /// Delay used by `recovery` when the stage has no `recovery_delay`.
    #[serde(default = "default_recovery_delay")]
    pub default_recovery_delay_seconds: f64,
    /// Probe invoked before every stage attempt.
    #[serde(default = "default_metrics_probe")]
    pub metrics_probe: String,
}

fn default_http_failure_url() -> String {
    "https://simulate-failure.com".to_string()
}

fn default_sleep_failure_seconds() -> f64 {
    2.0
}

fn default_http_url() -> String {
    "https://httpbin.org/get".to_string()
}

fn default_file_path() -> String {
    "test_file.txt".to_string()
}

fn default_recovery_delay() -> f64 {
    1.0
}

fn default_metrics_probe() -> String {
    "metrics".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            http_failure_url: default_http_failure_url(),
            sleep_failure_seconds: default_sleep_failure_seconds(),
            default_http_url: default_http_url(),
            default_file_path: default_file_path(),
            default_recovery_delay_seconds: default_recovery_delay(),
            metrics_probe: default_metrics_probe(),
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that durations are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_recovery_delay_seconds.is_finite()
            || self.default_recovery_delay_seconds < 0.0
        {
            return Err(ConfigError::invalid_value(
                "default_recovery_delay_seconds",
                "must be a non-negative number of seconds",
            ));
        }
        if self.metrics_probe.is_empty() {
            return Err(ConfigError::invalid_value("metrics_probe", "must not be empty"));
        }
        Ok(())
    }

    /// Sets the `http` failure sentinel.
    #[must_use]
    pub fn with_http_failure_url(mut self, url: impl Into<String>) -> Self {
        self.http_failure_url = url.into();
        self
    }

    /// Sets the `sleep` failure sentinel.
    #[must_use]
    pub fn with_sleep_failure_seconds(mut self, seconds: f64) -> Self {
        self.sleep_failure_seconds = seconds;
        self
    }

    /// Sets the default URL for `http_get`.
    #[must_use]
    pub fn with_default_http_url(mut self, url: impl Into<String>) -> Self {
        self.default_http_url = url.into();
        self
    }

    /// Sets the default path for `read_file`.
    #[must_use]
    pub fn with_default_file_path(mut self, path: impl Into<String>) -> Self {
        self.default_file_path = path.into();
        self
    }

    /// Sets the default recovery delay.
    ///
    /// The value is not checked here: [`validate`](Self::validate) rejects a
    /// negative or non-finite delay, and [`default_recovery_delay`](Self::default_recovery_delay)
    /// reads such a value as zero.
    #[must_use]
    pub fn with_default_recovery_delay(mut self, seconds: f64) -> Self {
        self.default_recovery_delay_seconds = seconds;
        self
    }

    /// Gets the default recovery delay as a Duration.
    ///
    /// A negative or non-finite setting is clamped to [`Duration::ZERO`].
    #[must_use]
    pub fn default_recovery_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.default_recovery_delay_seconds).unwrap_or_default()
    }
}
