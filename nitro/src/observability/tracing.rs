//! Tracing subscriber setup and stage timing.

use std::time::Instant;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "nitro=info,warn";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Installs a global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
/// Returns false if a global subscriber was already installed.
pub fn init_tracing(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Compact => registry
            .with(fmt::layer().with_target(true).compact())
            .try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    result.is_ok()
}

/// Measures how long a stage attempt takes.
#[derive(Debug)]
pub struct StageTimer {
    start: Instant,
    stage: String,
}

impl StageTimer {
    /// Starts a new timer.
    #[must_use]
    pub fn start(stage: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            stage: stage.into(),
        }
    }

    /// Returns the elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Returns the stage name.
    #[must_use]
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Stops the timer and returns the duration in milliseconds.
    #[must_use]
    pub fn finish(self) -> f64 {
        let duration_ms = self.elapsed_ms();
        tracing::debug!(stage = %self.stage, duration_ms, "Stage attempt finished");
        duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_timer() {
        let timer = StageTimer::start("sleep_2s");
        assert_eq!(timer.stage(), "sleep_2s");
        std::thread::sleep(std::time::Duration::from_millis(10));
        let duration = timer.finish();
        assert!(duration >= 10.0);
    }

    #[test]
    fn test_init_tracing_twice() {
        // Whichever call wins, the second one must not panic.
        let _ = init_tracing(LogFormat::Compact);
        assert!(!init_tracing(LogFormat::Json));
    }
}
