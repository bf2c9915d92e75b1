//! Stage lifecycle state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle state of a stage.
///
/// Every stage starts in `NotStarted` and moves at most once into one of the
/// terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    /// Stage has not been attempted yet.
    NotStarted,
    /// Stage was skipped because its dependency had no recorded outcome.
    Skipped,
    /// Stage action failed.
    Failed,
    /// Stage action succeeded.
    Completed,
    /// Stage action identifier could not be resolved.
    Unknown,
}

impl Default for StageState {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::Skipped => write!(f, "skipped"),
            Self::Failed => write!(f, "failed"),
            Self::Completed => write!(f, "completed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl StageState {
    /// Returns true if no transition may leave this state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::NotStarted)
    }
}
