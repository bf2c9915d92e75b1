//! Subscriber trait and implementations.

use parking_lot::RwLock;
use tracing::{debug, info, warn, Level};

/// Trait for receivers of progress notifications.
///
/// Subscribers are called synchronously on the publishing task and must not
/// block for long.
#[cfg_attr(test, mockall::automock)]
pub trait Subscriber: Send + Sync {
    /// Receives one notification message.
    fn update(&self, message: &str);
}

/// Rough classification of a progress message, used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    /// A stage was skipped.
    Skip,
    /// An action is about to execute.
    Execute,
    /// Anything else.
    Other,
}

impl MessageCategory {
    /// Classifies a message by its wording.
    #[must_use]
    pub fn of(message: &str) -> Self {
        if message.contains("Skipping") {
            Self::Skip
        } else if message.contains("Executing action") {
            Self::Execute
        } else {
            Self::Other
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Execute => "execute",
            Self::Other => "progress",
        }
    }
}

/// A subscriber that renders progress through the tracing framework.
#[derive(Debug, Clone)]
pub struct ProgressSubscriber {
    /// The log level to use for ordinary messages.
    level: Level,
}

impl Default for ProgressSubscriber {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl ProgressSubscriber {
    /// Creates a new progress subscriber with the specified level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level progress subscriber.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }
}

impl Subscriber for ProgressSubscriber {
    fn update(&self, message: &str) {
        let category = MessageCategory::of(message);
        // Skips are always surfaced, whatever the configured level.
        if category == MessageCategory::Skip {
            warn!(category = category.as_str(), "Test Progress: {}", message.trim());
            return;
        }
        if self.level == Level::DEBUG {
            debug!(category = category.as_str(), "Test Progress: {}", message.trim());
        } else {
            info!(category = category.as_str(), "Test Progress: {}", message.trim());
        }
    }
}

/// A collecting subscriber for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingSubscriber {
    messages: RwLock<Vec<String>>,
}

impl CollectingSubscriber {
    /// Creates a new collecting subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.read().clone()
    }

    /// Returns the number of collected messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    /// Returns true if no messages have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    /// Clears all collected messages.
    pub fn clear(&self) {
        self.messages.write().clear();
    }

    /// Returns messages containing `needle`.
    #[must_use]
    pub fn matching(&self, needle: &str) -> Vec<String> {
        self.messages
            .read()
            .iter()
            .filter(|m| m.contains(needle))
            .cloned()
            .collect()
    }
}

impl Subscriber for CollectingSubscriber {
    fn update(&self, message: &str) {
        self.messages.write().push(message.to_string());
    }
}
