//! Publish/subscribe notification channel.
//!
//! Stages and the orchestrator publish human-readable progress messages to a
//! [`NotificationChannel`]. Delivery is synchronous: every attached
//! subscriber has received a message before `notify` returns.

mod sink;

#[cfg(test)]
pub use sink::MockSubscriber;
pub use sink::{CollectingSubscriber, MessageCategory, ProgressSubscriber, Subscriber};

use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Handle returned by [`NotificationChannel::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A synchronous multi-subscriber broadcast channel.
#[derive(Default)]
pub struct NotificationChannel {
    subscribers: RwLock<Vec<(SubscriberId, Arc<dyn Subscriber>)>>,
}

impl NotificationChannel {
    /// Creates a channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a channel with a [`ProgressSubscriber`] attached.
    #[must_use]
    pub fn with_progress() -> Self {
        let channel = Self::new();
        channel.attach(Arc::new(ProgressSubscriber::default()));
        channel
    }

    /// Attaches a subscriber.
    pub fn attach(&self, subscriber: Arc<dyn Subscriber>) -> SubscriberId {
        let id = SubscriberId::new();
        self.subscribers.write().push((id, subscriber));
        id
    }

    /// Detaches a subscriber. Returns false if it was not attached.
    pub fn detach(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Returns the number of attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Delivers a message to every subscriber, in attachment order.
    pub fn notify(&self, message: &str) {
        // Snapshot so subscribers may attach/detach from inside `update`.
        let subscribers: Vec<_> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, s)| Arc::clone(s))
            .collect();

        for subscriber in subscribers {
            subscriber.update(message);
        }
    }
}

impl std::fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_notify_reaches_every_subscriber() {
        let channel = NotificationChannel::new();
        let first = Arc::new(CollectingSubscriber::new());
        let second = Arc::new(CollectingSubscriber::new());
        channel.attach(first.clone());
        channel.attach(second.clone());

        channel.notify("hello");

        assert_eq!(first.messages(), vec!["hello"]);
        assert_eq!(second.messages(), vec!["hello"]);
    }

    #[test]
    fn test_detach() {
        let channel = NotificationChannel::new();
        let subscriber = Arc::new(CollectingSubscriber::new());
        let id = channel.attach(subscriber.clone());

        assert!(channel.detach(id));
        assert!(!channel.detach(id));
        assert_eq!(channel.subscriber_count(), 0);

        channel.notify("dropped");
        assert!(subscriber.is_empty());
    }

    #[test]
    fn test_mock_subscriber_receives_in_order() {
        let mut mock = MockSubscriber::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_update()
            .with(eq("one"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        mock.expect_update()
            .with(eq("two"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let channel = NotificationChannel::new();
        channel.attach(Arc::new(mock));
        channel.notify("one");
        channel.notify("two");
    }

    #[test]
    fn test_with_progress() {
        let channel = NotificationChannel::with_progress();
        assert_eq!(channel.subscriber_count(), 1);
        channel.notify("Action http completed.");
    }
}
