use tokio::sync::broadcast;

use super::registry::SubscriptionId;
use super::types::LifecycleEvent;
use crate::models::DraftEntity;

/// Fans draft lifecycle events out to async consumers over a broadcast channel
#[derive(Debug, Clone)]
pub struct LifecyclePublisher {
    sender: broadcast::Sender<LifecycleEvent>,
}

impl LifecyclePublisher {
    /// Create a new publisher with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Forward every event emitted by `draft` onto this channel
    pub fn attach(&self, draft: &DraftEntity) -> SubscriptionId {
        let sender = self.sender.clone();
        draft.on_any(move |event| {
            // No receivers is fine, events are fire-and-forget
            let _ = sender.send(event.clone());
        })
    }

    /// Publish an event directly
    pub fn publish(&self, event: LifecycleEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("Lifecycle event dropped, no subscribers");
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LifecyclePublisher {
    fn default() -> Self {
        Self::new(crate::constants::system::DEFAULT_BROADCAST_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DraftEventKind;
    use crate::models::ParentId;

    #[tokio::test]
    async fn test_attached_draft_events_reach_subscribers() {
        let publisher = LifecyclePublisher::new(16);
        let mut receiver = publisher.subscribe();
        let draft = DraftEntity::new(ParentId(7));

        publisher.attach(&draft);
        draft.trigger(DraftEventKind::Publishing);

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.kind, DraftEventKind::Publishing);
        assert_eq!(event.parent, ParentId(7));
        assert_eq!(publisher.subscriber_count(), 1);
    }

    #[test]
    fn test_publish_without_subscribers_is_harmless() {
        let publisher = LifecyclePublisher::default();
        publisher.publish(LifecycleEvent::new(
            DraftEventKind::Published,
            ParentId(1),
            None,
            true,
        ));
        assert_eq!(publisher.subscriber_count(), 0);
    }
}
