use tokio::sync::broadcast;

use super::event::DiaryEvent;

/// Buffered events per subscriber before lagging ones start missing events.
const CHANNEL_CAPACITY: usize = 64;

/// Single dispatcher for [`DiaryEvent`]s.
#[derive(Debug, Clone)]
pub struct EventHub {
    sender: broadcast::Sender<DiaryEvent>,
}

impl EventHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DiaryEvent> {
        self.sender.subscribe()
    }

    /// Publishes to every current subscriber.
    pub fn publish(&self, event: DiaryEvent) {
        tracing::trace!(?event, "publishing diary event");
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn deleted() -> DiaryEvent {
        DiaryEvent::ItemDeleted {
            meal_id: Uuid::new_v4(),
            item_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_publish_without_subscribers() {
        let hub = EventHub::new();
        assert_eq!(hub.subscriber_count(), 0);
        hub.publish(deleted());
    }

    #[tokio::test]
    async fn test_every_subscriber_receives() {
        let hub = EventHub::new();
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        let event = deleted();
        hub.publish(event.clone());

        assert_eq!(rx1.recv().await.unwrap(), event);
        assert_eq!(rx2.try_recv().unwrap(), event);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_events() {
        let hub = EventHub::new();
        hub.publish(deleted());

        let mut rx = hub.subscribe();
        assert!(rx.try_recv().is_err());
    }
}
