//! Topic-based event bus implementation.

use std::collections::HashMap;

use combat_core::CombatEvent;
use tokio::sync::broadcast;

use super::Topic;

/// Broadcast bus with one channel per topic.
///
/// Channels are created up front and never change, so publishing and
/// subscribing are lock-free `&self` operations. Delivery is best-effort:
/// a topic without subscribers simply drops its events.
pub struct EventBus {
    channels: HashMap<Topic, broadcast::Sender<CombatEvent>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with the given capacity per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();
        Self { channels }
    }

    /// Publish an event under its topic.
    pub fn publish(&self, event: CombatEvent) {
        let topic = Topic::of(&event);
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - normal, not an error.
            tracing::trace!(?topic, "no subscribers for topic");
        }
    }

    /// Subscribe to a single topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CombatEvent> {
        self.channels
            .get(&topic)
            .expect("topic channel is created at construction")
            .subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
