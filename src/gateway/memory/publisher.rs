use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;
use crate::core::events::LoadedEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;

// MemoryPublisher fans events out to in-process subscribers over a broadcast channel.
// Clones share the channel, so a host can keep one clone to subscribe from while a
// provider owns another.
#[derive(Debug, Clone)]
pub struct MemoryPublisher {
    sender: broadcast::Sender<LoadedEvent>,
}

impl MemoryPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LoadedEvent> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    // every topic shares the one channel
    async fn register(&mut self, topic: &str) -> LibraryResult<String> {
        Ok(topic.to_string())
    }

    // Publishing with nobody listening is not an error.
    async fn publish(&self, event: &LoadedEvent) -> LibraryResult<()> {
        let receivers = self.sender.send(event.clone()).unwrap_or(0);
        debug!(topic = event.topic.as_str(), receivers, "published event");
        Ok(())
    }
}
