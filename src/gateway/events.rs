use async_trait::async_trait;
use crate::core::events::LoadedEvent;
use crate::core::library::LibraryResult;

#[async_trait]
pub trait EventPublisher: Sync + Send {
    // register prepares delivery for a topic and returns where its events go.
    async fn register(&mut self, topic: &str) -> LibraryResult<String>;
    async fn publish(&self, event: &LoadedEvent) -> LibraryResult<()>;
}
