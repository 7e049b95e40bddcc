use crate::core::repository::RepositoryStore;
use crate::gateway::ddb::publisher::DDBPublisher;
use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::memory::publisher::MemoryPublisher;
use crate::gateway::sns::publisher::SNSPublisher;
use crate::utils::ddb::{build_db_client, build_sns_client, create_table};

pub async fn create_publisher(via: GatewayPublisherVia) -> Box<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Sns => {
            let client = build_sns_client().await;
            Box::new(SNSPublisher::new(client))
        }
        GatewayPublisherVia::LocalDynamoDB => {
            let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
            let _ = create_table(&client, "events", "event_id", Some(("topic", "branch_id"))).await;
            Box::new(DDBPublisher::new(client, "events"))
        }
        GatewayPublisherVia::InMemory => {
            Box::new(MemoryPublisher::new(64))
        }
    }
}
