use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use crate::core::events::LoadedEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;
use crate::utils::ddb::date_value;

// DDBPublisher appends every event to one table, so a local stack can replay the
// load history without SNS.
#[derive(Debug)]
pub struct DDBPublisher {
    client: Client,
    table_name: String,
}

impl DDBPublisher {
    pub fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

// events are keyed by event_id, and the (topic, branch_id) index lists the loads of a branch
fn event_item(event: &LoadedEvent) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("event_id".to_string(), AttributeValue::S(event.event_id.clone())),
        ("topic".to_string(), AttributeValue::S(event.topic.clone())),
        ("branch_id".to_string(), AttributeValue::S(event.branch_id.clone())),
        ("count".to_string(), AttributeValue::N(event.count.to_string())),
        ("revision".to_string(), AttributeValue::N(event.revision.to_string())),
        ("created_at".to_string(), date_value(event.created_at)),
    ])
}

#[async_trait]
impl EventPublisher for DDBPublisher {
    async fn register(&mut self, _topic: &str) -> LibraryResult<String> {
        Ok(self.table_name.clone())
    }

    async fn publish(&self, event: &LoadedEvent) -> LibraryResult<()> {
        self.client
            .put_item()
            .table_name(self.table_name.as_str())
            .condition_expression("attribute_not_exists(event_id)")
            .set_item(Some(event_item(event)))
            .send()
            .await?;
        Ok(())
    }
}
