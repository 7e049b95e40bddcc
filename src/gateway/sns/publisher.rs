use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_sns::Client;
use aws_sdk_sns::types::MessageAttributeValue;
use tracing::info;
use crate::core::events::LoadedEvent;
use crate::core::library::{ErrorKind, LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;

// SNSPublisher sends each event to the topic of the same name. Topics must be
// registered first so their arns are known.
#[derive(Debug)]
pub struct SNSPublisher {
    client: Client,
    topic_arns: HashMap<String, String>,
}

impl SNSPublisher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            topic_arns: HashMap::new(),
        }
    }
}

fn text(value: impl Into<String>) -> MessageAttributeValue {
    MessageAttributeValue::builder().data_type("String").string_value(value).build()
}

#[async_trait]
impl EventPublisher for SNSPublisher {
    // create_topic is idempotent, so registering again returns the same arn
    async fn register(&mut self, topic: &str) -> LibraryResult<String> {
        let out = self.client.create_topic().name(topic).send().await?;
        let arn = out.topic_arn().unwrap_or_default().to_string();
        info!(topic, arn = arn.as_str(), "registered topic");
        self.topic_arns.insert(topic.to_string(), arn.clone());
        Ok(arn)
    }

    async fn publish(&self, event: &LoadedEvent) -> LibraryResult<()> {
        let arn = self.topic_arns.get(event.topic.as_str()).ok_or_else(|| {
            LibraryError::new(ErrorKind::Gateway, format!("topic {} is not registered", event.topic))
        })?;
        self.client.publish()
            .topic_arn(arn)
            .subject(event.topic.as_str())
            .message(serde_json::to_string(event)?)
            .message_attributes("branch", text(event.branch_id.as_str()))
            .message_attributes("revision", text(event.revision.to_string()))
            .send()
            .await?;
        Ok(())
    }
}
