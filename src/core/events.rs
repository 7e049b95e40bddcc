use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::serializer;

// LoadedEvent announces that a provider swapped in a new snapshot. The topic is
// catalog_loaded or transactions_loaded.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoadedEvent {
    pub event_id: String,
    pub topic: String,
    pub branch_id: String,
    pub count: usize,
    pub revision: u64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl LoadedEvent {
    pub fn new(topic: &str, branch_id: &str, count: usize, revision: u64) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            branch_id: branch_id.to_string(),
            count,
            revision,
            created_at: Utc::now().naive_utc(),
        }
    }
}
