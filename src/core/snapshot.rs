use std::sync::Arc;
use tokio::sync::{RwLock, watch};

// Snapshot holds an immutable list that is swapped wholesale, so readers always see
// one consistent version. Every swap bumps a revision published on a watch channel.
#[derive(Debug)]
pub struct Snapshot<T> {
    records: RwLock<Arc<Vec<T>>>,
    revision: watch::Sender<u64>,
}

impl<T> Snapshot<T> {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            records: RwLock::new(Arc::new(vec![])),
            revision,
        }
    }

    pub async fn current(&self) -> Arc<Vec<T>> {
        self.records.read().await.clone()
    }

    // replace installs the new records and returns the new revision.
    pub async fn replace(&self, records: Vec<T>) -> u64 {
        let mut current = self.records.write().await;
        *current = Arc::new(records);
        let mut revision = 0;
        self.revision.send_modify(|value| {
            *value += 1;
            revision = *value;
        });
        revision
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::new()
    }
}
