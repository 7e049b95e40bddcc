use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{info, warn};
use crate::circulation::domain::{TRANSACTIONS_LOADED, TransactionProvider};
use crate::core::domain::Configuration;
use crate::core::events::LoadedEvent;
use crate::core::library::LibraryResult;
use crate::core::snapshot::Snapshot;
use crate::gateway::events::EventPublisher;
use crate::transactions::dto::TransactionDto;
use crate::transactions::repository::TransactionRepository;

pub struct TransactionProviderImpl {
    branch_id: String,
    page_size: usize,
    transaction_repository: Box<dyn TransactionRepository>,
    events_publisher: Box<dyn EventPublisher>,
    transactions: Snapshot<TransactionDto>,
}

impl TransactionProviderImpl {
    pub fn new(config: &Configuration, transaction_repository: Box<dyn TransactionRepository>,
               events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            page_size: config.load_page_size,
            transaction_repository,
            events_publisher,
            transactions: Snapshot::new(),
        }
    }

    // every status is loaded; narrowing to issued records is the filter's job
    async fn fetch_all(&self) -> LibraryResult<Vec<TransactionDto>> {
        let mut transactions = vec![];
        let mut next_page: Option<String> = None;
        loop {
            let res = self.transaction_repository.query(
                &HashMap::new(), next_page.as_deref(), self.page_size).await?;
            transactions.extend(res.records.iter().map(TransactionDto::from));
            next_page = res.next_page;
            if next_page.is_none() {
                return Ok(transactions);
            }
        }
    }
}

#[async_trait]
impl TransactionProvider for TransactionProviderImpl {
    async fn load_transactions(&self) -> LibraryResult<usize> {
        let transactions = self.fetch_all().await.map_err(|err| {
            warn!(branch = self.branch_id.as_str(), error = %err, "failed to load transactions, keeping previous snapshot");
            err
        })?;
        let count = transactions.len();
        let revision = self.transactions.replace(transactions).await;
        info!(branch = self.branch_id.as_str(), count, revision, "loaded transactions");

        let event = LoadedEvent::new(TRANSACTIONS_LOADED, self.branch_id.as_str(), count, revision);
        if let Err(err) = self.events_publisher.publish(&event).await {
            warn!(error = %err, "failed to publish {}", TRANSACTIONS_LOADED);
        }
        Ok(count)
    }

    async fn transactions(&self) -> Arc<Vec<TransactionDto>> {
        self.transactions.current().await
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.transactions.subscribe()
    }
}
