use tracing::warn;
use crate::circulation::domain::{TRANSACTIONS_LOADED, TransactionProvider};
use crate::circulation::domain::service::TransactionProviderImpl;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::transactions::factory::create_transaction_repository;

pub async fn create_transaction_provider(config: &Configuration, store: RepositoryStore) -> Box<dyn TransactionProvider> {
    let transaction_repo = create_transaction_repository(store).await;
    let mut publisher = create_publisher(store.gateway_publisher()).await;
    if let Err(err) = publisher.register(TRANSACTIONS_LOADED).await {
        warn!(error = %err, "failed to register topic {}", TRANSACTIONS_LOADED);
    }
    Box::new(TransactionProviderImpl::new(config, transaction_repo, publisher))
}
