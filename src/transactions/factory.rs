use crate::core::repository::RepositoryStore;
use crate::transactions::repository::TransactionRepository;
use crate::transactions::repository::ddb_transaction_repository::DDBTransactionRepository;
use crate::transactions::repository::memory_transaction_repository::MemoryTransactionRepository;
use crate::utils::ddb::{build_db_client, create_table};

pub async fn create_transaction_repository(store: RepositoryStore) -> Box<dyn TransactionRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBTransactionRepository::new(client, "transactions", "transactions_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "transactions", "transaction_id", Some(("status", "member_id"))).await;
            Box::new(DDBTransactionRepository::new(client, "transactions", "transactions_ndx"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryTransactionRepository::new())
        }
    }
}
