use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::transactions::domain::model::TransactionEntity;
use crate::transactions::repository::TransactionRepository;
use crate::utils::memory::MemoryTable;

#[derive(Debug)]
pub struct MemoryTransactionRepository {
    table: MemoryTable<TransactionEntity>,
}

impl MemoryTransactionRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("transactions"),
        }
    }
}

impl Default for MemoryTransactionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<TransactionEntity> for MemoryTransactionRepository {
    async fn create(&self, entity: &TransactionEntity) -> LibraryResult<usize> {
        self.table.insert(entity).await
    }

    async fn update(&self, entity: &TransactionEntity) -> LibraryResult<usize> {
        self.table.replace(entity, |transaction| {
            transaction.version += 1;
            transaction.updated_at = Utc::now().naive_utc();
        }).await
    }

    async fn get(&self, id: &str) -> LibraryResult<TransactionEntity> {
        self.table.find(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.remove(id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<TransactionEntity>> {
        self.table.page(|transaction| predicate.iter().all(|(k, v)| match k.as_str() {
            "status" => transaction.status.as_str() == v.as_str(),
            "member_id" => transaction.member_id == *v,
            "book_id" => transaction.book_id == *v,
            _ => false,
        }), page, page_size).await
    }
}

impl TransactionRepository for MemoryTransactionRepository {}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::library::TransactionStatus;
    use crate::core::repository::Repository;
    use crate::transactions::domain::model::TransactionEntity;
    use crate::transactions::repository::TransactionRepository;
    use crate::transactions::repository::memory_transaction_repository::MemoryTransactionRepository;

    #[tokio::test]
    async fn test_should_create_get_transaction() {
        let repo = MemoryTransactionRepository::new();
        let transaction = TransactionEntity::new("A1", "M100", TransactionStatus::Issued);
        assert_eq!(1, repo.create(&transaction).await.expect("should create transaction"));
        let loaded = repo.get(transaction.transaction_id.as_str()).await.expect("should return transaction");
        assert_eq!(transaction, loaded);
        assert!(repo.create(&transaction).await.is_err());
    }

    #[tokio::test]
    async fn test_should_update_transaction() {
        let repo = MemoryTransactionRepository::new();
        let mut transaction = TransactionEntity::new("A1", "M100", TransactionStatus::Issued);
        repo.create(&transaction).await.expect("should create transaction");
        transaction.status = TransactionStatus::Returned;
        repo.update(&transaction).await.expect("should update transaction");
        let loaded = repo.get(transaction.transaction_id.as_str()).await.expect("should return transaction");
        assert_eq!(TransactionStatus::Returned, loaded.status);
        assert_eq!(1, loaded.version);
    }

    #[tokio::test]
    async fn test_should_keep_unrecognised_status_on_update() {
        let repo = MemoryTransactionRepository::new();
        let mut transaction = TransactionEntity::new("A1", "M100", TransactionStatus::from("overdue"));
        repo.create(&transaction).await.expect("should create transaction");
        transaction.member_id = "M101".to_string();
        repo.update(&transaction).await.expect("should update transaction");
        let loaded = repo.get(transaction.transaction_id.as_str()).await.expect("should return transaction");
        assert_eq!("overdue", loaded.status.as_str());
        let overdue = repo.query(&HashMap::from([("status".to_string(), "overdue".to_string())]), None, 10)
            .await.expect("should query");
        assert_eq!(1, overdue.records.len());
    }

    #[tokio::test]
    async fn test_should_query_by_status() {
        let repo = MemoryTransactionRepository::new();
        repo.create(&TransactionEntity::new("A1", "M100", TransactionStatus::Issued)).await.expect("should create");
        repo.create(&TransactionEntity::new("A2", "M200", TransactionStatus::Returned)).await.expect("should create");
        repo.create(&TransactionEntity::new("A3", "M100", TransactionStatus::Issued)).await.expect("should create");

        let issued = repo.find_by_status(TransactionStatus::Issued, None, 10).await.expect("should query");
        assert_eq!(vec!["A1", "A3"], issued.records.iter().map(|t| t.book_id.as_str()).collect::<Vec<&str>>());

        let predicate = HashMap::from([
            ("status".to_string(), "issued".to_string()),
            ("book_id".to_string(), "A3".to_string()),
        ]);
        let res = repo.query(&predicate, None, 10).await.expect("should query");
        assert_eq!(1, res.records.len());

        let all = repo.query(&HashMap::new(), None, 2).await.expect("should query");
        assert_eq!(2, all.records.len());
        assert_eq!(Some("2".to_string()), all.next_page);
    }
}
