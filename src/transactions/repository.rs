pub mod ddb_transaction_repository;
pub mod memory_transaction_repository;

use async_trait::async_trait;
use std::collections::HashMap;
use crate::core::library::{LibraryResult, PaginatedResult, TransactionStatus};
use crate::core::repository::Repository;
use crate::transactions::domain::model::TransactionEntity;

#[async_trait]
pub trait TransactionRepository: Repository<TransactionEntity> {
    async fn find_by_status(&self, status: TransactionStatus,
                            page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<TransactionEntity>> {
        let predicate = HashMap::from([("status".to_string(), status.to_string())]);
        self.query(&predicate, page, page_size).await
    }
}

impl<R: TransactionRepository + ?Sized> TransactionRepository for std::sync::Arc<R> {}
