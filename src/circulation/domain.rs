pub mod service;

use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::watch;
use crate::core::library::LibraryResult;
use crate::transactions::dto::TransactionDto;

pub const TRANSACTIONS_LOADED: &str = "transactions_loaded";

// TransactionProvider owns the read-only snapshot of borrowing records.
#[async_trait]
pub trait TransactionProvider: Sync + Send {
    async fn load_transactions(&self) -> LibraryResult<usize>;
    async fn transactions(&self) -> Arc<Vec<TransactionDto>>;
    fn subscribe(&self) -> watch::Receiver<u64>;
}
