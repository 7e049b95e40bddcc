pub mod service;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;
use crate::issued::card::IssuedBooksView;

// RefreshSummary reports the snapshot sizes and revisions after both providers
// reloaded. Revisions count successful loads since the service started.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub books: usize,
    pub transactions: usize,
    pub books_revision: u64,
    pub transactions_revision: u64,
}

// IssuedBooksService backs the issued books screen
#[async_trait]
pub trait IssuedBooksService: Sync + Send {
    // refresh reloads the catalog and transaction snapshots.
    async fn refresh(&self) -> LibraryResult<RefreshSummary>;

    // issued_books filters the current snapshots and renders them as cards.
    async fn issued_books(&self, query: &str) -> LibraryResult<IssuedBooksView>;
}
