use async_trait::async_trait;
use tracing::{debug, info};
use crate::catalog::domain::CatalogProvider;
use crate::circulation::domain::TransactionProvider;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::issued::card::{IssuedBookCard, IssuedBooksView};
use crate::issued::domain::{IssuedBooksService, RefreshSummary};
use crate::issued::filter::{filter_issued, resolve_book};

pub struct IssuedBooksServiceImpl {
    branch_id: String,
    due_date_fmt: String,
    catalog_provider: Box<dyn CatalogProvider>,
    transaction_provider: Box<dyn TransactionProvider>,
}

impl IssuedBooksServiceImpl {
    pub fn new(config: &Configuration, catalog_provider: Box<dyn CatalogProvider>,
               transaction_provider: Box<dyn TransactionProvider>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            due_date_fmt: config.due_date_fmt.to_string(),
            catalog_provider,
            transaction_provider,
        }
    }
}

#[async_trait]
impl IssuedBooksService for IssuedBooksServiceImpl {
    async fn refresh(&self) -> LibraryResult<RefreshSummary> {
        let (books, transactions) = tokio::try_join!(
            self.catalog_provider.load_data(),
            self.transaction_provider.load_transactions())?;
        let books_revision = *self.catalog_provider.subscribe().borrow();
        let transactions_revision = *self.transaction_provider.subscribe().borrow();
        info!(branch = self.branch_id.as_str(), books, transactions, books_revision, transactions_revision,
            "refreshed issued books");
        Ok(RefreshSummary { books, transactions, books_revision, transactions_revision })
    }

    async fn issued_books(&self, query: &str) -> LibraryResult<IssuedBooksView> {
        let books = self.catalog_provider.books().await;
        let transactions = self.transaction_provider.transactions().await;
        let issued = filter_issued(transactions.as_slice(), books.as_slice(), query);
        debug!(branch = self.branch_id.as_str(), query, matched = issued.len(),
            transactions = transactions.len(), "filtered issued books");
        let cards = issued.into_iter()
            .map(|transaction| {
                let book = resolve_book(books.as_slice(), transaction.book_id.as_str());
                IssuedBookCard::build(transaction, book, self.due_date_fmt.as_str())
            })
            .collect();
        Ok(IssuedBooksView::new(query, cards))
    }
}
