use std::sync::Arc;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::catalog::domain::service::CatalogProviderImpl;
use crate::circulation::domain::service::TransactionProviderImpl;
use crate::core::domain::Configuration;
use crate::core::library::TransactionStatus;
use crate::core::repository::Repository;
use crate::gateway::memory::publisher::MemoryPublisher;
use crate::issued::domain::service::IssuedBooksServiceImpl;
use crate::transactions::domain::model::TransactionEntity;
use crate::transactions::repository::TransactionRepository;
use crate::transactions::repository::memory_transaction_repository::MemoryTransactionRepository;

// seeded_service wires a service over in-memory stores holding two books and four
// transactions. Only M100 (Dune) and M300 (book missing from the catalog) are issued.
pub(crate) async fn seeded_service() -> (IssuedBooksServiceImpl, Arc<MemoryBookRepository>, Arc<MemoryTransactionRepository>) {
    let books = Arc::new(MemoryBookRepository::new());
    let transactions = Arc::new(MemoryTransactionRepository::new());
    books.create(&BookEntity::new("A1", "Dune").with_cover("https://covers.example.org/dune.jpg"))
        .await.expect("should create book");
    books.create(&BookEntity::new("A2", "Emma")).await.expect("should create book");
    for (book_id, member_id, status) in [("A1", "M100", "issued"), ("A2", "M200", "returned"),
        ("ZZZ", "M300", "issued"), ("A2", "M400", "Issued")] {
        transactions.create(&TransactionEntity::new(book_id, member_id, TransactionStatus::from(status)))
            .await.expect("should create transaction");
    }
    let config = Configuration::new("test");
    let book_repo: Box<dyn BookRepository> = Box::new(books.clone());
    let transaction_repo: Box<dyn TransactionRepository> = Box::new(transactions.clone());
    let catalog = CatalogProviderImpl::new(&config, book_repo, Box::new(MemoryPublisher::new(16)));
    let circulation = TransactionProviderImpl::new(&config, transaction_repo, Box::new(MemoryPublisher::new(16)));
    let svc = IssuedBooksServiceImpl::new(&config, Box::new(catalog), Box::new(circulation));
    (svc, books, transactions)
}
