use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{info, warn};
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::{CATALOG_LOADED, CatalogProvider};
use crate::core::domain::Configuration;
use crate::core::events::LoadedEvent;
use crate::core::library::LibraryResult;
use crate::core::snapshot::Snapshot;
use crate::gateway::events::EventPublisher;

pub struct CatalogProviderImpl {
    branch_id: String,
    page_size: usize,
    book_repository: Box<dyn BookRepository>,
    events_publisher: Box<dyn EventPublisher>,
    books: Snapshot<BookDto>,
}

impl CatalogProviderImpl {
    pub fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
               events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            page_size: config.load_page_size,
            book_repository,
            events_publisher,
            books: Snapshot::new(),
        }
    }

    async fn fetch_all(&self) -> LibraryResult<Vec<BookDto>> {
        let mut books = vec![];
        let mut next_page: Option<String> = None;
        loop {
            let res = self.book_repository.query(&HashMap::new(), next_page.as_deref(), self.page_size).await?;
            books.extend(res.records.iter().map(BookDto::from));
            next_page = res.next_page;
            if next_page.is_none() {
                return Ok(books);
            }
        }
    }
}

#[async_trait]
impl CatalogProvider for CatalogProviderImpl {
    async fn load_data(&self) -> LibraryResult<usize> {
        let books = match self.fetch_all().await {
            Ok(books) => books,
            Err(err) => {
                warn!(branch = self.branch_id.as_str(), error = %err, "failed to load catalog, keeping previous snapshot");
                return Err(err);
            }
        };
        let count = books.len();
        let revision = self.books.replace(books).await;
        info!(branch = self.branch_id.as_str(), count, revision, "loaded catalog");

        let event = LoadedEvent::new(CATALOG_LOADED, self.branch_id.as_str(), count, revision);
        if let Err(err) = self.events_publisher.publish(&event).await {
            warn!(error = %err, "failed to publish {}", CATALOG_LOADED);
        }
        Ok(count)
    }

    async fn books(&self) -> Arc<Vec<BookDto>> {
        self.books.current().await
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.books.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use async_trait::async_trait;
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::catalog::domain::{CATALOG_LOADED, CatalogProvider};
    use crate::catalog::domain::service::CatalogProviderImpl;
    use crate::core::domain::Configuration;
    use crate::core::library::{ErrorKind, LibraryError, LibraryResult, PaginatedResult};
    use crate::core::repository::Repository;
    use crate::gateway::memory::publisher::MemoryPublisher;

    struct FailingBookRepository;

    #[async_trait]
    impl Repository<BookEntity> for FailingBookRepository {
        async fn create(&self, _entity: &BookEntity) -> LibraryResult<usize> {
            Err(LibraryError::unavailable("down"))
        }

        async fn update(&self, _entity: &BookEntity) -> LibraryResult<usize> {
            Err(LibraryError::unavailable("down"))
        }

        async fn get(&self, _id: &str) -> LibraryResult<BookEntity> {
            Err(LibraryError::unavailable("down"))
        }

        async fn delete(&self, _id: &str) -> LibraryResult<usize> {
            Err(LibraryError::unavailable("down"))
        }

        async fn query(&self, _predicate: &HashMap<String, String>,
                       _page: Option<&str>, _page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
            Err(LibraryError::unavailable("down"))
        }
    }

    impl BookRepository for FailingBookRepository {}

    fn small_pages() -> Configuration {
        let mut config = Configuration::new("test");
        config.load_page_size = 2;
        config
    }

    #[tokio::test]
    async fn test_should_start_with_empty_snapshot() {
        let provider = CatalogProviderImpl::new(&Configuration::new("test"),
                                                Box::new(MemoryBookRepository::new()), Box::new(MemoryPublisher::new(4)));
        assert!(provider.books().await.is_empty());
        assert_eq!(0, *provider.subscribe().borrow());
    }

    #[tokio::test]
    async fn test_should_load_all_pages_in_order() {
        let repo = Arc::new(MemoryBookRepository::new());
        for (isbn, title) in [("A1", "Dune"), ("A2", "Emma"), ("A3", "Ulysses"), ("A4", "Beloved"), ("A5", "Middlemarch")] {
            repo.create(&BookEntity::new(isbn, title)).await.expect("should create book");
        }
        let provider = CatalogProviderImpl::new(&small_pages(), Box::new(repo.clone()), Box::new(MemoryPublisher::new(4)));
        let mut revisions = provider.subscribe();

        assert_eq!(5, provider.load_data().await.expect("should load"));
        let books = provider.books().await;
        assert_eq!(vec!["A1", "A2", "A3", "A4", "A5"], books.iter().map(|b| b.isbn.as_str()).collect::<Vec<&str>>());
        assert!(revisions.has_changed().expect("sender alive"));
        assert_eq!(1, *revisions.borrow_and_update());

        repo.create(&BookEntity::new("A6", "Persuasion")).await.expect("should create book");
        assert_eq!(6, provider.load_data().await.expect("should reload"));
        assert_eq!(2, *revisions.borrow_and_update());
        // the earlier snapshot is untouched by the reload
        assert_eq!(5, books.len());
        assert_eq!(6, provider.books().await.len());
    }

    #[tokio::test]
    async fn test_should_publish_loaded_event() {
        let publisher = MemoryPublisher::new(4);
        let mut events = publisher.subscribe();
        let repo = MemoryBookRepository::new();
        repo.create(&BookEntity::new("A1", "Dune")).await.expect("should create book");
        let provider = CatalogProviderImpl::new(&Configuration::new("test"), Box::new(repo), Box::new(publisher));

        provider.load_data().await.expect("should load");
        let event = events.recv().await.expect("should receive event");
        assert_eq!(CATALOG_LOADED, event.topic.as_str());
        assert_eq!("test", event.branch_id.as_str());
        assert_eq!((1, 1), (event.count, event.revision));
    }

    #[tokio::test]
    async fn test_should_keep_snapshot_when_load_fails() {
        let provider = CatalogProviderImpl::new(&Configuration::new("test"),
                                                Box::new(FailingBookRepository), Box::new(MemoryPublisher::new(4)));
        let res = provider.load_data().await;
        assert_eq!(Some(ErrorKind::Unavailable), res.err().map(|e| e.kind()));
        assert!(provider.books().await.is_empty());
        assert_eq!(0, *provider.subscribe().borrow());
    }
}
