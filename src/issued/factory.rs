use crate::catalog::factory::create_catalog_provider;
use crate::circulation::factory::create_transaction_provider;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::issued::domain::IssuedBooksService;
use crate::issued::domain::service::IssuedBooksServiceImpl;

pub async fn create_issued_books_service(config: &Configuration, store: RepositoryStore) -> Box<dyn IssuedBooksService> {
    let catalog_provider = create_catalog_provider(config, store).await;
    let transaction_provider = create_transaction_provider(config, store).await;
    Box::new(IssuedBooksServiceImpl::new(config, catalog_provider, transaction_provider))
}
