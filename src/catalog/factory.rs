use tracing::warn;
use crate::books::factory;
use crate::catalog::domain::{CATALOG_LOADED, CatalogProvider};
use crate::catalog::domain::service::CatalogProviderImpl;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;

pub async fn create_catalog_provider(config: &Configuration, store: RepositoryStore) -> Box<dyn CatalogProvider> {
    let book_repo = factory::create_book_repository(store).await;
    let mut publisher = create_publisher(store.gateway_publisher()).await;
    if let Err(err) = publisher.register(CATALOG_LOADED).await {
        warn!(error = %err, "failed to register topic {}", CATALOG_LOADED);
    }
    Box::new(CatalogProviderImpl::new(config, book_repo, publisher))
}
