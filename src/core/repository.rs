use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::gateway::GatewayPublisherVia;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> LibraryResult<usize>;

    // find by predicate, an empty predicate returns every entity page by page
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>>;
}

// Shared handles let a host seed a store while a provider reads from it.
#[async_trait]
impl<Entity: Sync + Send, R: Repository<Entity> + ?Sized> Repository<Entity> for Arc<R> {
    async fn create(&self, entity: &Entity) -> LibraryResult<usize> {
        (**self).create(entity).await
    }

    async fn update(&self, entity: &Entity) -> LibraryResult<usize> {
        (**self).update(entity).await
    }

    async fn get(&self, id: &str) -> LibraryResult<Entity> {
        (**self).get(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        (**self).delete(id).await
    }

    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>> {
        (**self).query(predicate, page, page_size).await
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

impl RepositoryStore {
    pub fn gateway_publisher(&self) -> GatewayPublisherVia {
        match self {
            RepositoryStore::DynamoDB => { GatewayPublisherVia::Sns }
            RepositoryStore::LocalDynamoDB => { GatewayPublisherVia::LocalDynamoDB }
            RepositoryStore::InMemory => { GatewayPublisherVia::InMemory }
        }
    }
}
