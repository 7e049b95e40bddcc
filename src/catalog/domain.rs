pub mod service;

use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::watch;
use crate::books::dto::BookDto;
use crate::core::library::LibraryResult;

pub const CATALOG_LOADED: &str = "catalog_loaded";

// CatalogProvider owns the read-only book snapshot the issued books screen joins on.
#[async_trait]
pub trait CatalogProvider: Sync + Send {
    // load_data replaces the snapshot from the book repository and returns its size.
    async fn load_data(&self) -> LibraryResult<usize>;

    // books returns the current snapshot, empty until the first load.
    async fn books(&self) -> Arc<Vec<BookDto>>;

    // subscribe yields the snapshot revision, bumped after every successful load.
    fn subscribe(&self) -> watch::Receiver<u64>;
}
