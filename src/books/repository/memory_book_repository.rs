use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::memory::MemoryTable;

// MemoryBookRepository keeps the catalog in process, preserving insertion order.
#[derive(Debug)]
pub struct MemoryBookRepository {
    table: MemoryTable<BookEntity>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new("books"),
        }
    }
}

impl Default for MemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        if entity.isbn.is_empty() {
            return Err(LibraryError::invalid("book isbn is required"));
        }
        self.table.insert(entity).await
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        self.table.replace(entity, |book| {
            book.version += 1;
            book.updated_at = Utc::now().naive_utc();
        }).await
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        self.table.find(id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.table.remove(id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        self.table.page(|book| predicate.iter().all(|(k, v)| match k.as_str() {
            "isbn" => book.isbn == *v,
            "title" => book.title == *v,
            _ => false,
        }), page, page_size).await
    }
}

impl BookRepository for MemoryBookRepository {}
