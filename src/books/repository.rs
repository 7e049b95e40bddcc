pub mod ddb_book_repository;
pub mod memory_book_repository;

use crate::books::domain::model::BookEntity;
use crate::core::repository::Repository;

// BookRepository stores catalog entries keyed by isbn; an empty query predicate scans
// the whole catalog.
pub trait BookRepository: Repository<BookEntity> {}

impl<R: BookRepository + ?Sized> BookRepository for std::sync::Arc<R> {}
