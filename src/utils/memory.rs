use std::cmp;
use tokio::sync::RwLock;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};

// MemoryTable keeps entities in insertion order and pages through them with an
// offset token. It backs the in-memory repositories used in dev and tests.
#[derive(Debug)]
pub(crate) struct MemoryTable<E> {
    name: String,
    rows: RwLock<Vec<E>>,
}

impl<E: Identifiable + Clone> MemoryTable<E> {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: RwLock::new(vec![]),
        }
    }

    pub(crate) async fn insert(&self, entity: &E) -> LibraryResult<usize> {
        let mut rows = self.rows.write().await;
        let id = entity.id();
        if rows.iter().any(|row| row.id() == id) {
            return Err(LibraryError::conflict(format!("{} already contains {}", self.name, id)));
        }
        rows.push(entity.clone());
        Ok(1)
    }

    // replace swaps the stored row when its version matches the entity's version;
    // `touch` bumps the version and timestamps of the stored copy.
    pub(crate) async fn replace<F: FnOnce(&mut E)>(&self, entity: &E, touch: F) -> LibraryResult<usize> {
        let mut rows = self.rows.write().await;
        let id = entity.id();
        let row = rows.iter_mut().find(|row| row.id() == id)
            .ok_or_else(|| LibraryError::not_found(format!("{} has no {}", self.name, id)))?;
        if row.version() != entity.version() {
            return Err(LibraryError::conflict(
                format!("stale version {} for {} in {}", entity.version(), id, self.name)));
        }
        let mut updated = entity.clone();
        touch(&mut updated);
        *row = updated;
        Ok(1)
    }

    pub(crate) async fn find(&self, id: &str) -> LibraryResult<E> {
        let rows = self.rows.read().await;
        rows.iter().find(|row| row.id() == id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("{} has no {}", self.name, id)))
    }

    pub(crate) async fn remove(&self, id: &str) -> LibraryResult<usize> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok(before - rows.len())
    }

    pub(crate) async fn page<P: Fn(&E) -> bool>(&self, matches: P,
                                                page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<E>> {
        let offset = match page {
            Some(token) => token.parse::<usize>().map_err(|_| LibraryError::invalid(
                format!("invalid page token {} for {}", token, self.name)))?,
            None => 0,
        };
        let limit = cmp::max(page_size, 1);
        let rows = self.rows.read().await;
        let matched: Vec<&E> = rows.iter().filter(|row| matches(*row)).collect();
        let records: Vec<E> = matched.iter().skip(offset).take(limit).map(|row| (*row).clone()).collect();
        let end = offset + records.len();
        let next_page = if end < matched.len() { Some(end.to_string()) } else { None };
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }
}
