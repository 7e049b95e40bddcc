use std::sync::Arc;
use axum::http::StatusCode;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::library::ErrorKind;
use crate::core::repository::RepositoryStore;
use crate::issued::domain::IssuedBooksService;
use crate::issued::factory;

// AppState is shared by every request. The service is built once so its provider
// snapshots live as long as the process.
#[derive(Clone)]
pub struct AppState {
    pub issued_books: Arc<dyn IssuedBooksService>,
}

impl AppState {
    pub fn new(issued_books: Arc<dyn IssuedBooksService>) -> AppState {
        AppState { issued_books }
    }

    pub async fn build(config: &Configuration, store: RepositoryStore) -> AppState {
        let svc = factory::create_issued_books_service(config, store).await;
        AppState::new(Arc::from(svc))
    }
}

pub type ServerError = (StatusCode, String);

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Invalid | ErrorKind::Serialization => StatusCode::BAD_REQUEST,
            ErrorKind::AccessDenied => StatusCode::FORBIDDEN,
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Store | ErrorKind::Gateway => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, err.to_string())
    }
}
