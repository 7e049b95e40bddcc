use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::issued::card::IssuedBooksView;
use crate::issued::domain::IssuedBooksService;

pub struct ListIssuedBooksCommand {
    issued_books_service: Arc<dyn IssuedBooksService>,
}

impl ListIssuedBooksCommand {
    pub fn new(issued_books_service: Arc<dyn IssuedBooksService>) -> Self {
        Self {
            issued_books_service,
        }
    }
}

fn refresh_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ListIssuedBooksCommandRequest {
    #[serde(default)]
    pub query: String,
    // a listing reloads both snapshots first unless refresh=false
    #[serde(default = "refresh_by_default")]
    pub refresh: bool,
}

impl ListIssuedBooksCommandRequest {
    pub fn new(query: &str, refresh: bool) -> Self {
        Self {
            query: query.to_string(),
            refresh,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListIssuedBooksCommandResponse {
    pub issued: IssuedBooksView,
}

impl ListIssuedBooksCommandResponse {
    pub fn new(issued: IssuedBooksView) -> Self {
        Self {
            issued,
        }
    }
}

#[async_trait]
impl Command<ListIssuedBooksCommandRequest, ListIssuedBooksCommandResponse> for ListIssuedBooksCommand {
    async fn execute(&self, req: ListIssuedBooksCommandRequest) -> Result<ListIssuedBooksCommandResponse, CommandError> {
        if req.refresh {
            self.issued_books_service.refresh().await.map_err(CommandError::wrap("list_issued_books"))?;
        }
        self.issued_books_service.issued_books(req.query.as_str()).await
            .map_err(CommandError::wrap("list_issued_books")).map(ListIssuedBooksCommandResponse::new)
    }
}
