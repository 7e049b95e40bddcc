use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::issued::domain::{IssuedBooksService, RefreshSummary};

pub struct RefreshIssuedBooksCommand {
    issued_books_service: Arc<dyn IssuedBooksService>,
}

impl RefreshIssuedBooksCommand {
    pub fn new(issued_books_service: Arc<dyn IssuedBooksService>) -> Self {
        Self {
            issued_books_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshIssuedBooksCommandRequest {}

#[derive(Debug, Serialize)]
pub struct RefreshIssuedBooksCommandResponse {
    pub summary: RefreshSummary,
}

#[async_trait]
impl Command<RefreshIssuedBooksCommandRequest, RefreshIssuedBooksCommandResponse> for RefreshIssuedBooksCommand {
    async fn execute(&self, _req: RefreshIssuedBooksCommandRequest) -> Result<RefreshIssuedBooksCommandResponse, CommandError> {
        self.issued_books_service.refresh().await
            .map_err(CommandError::wrap("refresh_issued_books")).map(|summary| RefreshIssuedBooksCommandResponse { summary })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::issued::command::refresh_issued_books_cmd::{RefreshIssuedBooksCommand, RefreshIssuedBooksCommandRequest};
    use crate::issued::domain::RefreshSummary;
    use crate::issued::factory;

    #[tokio::test]
    async fn test_should_run_refresh_issued_books() {
        let svc = factory::create_issued_books_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let cmd = RefreshIssuedBooksCommand::new(Arc::from(svc));
        let res = cmd.execute(RefreshIssuedBooksCommandRequest::default()).await.expect("should refresh");
        assert_eq!(RefreshSummary { books: 0, transactions: 0, books_revision: 1, transactions_revision: 1 }, res.summary);
        let res = cmd.execute(RefreshIssuedBooksCommandRequest::default()).await.expect("should refresh");
        assert_eq!((2, 2), (res.summary.books_revision, res.summary.transactions_revision));
    }
}
