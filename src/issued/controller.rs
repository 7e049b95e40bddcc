use axum::{
    extract::{Query, State},
    response::Json,
};
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::issued::command::list_issued_books_cmd::{ListIssuedBooksCommand, ListIssuedBooksCommandRequest, ListIssuedBooksCommandResponse};
use crate::issued::command::refresh_issued_books_cmd::{RefreshIssuedBooksCommand, RefreshIssuedBooksCommandRequest, RefreshIssuedBooksCommandResponse};

pub async fn list_issued_books(
    State(state): State<AppState>,
    Query(req): Query<ListIssuedBooksCommandRequest>) -> Result<Json<ListIssuedBooksCommandResponse>, ServerError> {
    let res = ListIssuedBooksCommand::new(state.issued_books.clone()).execute(req).await?;
    Ok(Json(res))
}

pub async fn refresh_issued_books(
    State(state): State<AppState>) -> Result<Json<RefreshIssuedBooksCommandResponse>, ServerError> {
    let res = RefreshIssuedBooksCommand::new(state.issued_books.clone())
        .execute(RefreshIssuedBooksCommandRequest::default()).await?;
    Ok(Json(res))
}
