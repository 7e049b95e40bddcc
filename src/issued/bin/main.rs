use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use issued_books::core::controller::AppState;
use issued_books::core::domain::Configuration;
use issued_books::core::repository::RepositoryStore;
use issued_books::issued::controller::{list_issued_books, refresh_issued_books};
use issued_books::utils::ddb::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        AppState::build(&Configuration::new("dev"), RepositoryStore::LocalDynamoDB).await
    } else {
        AppState::build(&Configuration::new("prod"), RepositoryStore::DynamoDB).await
    };

    // one service for the process, so refreshed snapshots serve later requests
    let app = Router::new()
        .route("/issued", get(list_issued_books))
        .route("/issued/refresh", post(refresh_issued_books))
        .with_state(state);

    run(app).await
}
