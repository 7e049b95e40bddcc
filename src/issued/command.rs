pub mod list_issued_books_cmd;
pub mod refresh_issued_books_cmd;
