use chrono::NaiveDateTime;
use crate::core::library::TransactionStatus;

pub mod model;

// Transaction is the read view of a borrowing record: which book, which member,
// whether it is still out and when it is due back.
pub trait Transaction: Sync + Send {
    fn transaction_id(&self) -> &str;
    fn book_id(&self) -> &str;
    fn member_id(&self) -> &str;
    fn status(&self) -> &TransactionStatus;
    fn due_at(&self) -> NaiveDateTime;
}
