use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::TransactionStatus;
use crate::transactions::domain::Transaction;
use crate::utils::date::{opt_serializer, serializer};

// TransactionEntity is the stored borrowing record. book_id refers to a catalog isbn.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TransactionEntity {
    pub transaction_id: String,
    pub version: i64,
    pub book_id: String,
    pub member_id: String,
    pub status: TransactionStatus,
    #[serde(with = "serializer")]
    pub issued_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    #[serde(default, with = "opt_serializer")]
    pub returned_at: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl TransactionEntity {
    pub fn new(book_id: &str, member_id: &str, status: TransactionStatus) -> Self {
        Self {
            transaction_id: Uuid::new_v4().to_string(),
            version: 0,
            book_id: book_id.to_string(),
            member_id: member_id.to_string(),
            status,
            issued_at: Utc::now().naive_utc(),
            due_at: Utc::now().naive_utc() + Duration::days(15),
            returned_at: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for TransactionEntity {
    fn id(&self) -> String {
        self.transaction_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Transaction for TransactionEntity {
    fn transaction_id(&self) -> &str {
        self.transaction_id.as_str()
    }

    fn book_id(&self) -> &str {
        self.book_id.as_str()
    }

    fn member_id(&self) -> &str {
        self.member_id.as_str()
    }

    fn status(&self) -> &TransactionStatus {
        &self.status
    }

    fn due_at(&self) -> NaiveDateTime {
        self.due_at
    }
}
