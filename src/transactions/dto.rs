use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::library::TransactionStatus;
use crate::transactions::domain::Transaction;
use crate::transactions::domain::model::TransactionEntity;
use crate::utils::date::serializer;

// TransactionDto is the circulation snapshot row. Bookkeeping columns stay in
// the repository.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TransactionDto {
    pub transaction_id: String,
    pub book_id: String,
    pub member_id: String,
    pub status: TransactionStatus,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
}

impl TransactionDto {
    pub fn new(book_id: &str, member_id: &str, status: TransactionStatus) -> Self {
        TransactionDto::from(&TransactionEntity::new(book_id, member_id, status))
    }
}

impl Transaction for TransactionDto {
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

impl From<&TransactionEntity> for TransactionDto {
    fn from(entity: &TransactionEntity) -> TransactionDto {
        TransactionDto {
            transaction_id: entity.transaction_id.clone(),
            book_id: entity.book_id.clone(),
            member_id: entity.member_id.clone(),
            status: entity.status.clone(),
            due_at: entity.due_at,
        }
    }
}
