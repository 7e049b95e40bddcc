use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::core::library::{LibraryError, LibraryResult, PaginatedResult, TransactionStatus};
use crate::core::repository::Repository;
use crate::transactions::domain::model::TransactionEntity;
use crate::transactions::repository::TransactionRepository;
use crate::utils::ddb::{date_value, filters, Item, next_page, start_key, to_item};

// DDBTransactionRepository keys borrowing records by transaction_id. The
// `<table>_ndx` index over (status, member_id) serves status queries.
#[derive(Debug)]
pub struct DDBTransactionRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBTransactionRepository {
    pub fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    async fn scan(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<TransactionEntity>> {
        let out = self.client
            .scan()
            .table_name(self.table_name.as_str())
            .set_exclusive_start_key(start_key(page)?)
            .limit(cmp::min(page_size, 500) as i32)
            .send()
            .await?;
        let records = out.items().unwrap_or_default().iter().map(|map| transaction_from(Item(map))).collect();
        Ok(PaginatedResult::new(page, page_size, next_page(out.last_evaluated_key()), records))
    }
}

#[async_trait]
impl Repository<TransactionEntity> for DDBTransactionRepository {
    async fn create(&self, entity: &TransactionEntity) -> LibraryResult<usize> {
        self.client
            .put_item()
            .table_name(self.table_name.as_str())
            .condition_expression("attribute_not_exists(transaction_id)")
            .set_item(Some(to_item(entity)?))
            .send()
            .await?;
        Ok(1)
    }

    async fn update(&self, entity: &TransactionEntity) -> LibraryResult<usize> {
        let returned_at = entity.returned_at.map(date_value).unwrap_or(AttributeValue::Null(true));
        // "status" is a reserved word
        self.client
            .update_item()
            .table_name(self.table_name.as_str())
            .key("transaction_id", AttributeValue::S(entity.transaction_id.clone()))
            .update_expression("SET version = :version, member_id = :member_id, #status = :status, due_at = :due_at, returned_at = :returned_at, updated_at = :updated_at")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":member_id", AttributeValue::S(entity.member_id.clone()))
            .expression_attribute_values(":status", AttributeValue::S(entity.status.as_str().to_string()))
            .expression_attribute_values(":due_at", date_value(entity.due_at))
            .expression_attribute_values(":returned_at", returned_at)
            .expression_attribute_values(":updated_at", date_value(Utc::now().naive_utc()))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await?;
        Ok(1)
    }

    async fn get(&self, id: &str) -> LibraryResult<TransactionEntity> {
        let out = self.client
            .get_item()
            .table_name(self.table_name.as_str())
            .key("transaction_id", AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await?;
        out.item().map(|map| transaction_from(Item(map)))
            .ok_or_else(|| LibraryError::not_found(format!("transaction not found for {}", id)))
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.client.delete_item()
            .table_name(self.table_name.as_str())
            .key("transaction_id", AttributeValue::S(id.to_string()))
            .send()
            .await?;
        Ok(1)
    }

    // An empty predicate scans the table. Otherwise status (default "issued") and
    // member_id form the index key condition and other keys become filters.
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<TransactionEntity>> {
        if predicate.is_empty() {
            return self.scan(page, page_size).await;
        }
        let status = predicate.get("status").cloned()
            .unwrap_or_else(|| TransactionStatus::Issued.as_str().to_string());
        let mut key_cond = "#status = :status".to_string();
        let mut request = self.client
            .query()
            .table_name(self.table_name.as_str())
            .index_name(self.index_name.as_str())
            .set_exclusive_start_key(start_key(page)?)
            .limit(cmp::min(page_size, 500) as i32)
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":status", AttributeValue::S(status));
        if let Some(member_id) = predicate.get("member_id") {
            key_cond.push_str(" AND member_id = :member_id");
            request = request.expression_attribute_values(":member_id", AttributeValue::S(member_id.clone()));
        }
        let (filter, values) = filters(predicate, &["status", "member_id"]);
        request = request.key_condition_expression(key_cond).set_filter_expression(filter);
        for (name, value) in values {
            request = request.expression_attribute_values(name, value);
        }
        let out = request.send().await?;
        let records = out.items().unwrap_or_default().iter().map(|map| transaction_from(Item(map))).collect();
        Ok(PaginatedResult::new(page, page_size, next_page(out.last_evaluated_key()), records))
    }
}

impl TransactionRepository for DDBTransactionRepository {}

// The status is kept verbatim, values other than issued/returned included.
fn transaction_from(item: Item) -> TransactionEntity {
    let now = Utc::now().naive_utc();
    TransactionEntity {
        transaction_id: item.string("transaction_id").unwrap_or_default(),
        version: item.number("version"),
        book_id: item.string("book_id").unwrap_or_default(),
        member_id: item.string("member_id").unwrap_or_default(),
        status: TransactionStatus::from(item.string("status").unwrap_or_default()),
        issued_at: item.date("issued_at").unwrap_or(now),
        due_at: item.date("due_at").unwrap_or(now),
        returned_at: item.date("returned_at"),
        created_at: item.date("created_at").unwrap_or(now),
        updated_at: item.date("updated_at").unwrap_or(now),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use aws_sdk_dynamodb::types::AttributeValue;
    use chrono::NaiveDateTime;
    use lazy_static::lazy_static;

    use crate::core::library::TransactionStatus;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::transactions::domain::model::TransactionEntity;
    use crate::transactions::repository::TransactionRepository;
    use crate::transactions::repository::ddb_transaction_repository::{DDBTransactionRepository, transaction_from};
    use crate::utils::ddb::{build_db_client, create_table, delete_table, Item};
    use crate::utils::date::DATE_FMT;

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "transactions").await;
                let _ = create_table(&client, "transactions", "transaction_id", Some(("status", "member_id"))).await;
                client
            });
    }

    #[tokio::test]
    async fn test_should_map_item_keeping_raw_status() {
        let item = HashMap::from([
            ("transaction_id".to_string(), AttributeValue::S("t1".to_string())),
            ("book_id".to_string(), AttributeValue::S("A1".to_string())),
            ("member_id".to_string(), AttributeValue::S("M100".to_string())),
            ("status".to_string(), AttributeValue::S("Issued".to_string())),
            ("due_at".to_string(), AttributeValue::S("2023-04-11T11:11:11".to_string())),
            ("returned_at".to_string(), AttributeValue::Null(true)),
        ]);
        let transaction = transaction_from(Item(&item));
        assert_eq!("t1", transaction.transaction_id.as_str());
        assert_eq!(TransactionStatus::Other("Issued".to_string()), transaction.status);
        assert_eq!("Issued", transaction.status.as_str());
        assert_eq!(NaiveDateTime::parse_from_str("2023-04-11T11:11:11", DATE_FMT).ok(), Some(transaction.due_at));
        assert_eq!(None, transaction.returned_at);
    }

    #[tokio::test]
    #[ignore = "requires local dynamodb"]
    async fn test_should_create_get_transaction() {
        let repo = DDBTransactionRepository::new(CLIENT.get().await.clone(), "transactions", "transactions_ndx");
        let transaction = TransactionEntity::new("A1", "M100", TransactionStatus::Issued);
        let size = repo.create(&transaction).await.expect("should create transaction");
        assert_eq!(1, size);

        let loaded = repo.get(transaction.transaction_id.as_str()).await.expect("should return transaction");
        assert_eq!(transaction.transaction_id, loaded.transaction_id);
        assert_eq!(TransactionStatus::Issued, loaded.status);
    }

    #[tokio::test]
    #[ignore = "requires local dynamodb"]
    async fn test_should_create_update_transaction() {
        let repo = DDBTransactionRepository::new(CLIENT.get().await.clone(), "transactions", "transactions_ndx");
        let mut transaction = TransactionEntity::new("A2", "M200", TransactionStatus::Issued);
        repo.create(&transaction).await.expect("should create transaction");

        transaction.status = TransactionStatus::Returned;
        transaction.returned_at = NaiveDateTime::parse_from_str("2023-04-25T22:22:22", DATE_FMT).ok();
        let size = repo.update(&transaction).await.expect("should update transaction");
        assert_eq!(1, size);

        let loaded = repo.get(transaction.transaction_id.as_str()).await.expect("should return transaction");
        assert_eq!(TransactionStatus::Returned, loaded.status);
        assert_eq!(transaction.returned_at, loaded.returned_at);
    }

    #[tokio::test]
    #[ignore = "requires local dynamodb"]
    async fn test_should_query_issued_transactions() {
        let repo = DDBTransactionRepository::new(CLIENT.get().await.clone(), "transactions", "transactions_ndx");
        for i in 0..20 {
            let status = if i % 2 == 0 { TransactionStatus::Issued } else { TransactionStatus::Returned };
            repo.create(&TransactionEntity::new("A3", "M-query", status)).await.expect("should create transaction");
        }
        let predicate = HashMap::from([
            ("status".to_string(), TransactionStatus::Issued.as_str().to_string()),
            ("member_id".to_string(), "M-query".to_string()),
        ]);
        let res = repo.query(&predicate, None, 100).await.expect("should query transactions");
        assert_eq!(10, res.records.len());
        let res = repo.find_by_status(TransactionStatus::Returned, None, 100).await.expect("should query transactions");
        assert!(res.records.len() >= 10);
    }

    #[tokio::test]
    #[ignore = "requires local dynamodb"]
    async fn test_should_create_delete_transaction() {
        let repo = DDBTransactionRepository::new(CLIENT.get().await.clone(), "transactions", "transactions_ndx");
        let transaction = TransactionEntity::new("A4", "M400", TransactionStatus::Issued);
        repo.create(&transaction).await.expect("should create transaction");
        let deleted = repo.delete(transaction.transaction_id.as_str()).await.expect("should delete transaction");
        assert_eq!(1, deleted);
        assert!(repo.get(transaction.transaction_id.as_str()).await.is_err());
    }
}
