use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{date_value, filters, Item, next_page, start_key, to_item};

// DDBBookRepository stores the catalog in one table keyed by isbn.
#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
}

impl DDBBookRepository {
    pub fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        if entity.isbn.is_empty() {
            return Err(LibraryError::invalid("book isbn is required"));
        }
        self.client
            .put_item()
            .table_name(self.table_name.as_str())
            .condition_expression("attribute_not_exists(isbn)")
            .set_item(Some(to_item(entity)?))
            .send()
            .await?;
        Ok(1)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let cover = entity.cover_image_url.as_ref()
            .map(|url| AttributeValue::S(url.to_string())).unwrap_or(AttributeValue::Null(true));
        self.client
            .update_item()
            .table_name(self.table_name.as_str())
            .key("isbn", AttributeValue::S(entity.isbn.clone()))
            .update_expression("SET version = :version, title = :title, cover_image_url = :cover_image_url, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":title", AttributeValue::S(entity.title.to_string()))
            .expression_attribute_values(":cover_image_url", cover)
            .expression_attribute_values(":updated_at", date_value(Utc::now().naive_utc()))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await?;
        Ok(1)
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let out = self.client
            .get_item()
            .table_name(self.table_name.as_str())
            .key("isbn", AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await?;
        out.item().map(|map| book_from(Item(map)))
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id)))
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.client.delete_item()
            .table_name(self.table_name.as_str())
            .key("isbn", AttributeValue::S(id.to_string()))
            .send()
            .await?;
        Ok(1)
    }

    // no secondary index, so every query is a filtered scan
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        let (filter, values) = filters(predicate, &[]);
        let mut request = self.client
            .scan()
            .table_name(self.table_name.as_str())
            .set_exclusive_start_key(start_key(page)?)
            .set_filter_expression(filter)
            .limit(cmp::min(page_size, 500) as i32);
        for (name, value) in values {
            request = request.expression_attribute_values(name, value);
        }
        let out = request.send().await?;
        let records = out.items().unwrap_or_default().iter().map(|map| book_from(Item(map))).collect();
        Ok(PaginatedResult::new(page, page_size, next_page(out.last_evaluated_key()), records))
    }
}

impl BookRepository for DDBBookRepository {}

fn book_from(item: Item) -> BookEntity {
    let now = Utc::now().naive_utc();
    BookEntity {
        isbn: item.string("isbn").unwrap_or_default(),
        version: item.number("version"),
        title: item.string("title").unwrap_or_default(),
        cover_image_url: item.string("cover_image_url"),
        created_at: item.date("created_at").unwrap_or(now),
        updated_at: item.date("updated_at").unwrap_or(now),
    }
}
