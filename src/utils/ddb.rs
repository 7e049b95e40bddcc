use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::endpoint::DefaultResolver;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::{AttributeDefinition, AttributeValue, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection, ProjectionType, ProvisionedThroughput, ScalarAttributeType, TableStatus};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use crate::core::library::{ErrorKind, LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;
use crate::utils::date::DATE_FMT;

// Item reads typed attributes from a stored row. Missing or mistyped attributes
// read as None (or zero for numbers) so older rows still load.
pub(crate) struct Item<'a>(pub &'a HashMap<String, AttributeValue>);

impl<'a> Item<'a> {
    pub fn string(&self, name: &str) -> Option<String> {
        match self.0.get(name) {
            Some(AttributeValue::S(val)) => Some(val.clone()),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> i64 {
        match self.0.get(name) {
            Some(AttributeValue::N(val)) => val.parse().unwrap_or_default(),
            _ => 0,
        }
    }

    pub fn date(&self, name: &str) -> Option<NaiveDateTime> {
        self.string(name).and_then(|val| NaiveDateTime::parse_from_str(val.as_str(), DATE_FMT).ok())
    }
}

// to_item stores an entity through its serde form, so column names follow field names.
pub(crate) fn to_item<T: Serialize>(entity: &T) -> LibraryResult<HashMap<String, AttributeValue>> {
    match to_attribute(serde_json::to_value(entity)?) {
        AttributeValue::M(map) => Ok(map),
        other => Err(LibraryError::invalid(format!("expected an object but got {:?}", other))),
    }
}

pub(crate) fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(a) => AttributeValue::L(a.into_iter().map(to_attribute).collect()),
        Value::Object(o) => AttributeValue::M(o.into_iter().map(|(k, v)| (k, to_attribute(v))).collect()),
    }
}

pub(crate) fn date_value(date: NaiveDateTime) -> AttributeValue {
    AttributeValue::S(date.format(DATE_FMT).to_string())
}

// filters turns predicate entries into an AND-ed filter expression. A key may carry
// its operator after a colon, e.g. "due_at:<=". Keys listed in `skip` are left to
// the key condition.
pub(crate) fn filters(predicate: &HashMap<String, String>, skip: &[&str])
                      -> (Option<String>, Vec<(String, AttributeValue)>) {
    let mut keys: Vec<&String> = predicate.keys().filter(|k| !skip.contains(&k.as_str())).collect();
    keys.sort();
    let mut clauses = vec![];
    let mut values = vec![];
    for key in keys {
        let (name, op) = key.split_once(':').unwrap_or((key.as_str(), "="));
        clauses.push(format!("{} {} :{}", name, op, name));
        values.push((format!(":{}", name), AttributeValue::S(predicate[key].clone())));
    }
    if clauses.is_empty() {
        return (None, values);
    }
    (Some(clauses.join(" AND ")), values)
}

// Page tokens are the JSON form of the last evaluated key.
pub(crate) fn start_key(page: Option<&str>) -> LibraryResult<Option<HashMap<String, AttributeValue>>> {
    let Some(page) = page else {
        return Ok(None);
    };
    let keys: HashMap<String, String> = serde_json::from_str(page)
        .map_err(|err| LibraryError::invalid(format!("bad page token {}: {}", page, err)))?;
    Ok(Some(keys.into_iter().map(|(k, v)| (k, AttributeValue::S(v))).collect()))
}

pub(crate) fn next_page(last_evaluated_key: Option<&HashMap<String, AttributeValue>>) -> Option<String> {
    let keys: HashMap<&String, &String> = last_evaluated_key?.iter()
        .filter_map(|(k, v)| v.as_s().ok().map(|s| (k, s)))
        .collect();
    serde_json::to_string(&keys).ok()
}

// create_table creates a table keyed by `pk`. With `gsi` it also adds an index
// named `<table>_ndx` over (hash, range).
pub async fn create_table(client: &Client, table_name: &str, pk: &str,
                          gsi: Option<(&str, &str)>) -> LibraryResult<()> {
    let mut request = client
        .create_table()
        .table_name(table_name)
        .key_schema(key(pk, KeyType::Hash))
        .attribute_definitions(string_attribute(pk))
        .provisioned_throughput(throughput());
    if let Some((hash, range)) = gsi {
        request = request
            .global_secondary_indexes(GlobalSecondaryIndex::builder()
                .index_name(format!("{}_ndx", table_name))
                .key_schema(key(hash, KeyType::Hash))
                .key_schema(key(range, KeyType::Range))
                .projection(Projection::builder().projection_type(ProjectionType::All).build())
                .provisioned_throughput(throughput())
                .build())
            .attribute_definitions(string_attribute(hash))
            .attribute_definitions(string_attribute(range));
    }
    request.send().await?;
    wait_while(client, table_name, TableStatus::Creating).await;
    Ok(())
}

pub async fn delete_table(client: &Client, table_name: &str) -> LibraryResult<()> {
    client.delete_table().table_name(table_name).send().await?;
    wait_while(client, table_name, TableStatus::Deleting).await;
    Ok(())
}

fn key(name: &str, key_type: KeyType) -> KeySchemaElement {
    KeySchemaElement::builder().attribute_name(name).key_type(key_type).build()
}

fn string_attribute(name: &str) -> AttributeDefinition {
    AttributeDefinition::builder().attribute_name(name).attribute_type(ScalarAttributeType::S).build()
}

fn throughput() -> ProvisionedThroughput {
    ProvisionedThroughput::builder().read_capacity_units(10).write_capacity_units(10).build()
}

// wait_while polls for up to 30 seconds. A table that is gone counts as settled.
async fn wait_while(client: &Client, table_name: &str, status: TableStatus) {
    for _ in 0..30 {
        let current = client.describe_table().table_name(table_name).send().await
            .ok()
            .and_then(|out| out.table().and_then(|table| table.table_status()).cloned());
        if current.as_ref() != Some(&status) {
            return;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

// in-memory stores never reach this
pub async fn build_db_client(store: RepositoryStore) -> Client {
    match store {
        RepositoryStore::LocalDynamoDB => {
            // See https://docs.aws.amazon.com/sdk-for-rust/latest/dg/dynamodb-local.html
            let local = aws_sdk_dynamodb::Config::builder()
                .region(Region::new("local"))
                .credentials_provider(Credentials::new("AKIDLOCALSTACK", "localstacksecret", None, None, "faked"))
                .endpoint_resolver(DefaultResolver::new())
                .build();
            Client::from_conf(local)
        }
        RepositoryStore::DynamoDB | RepositoryStore::InMemory => Client::new(&aws_config::load_from_env().await),
    }
}

pub async fn build_sns_client() -> aws_sdk_sns::Client {
    aws_sdk_sns::Client::new(&aws_config::load_from_env().await)
}

// JSON lines without ANSI colours or timestamps, CloudWatch adds its own.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .json()
        .init();
}

// DynamoDB and SNS share the smithy SdkError, so one conversion covers every operation.
impl<E: Debug> From<SdkError<E>> for LibraryError {
    fn from(err: SdkError<E>) -> Self {
        let message = format!("{:?}", err);
        match &err {
            SdkError::ConstructionFailure { .. } => LibraryError::new(ErrorKind::Store, message),
            SdkError::ServiceError(ctx) => {
                let http = ctx.raw().http();
                service_error(message, http.status().as_u16(), http.body().bytes().unwrap_or_default())
            }
            _ => LibraryError::unavailable(message),
        }
    }
}

// Failed conditions (duplicate key, stale version) come back as a 400 with
// "ConditionalCheckFailedException", throttling as "...ExceededException".
fn service_error(message: String, status: u16, body: &[u8]) -> LibraryError {
    if contains(body, b"ConditionalCheckFailed") {
        return LibraryError::conflict(message);
    }
    LibraryError::from_status(message, status, contains(body, b"Exceeded"))
}

fn contains(body: &[u8], needle: &[u8]) -> bool {
    body.windows(needle.len()).any(|w| w == needle)
}
