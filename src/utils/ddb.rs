use std::collections::HashMap;
use std::time::Duration;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsError;
use aws_sdk_dynamodb::types::{AttributeDefinition, AttributeValue, CancellationReason, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType, TableStatus};
use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::debug;
use crate::core::domain::Configuration;
use crate::core::error::{PersonError, PersonResult};
use crate::core::repository::RepositoryStore;
use crate::utils::date::DATE_FMT;

pub(crate) async fn create_table(client: &Client, table_name: &str, pk: &str) -> PersonResult<()> {
    match client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(pk)
                .key_type(KeyType::Hash)
                .build(),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(pk)
                .attribute_type(ScalarAttributeType::S)
                .build(),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(10)
                .write_capacity_units(10)
                .build(),
        )
        .send()
        .await
    {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Creating).await;
            Ok(())
        }
        Err(err) => {
            Err(PersonError::storage(format!("failed to create {} table due to {}",
                                             table_name, err).as_str(), None, false))
        }
    }
}

pub(crate) async fn delete_table(client: &Client, table_name: &str) -> PersonResult<()> {
    match client.delete_table().table_name(table_name).send().await {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Deleting).await;
            Ok(())
        }
        Err(err) => {
            Err(PersonError::storage(format!("failed to delete {} table due to {}",
                                             table_name, err).as_str(), None, false))
        }
    }
}

async fn wait_until_table_status_is_not(client: &Client, table_name: &str, other_status: TableStatus) {
    for _i in 0..30 {
        if let Ok(status) = describe_table(client, table_name).await {
            if status != other_status {
                return;
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

async fn describe_table(client: &Client, table_name: &str) -> PersonResult<TableStatus> {
    match client
        .describe_table()
        .table_name(table_name)
        .send()
        .await
    {
        Ok(out) => {
            if let Some(table) = out.table() {
                if let Some(status) = table.table_status() {
                    return Ok(status.clone());
                }
            }
            Err(PersonError::storage(format!("failed to describe {} table",
                                             table_name).as_str(), None, false))
        }
        Err(err) => {
            Err(PersonError::storage(format!("failed to describe {} table due to {}",
                                             table_name, err).as_str(), None, false))
        }
    }
}

pub(crate) fn parse_item(value: Value) -> Result<HashMap<String, AttributeValue>, String> {
    match value_to_item(value) {
        AttributeValue::M(map) => Ok(map),
        other => Err(format!("failed to parse{:?}", other)),
    }
}

pub(crate) fn parse_string_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<String> {
    if let Some(AttributeValue::S(str)) = map.get(name) {
        return Some(str.clone());
    }
    None
}

pub(crate) fn parse_date_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<NaiveDateTime> {
    if let Some(AttributeValue::S(str)) = map.get(name) {
        // e.g. 2022-09-24T04:40:35.726029
        if let Ok(date) = NaiveDateTime::parse_from_str(str, DATE_FMT) {
            return Some(date);
        }
    }
    None
}

pub(crate) fn parse_number_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> i64 {
    if let Some(AttributeValue::N(str)) = map.get(name) {
        if let Ok(n) = str.parse::<i64>() {
            return n;
        }
    }
    0
}

fn value_to_item(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(a) => AttributeValue::L(a.into_iter().map(value_to_item).collect()),
        Value::Object(o) => {
            AttributeValue::M(o.into_iter().map(|(k, v)| (k, value_to_item(v))).collect())
        }
    }
}

// helper method to build db-client for the given store
pub(crate) async fn build_db_client(config: &Configuration, store: RepositoryStore) -> Client {
    match store {
        RepositoryStore::DynamoDB => {
            //Get config from environment.
            let aws_config = aws_config::load_from_env().await;
            Client::new(&aws_config)
        }
        RepositoryStore::LocalDynamoDB | RepositoryStore::Memory => {
            // See https://docs.aws.amazon.com/sdk-for-rust/latest/dg/dynamodb-local.html
            debug!(endpoint = config.local_endpoint.as_str(), "using dynamodb local");
            let dynamodb_local_config = aws_sdk_dynamodb::Config::builder()
                .region(Region::new("local"))
                .credentials_provider(
                    Credentials::new("AKIDLOCALSTACK", "localstacksecret", None, None, "faked"))
                .endpoint_url(config.local_endpoint.as_str())
                .build();
            Client::from_conf(dynamodb_local_config)
        }
    }
}

pub(crate) fn is_put_condition_failure(err: &SdkError<PutItemError>) -> bool {
    matches!(err, SdkError::ServiceError(ctx) if ctx.err().is_conditional_check_failed_exception())
}

// A transaction cancelled by one of its condition checks.
pub(crate) fn is_transaction_condition_failure(err: &SdkError<TransactWriteItemsError>) -> bool {
    match err {
        SdkError::ServiceError(ctx) => match ctx.err() {
            TransactWriteItemsError::TransactionCanceledException(cancelled) => {
                has_condition_failure(cancelled.cancellation_reasons())
            }
            _ => false,
        },
        _ => false,
    }
}

fn has_condition_failure(reasons: Option<&[CancellationReason]>) -> bool {
    reasons.unwrap_or_default().iter().any(|reason| reason.code() == Some("ConditionalCheckFailed"))
}

impl From<SdkError<GetItemError>> for PersonError {
    fn from(err: SdkError<GetItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        PersonError::storage_or_not_found(format!("{:?}", err).as_str(), None, reason, retryable)
    }
}

impl From<SdkError<PutItemError>> for PersonError {
    fn from(err: SdkError<PutItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        PersonError::storage_or_not_found(format!("{:?}", err).as_str(), None, reason, retryable)
    }
}

impl From<SdkError<ScanError>> for PersonError {
    fn from(err: SdkError<ScanError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        PersonError::storage_or_not_found(format!("{:?}", err).as_str(), None, reason, retryable)
    }
}

impl From<SdkError<TransactWriteItemsError>> for PersonError {
    fn from(err: SdkError<TransactWriteItemsError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        PersonError::storage_or_not_found(format!("{:?}", err).as_str(), None, reason, retryable)
    }
}

fn retryable_sdk_error<T>(err: &SdkError<T>) -> (bool, Option<String>) {
    match err {
        SdkError::ConstructionFailure(_) => { (false, Some("ConstructionFailure".to_string())) }
        SdkError::TimeoutError(_) => { (true, Some("TimeoutError".to_string())) }
        SdkError::DispatchFailure(_) => { (true, Some("DispatchFailure".to_string())) }
        SdkError::ResponseError { .. } => { (true, Some("ResponseError".to_string())) }
        SdkError::ServiceError(ctx) => {
            (ctx.raw().http().status().is_server_error() || has_exceeded_limit(ctx.raw().http().body().bytes()), Some(ctx.raw().http().status().to_string()))
        }
        _ => { (true, Some("Unknown".to_string())) }
    }
}

// throughput and request limit errors report "...LimitExceeded..." in the body
fn has_exceeded_limit(opts: Option<&[u8]>) -> bool {
    if let Some(b) = opts {
        return b.windows(6).any(|w| w == b"ceeded");
    }
    false
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use aws_sdk_dynamodb::types::AttributeValue;
    use serde_json::json;
    use aws_sdk_dynamodb::error::SdkError;
    use aws_sdk_dynamodb::operation::put_item::PutItemError;
    use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsError;
    use aws_sdk_dynamodb::types::CancellationReason;
    use crate::utils::ddb::{has_condition_failure, has_exceeded_limit, is_put_condition_failure, is_transaction_condition_failure, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute};

    #[tokio::test]
    async fn test_should_parse_item() {
        let item = parse_item(json!({"person_id": "1", "version": 3, "created_at": "2022-09-24T04:40:35.726029"}))
            .expect("should parse item");
        assert_eq!(Some("1".to_string()), parse_string_attribute("person_id", &item));
        assert_eq!(3, parse_number_attribute("version", &item));
        assert!(parse_date_attribute("created_at", &item).is_some());
        assert_eq!(None, parse_string_attribute("email", &item));
    }

    #[tokio::test]
    async fn test_should_reject_non_object_item() {
        assert!(parse_item(json!("person")).is_err());
    }

    #[tokio::test]
    async fn test_should_default_missing_number() {
        let item: HashMap<String, AttributeValue> = HashMap::from([
            ("version".to_string(), AttributeValue::S("x".to_string()))]);
        assert_eq!(0, parse_number_attribute("version", &item));
    }

    #[tokio::test]
    async fn test_should_detect_exceeded_limit() {
        assert!(has_exceeded_limit(Some(&b"ProvisionedThroughputExceededException"[..])));
        assert!(!has_exceeded_limit(Some(&b"short"[..])));
        assert!(!has_exceeded_limit(None));
    }

    #[tokio::test]
    async fn test_should_detect_cancelled_condition() {
        let failed = vec![
            CancellationReason::builder().code("None").build(),
            CancellationReason::builder().code("ConditionalCheckFailed").build(),
        ];
        assert!(has_condition_failure(Some(&failed[..])));

        let throttled = vec![CancellationReason::builder().code("ThrottlingError").build()];
        assert!(!has_condition_failure(Some(&throttled[..])));
        assert!(!has_condition_failure(None));
    }

    #[tokio::test]
    async fn test_should_not_treat_transport_errors_as_condition_failure() {
        let put_err: SdkError<PutItemError> = SdkError::timeout_error("timed out");
        assert!(!is_put_condition_failure(&put_err));
        let tx_err: SdkError<TransactWriteItemsError> = SdkError::construction_failure("bad request");
        assert!(!is_transaction_condition_failure(&tx_err));
    }
}
