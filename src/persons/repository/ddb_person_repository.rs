use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Delete, Put, TransactWriteItem};
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{PersonError, PersonResult, VERSION_CONFLICT};
use crate::core::repository::Repository;
use crate::persons::domain::model::PersonEntity;
use crate::persons::repository::PersonRepository;
use crate::utils::ddb::{is_put_condition_failure, is_transaction_condition_failure, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute};

// Persons live in `table_name` keyed by person_id. Every person also owns one guard item in
// `emails_table` keyed by email; both are written in one transaction so the store rejects
// a second person with the same email.
#[derive(Debug)]
pub struct DDBPersonRepository {
    client: Client,
    table_name: String,
    emails_table: String,
}

impl DDBPersonRepository {
    pub fn new(client: Client, table_name: &str, emails_table: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            emails_table: emails_table.to_string(),
        }
    }
}

#[async_trait]
impl Repository<PersonEntity> for DDBPersonRepository {
    async fn insert(&self, entity: &PersonEntity) -> PersonResult<PersonEntity> {
        let saved = entity.assigned(Uuid::new_v4().to_string());
        let val = serde_json::to_value(&saved)?;
        let person_put = Put::builder()
            .table_name(self.table_name.as_str())
            .condition_expression("attribute_not_exists(person_id)")
            .set_item(Some(parse_item(val)?))
            .build();
        let email_put = Put::builder()
            .table_name(self.emails_table.as_str())
            .condition_expression("attribute_not_exists(email)")
            .item("email", AttributeValue::S(saved.email.to_string()))
            .item("person_id", AttributeValue::S(saved.person_id.to_string()))
            .build();
        match self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(person_put).build())
            .transact_items(TransactWriteItem::builder().put(email_put).build())
            .send()
            .await {
            Ok(_) => Ok(saved),
            Err(err) if is_transaction_condition_failure(&err) => {
                Err(PersonError::unique_violation(saved.email.as_str()))
            }
            Err(err) => Err(PersonError::from(err)),
        }
    }

    async fn save(&self, entity: &PersonEntity) -> PersonResult<PersonEntity> {
        if !entity.is_persisted() {
            return Err(PersonError::storage("cannot save a person without id", None, false));
        }
        let next = entity.next_version();
        let val = serde_json::to_value(&next)?;
        // only an existing record at the expected version is replaced; the email guard is left
        // alone, so the email may not change either
        match self.client
            .put_item()
            .table_name(self.table_name.as_str())
            .set_item(Some(parse_item(val)?))
            .condition_expression("attribute_exists(person_id) AND version = :old_version AND email = :email")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":email", AttributeValue::S(entity.email.to_string()))
            .send()
            .await {
            Ok(_) => Ok(next),
            Err(err) if is_put_condition_failure(&err) => {
                Err(PersonError::storage(
                    format!("stale version {}, changed email or deleted record for {}", entity.version, entity.person_id).as_str(),
                    Some(VERSION_CONFLICT.to_string()), false))
            }
            Err(err) => Err(PersonError::from(err)),
        }
    }

    async fn find_by_id(&self, id: &str) -> PersonResult<Option<PersonEntity>> {
        let out = self.client
            .get_item()
            .table_name(self.table_name.as_str())
            .key("person_id", AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await?;
        Ok(out.item().map(PersonEntity::from))
    }

    async fn find_all(&self) -> PersonResult<Vec<PersonEntity>> {
        let mut records = vec![];
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let out = self.client
                .scan()
                .table_name(self.table_name.as_str())
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await?;
            if let Some(items) = out.items() {
                records.extend(items.iter().map(PersonEntity::from));
            }
            exclusive_start_key = out.last_evaluated_key().cloned();
            if exclusive_start_key.is_none() {
                break;
            }
            debug!(loaded = records.len(), "scanning next page of persons");
        }
        Ok(records)
    }

    async fn delete(&self, entity: &PersonEntity) -> PersonResult<usize> {
        let person_delete = Delete::builder()
            .table_name(self.table_name.as_str())
            .key("person_id", AttributeValue::S(entity.person_id.to_string()))
            .condition_expression("attribute_exists(person_id)")
            .build();
        let email_delete = Delete::builder()
            .table_name(self.emails_table.as_str())
            .key("email", AttributeValue::S(entity.email.to_string()))
            .condition_expression("person_id = :person_id")
            .expression_attribute_values(":person_id", AttributeValue::S(entity.person_id.to_string()))
            .build();
        match self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().delete(person_delete).build())
            .transact_items(TransactWriteItem::builder().delete(email_delete).build())
            .send()
            .await {
            Ok(_) => Ok(1),
            Err(err) if is_transaction_condition_failure(&err) => Ok(0),
            Err(err) => Err(PersonError::from(err)),
        }
    }
}

#[async_trait]
impl PersonRepository for DDBPersonRepository {
    // The guard table is read with strong consistency, unlike a secondary index.
    async fn find_by_email(&self, email: &str) -> PersonResult<Option<PersonEntity>> {
        let out = self.client
            .get_item()
            .table_name(self.emails_table.as_str())
            .key("email", AttributeValue::S(email.to_string()))
            .consistent_read(true)
            .send()
            .await?;
        match out.item().and_then(|map| parse_string_attribute("person_id", map)) {
            Some(person_id) => self.find_by_id(person_id.as_str()).await,
            None => Ok(None),
        }
    }
}

impl From<&HashMap<String, AttributeValue>> for PersonEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        PersonEntity {
            person_id: parse_string_attribute("person_id", map).unwrap_or(String::from("")),
            version: parse_number_attribute("version", map),
            first_name: parse_string_attribute("first_name", map).unwrap_or(String::from("")),
            last_name: parse_string_attribute("last_name", map).unwrap_or(String::from("")),
            email: parse_string_attribute("email", map).unwrap_or(String::from("")),
            address: parse_string_attribute("address", map).unwrap_or(String::from("")),
            gender: parse_string_attribute("gender", map).unwrap_or(String::from("")),
            created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
        }
    }
}
