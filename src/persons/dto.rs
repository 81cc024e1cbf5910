use serde::{Deserialize, Deserializer, Serialize};
use crate::core::error::{PersonError, PersonResult};

pub const MAX_NAME_LEN: usize = 80;
pub const MAX_EMAIL_LEN: usize = 150;
pub const MAX_ADDRESS_LEN: usize = 100;
pub const MAX_GENDER_LEN: usize = 15;

// Person as seen by callers of the service; `id` is absent until the person is persisted.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub gender: String,
}

impl PersonDto {
    pub fn new(first_name: &str, last_name: &str, email: &str, address: &str, gender: &str) -> Self {
        Self {
            id: None,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            address: address.to_string(),
            gender: gender.to_string(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    // Checks every required field, email included.
    pub fn validate(&self) -> PersonResult<()> {
        check_field("email", self.email.as_str(), MAX_EMAIL_LEN)?;
        self.validate_descriptive()
    }

    // Checks the fields an update is allowed to replace.
    pub fn validate_descriptive(&self) -> PersonResult<()> {
        check_field("firstName", self.first_name.as_str(), MAX_NAME_LEN)?;
        check_field("lastName", self.last_name.as_str(), MAX_NAME_LEN)?;
        check_field("address", self.address.as_str(), MAX_ADDRESS_LEN)?;
        check_field("gender", self.gender.as_str(), MAX_GENDER_LEN)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

// Ids are strings, but clients of the numeric-id API still send `"id": 1`.
pub(crate) fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Text(text) => text,
        RawId::Number(n) => n.to_string(),
    }))
}

fn check_field(name: &str, value: &str, max_len: usize) -> PersonResult<()> {
    if value.trim().is_empty() {
        return Err(PersonError::validation(
            format!("{} must not be empty", name).as_str(), Some(name.to_string())));
    }
    if value.chars().count() > max_len {
        return Err(PersonError::validation(
            format!("{} must be at most {} characters", name, max_len).as_str(), Some(name.to_string())));
    }
    Ok(())
}
