use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::persons::dto::{deserialize_id, PersonDto};
use crate::core::command::{Command, CommandError};
use crate::persons::domain::PersonService;

pub struct AddPersonCommand {
    person_service: Arc<dyn PersonService>,
}

impl AddPersonCommand {
    pub fn new(person_service: Arc<dyn PersonService>) -> Self {
        Self {
            person_service,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPersonCommandRequest {
    // only present to be rejected, a new person never carries an id
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub gender: String,
}

impl AddPersonCommandRequest {
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

    pub fn build_person(&self) -> PersonDto {
        PersonDto {
            id: self.id.clone(),
            first_name: self.first_name.to_string(),
            last_name: self.last_name.to_string(),
            email: self.email.to_string(),
            address: self.address.to_string(),
            gender: self.gender.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddPersonCommandResponse {
    pub person: PersonDto,
}

impl AddPersonCommandResponse {
    pub fn new(person: PersonDto) -> Self {
        Self {
            person,
        }
    }
}

#[async_trait]
impl Command<AddPersonCommandRequest, AddPersonCommandResponse> for AddPersonCommand {
    async fn execute(&self, req: AddPersonCommandRequest) -> Result<AddPersonCommandResponse, CommandError> {
        let person = req.build_person();
        self.person_service.create(&person).await.map_err(CommandError::from).map(AddPersonCommandResponse::new)
    }
}
