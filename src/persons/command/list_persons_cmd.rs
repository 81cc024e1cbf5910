use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::persons::dto::PersonDto;
use crate::core::command::{Command, CommandError};
use crate::persons::domain::PersonService;

pub struct ListPersonsCommand {
    person_service: Arc<dyn PersonService>,
}

impl ListPersonsCommand {
    pub fn new(person_service: Arc<dyn PersonService>) -> Self {
        Self {
            person_service,
        }
    }
}

#[derive(Debug, Default)]
pub struct ListPersonsCommandRequest {}

#[derive(Debug, Serialize)]
pub struct ListPersonsCommandResponse {
    pub persons: Vec<PersonDto>,
}

#[async_trait]
impl Command<ListPersonsCommandRequest, ListPersonsCommandResponse> for ListPersonsCommand {
    async fn execute(&self, _req: ListPersonsCommandRequest) -> Result<ListPersonsCommandResponse, CommandError> {
        self.person_service.find_all()
            .await.map_err(CommandError::from).map(|persons| ListPersonsCommandResponse { persons })
    }
}
