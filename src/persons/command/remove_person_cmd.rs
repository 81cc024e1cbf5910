use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::persons::domain::PersonService;

pub struct RemovePersonCommand {
    person_service: Arc<dyn PersonService>,
}

impl RemovePersonCommand {
    pub fn new(person_service: Arc<dyn PersonService>) -> Self {
        Self {
            person_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemovePersonCommandRequest {
    pub person_id: String,
}

impl RemovePersonCommandRequest {
    pub fn new(person_id: String) -> Self {
        Self {
            person_id,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct RemovePersonCommandResponse {}

#[async_trait]
impl Command<RemovePersonCommandRequest, RemovePersonCommandResponse> for RemovePersonCommand {
    async fn execute(&self, req: RemovePersonCommandRequest) -> Result<RemovePersonCommandResponse, CommandError> {
        self.person_service.delete(req.person_id.as_str()).await
            .map_err(CommandError::from).map(|_| RemovePersonCommandResponse::default())
    }
}
