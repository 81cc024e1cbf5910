use async_trait::async_trait;
use crate::core::error::PersonError;

#[derive(Debug)]
pub enum CommandError {
    Storage {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            CommandError::Storage { message, .. } => message,
            CommandError::DuplicateKey { message } => message,
            CommandError::NotFound { message } => message,
            CommandError::Serialization { message } => message,
            CommandError::Validation { message, .. } => message,
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<PersonError> for CommandError {
    fn from(other: PersonError) -> Self {
        match other {
            PersonError::StorageFailure { message, reason_code, retryable } => {
                CommandError::Storage { message, reason_code, retryable }
            }
            PersonError::DuplicateIdentity { message, .. } => {
                CommandError::DuplicateKey { message }
            }
            PersonError::NotFound { message, .. } => {
                CommandError::NotFound { message }
            }
            PersonError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
        }
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::Serialization { message: err.to_string() }
    }
}
