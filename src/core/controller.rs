use std::sync::Arc;
use axum::http::{StatusCode, Uri};
use axum::Json;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::persons::domain::PersonService;
use crate::persons::factory;

#[derive(Clone)]
pub struct AppState {
    pub person_service: Arc<dyn PersonService>,
}

impl AppState {
    pub fn new(person_service: Arc<dyn PersonService>) -> AppState {
        AppState {
            person_service,
        }
    }

    pub async fn build(config: Configuration, store: RepositoryStore) -> AppState {
        let person_service = factory::create_person_service(&config, store).await;
        AppState::new(Arc::from(person_service))
    }
}

// ErrorResponse is the body of every failed request
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn new(message: &str, uri: &Uri) -> Self {
        Self {
            timestamp: Utc::now().naive_utc(),
            message: message.to_string(),
            details: format!("uri={}", uri.path()),
        }
    }
}

pub type ServerError = (StatusCode, Json<ErrorResponse>);

pub fn status_for(err: &CommandError) -> StatusCode {
    match err {
        CommandError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        CommandError::DuplicateKey { .. } => StatusCode::CONFLICT,
        CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
        CommandError::Serialization { .. } => StatusCode::BAD_REQUEST,
        CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
    }
}

pub fn to_server_error(err: CommandError, uri: &Uri) -> ServerError {
    let status = status_for(&err);
    if status.is_server_error() {
        error!(uri = %uri, status = status.as_u16(), error = ?err, "request failed");
    } else {
        info!(uri = %uri, status = status.as_u16(), error = ?err, "request rejected");
    }
    (status, Json(ErrorResponse::new(err.message(), uri)))
}

pub fn json_to_server_error(err: serde_json::Error, uri: &Uri) -> ServerError {
    to_server_error(CommandError::from(err), uri)
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, Uri};
    use crate::core::command::CommandError;
    use crate::core::controller::{json_to_server_error, to_server_error};

    #[tokio::test]
    async fn test_should_map_errors_to_status() {
        let uri = Uri::from_static("/person/1");
        let cases = vec![
            (CommandError::NotFound { message: "missing".to_string() }, StatusCode::NOT_FOUND),
            (CommandError::DuplicateKey { message: "dup".to_string() }, StatusCode::CONFLICT),
            (CommandError::Validation { message: "bad".to_string(), reason_code: None }, StatusCode::BAD_REQUEST),
            (CommandError::Serialization { message: "bad".to_string() }, StatusCode::BAD_REQUEST),
            (CommandError::Storage { message: "down".to_string(), reason_code: None, retryable: true }, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let (status, _) = to_server_error(err, &uri);
            assert_eq!(expected, status);
        }
    }

    #[tokio::test]
    async fn test_should_build_error_payload() {
        let uri = Uri::from_static("/person/42?verbose=true");
        let (_, body) = to_server_error(CommandError::NotFound { message: "No records found for this id: 42".to_string() }, &uri);
        assert_eq!("No records found for this id: 42", body.message.as_str());
        assert_eq!("uri=/person/42", body.details.as_str());

        let json = serde_json::to_value(&body.0).expect("should serialize");
        assert!(json.get("timestamp").is_some());
    }

    #[tokio::test]
    async fn test_should_map_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").expect_err("should fail");
        let (status, _) = json_to_server_error(err, &Uri::from_static("/person"));
        assert_eq!(StatusCode::BAD_REQUEST, status);
    }
}
