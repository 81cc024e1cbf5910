use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

// Reason code reported by a store when a write would break email uniqueness.
pub const UNIQUE_VIOLATION: &str = "UniqueViolation";

// Reason code reported by a store when a save races with another save of the same record.
pub const VERSION_CONFLICT: &str = "VersionConflict";

#[derive(Debug)]
pub enum PersonError {
    NotFound {
        message: String,
        id: String,
    },
    DuplicateIdentity {
        message: String,
        email: String,
    },
    // Infrastructure failure, e.g. connection loss or a constraint rejected by the store.
    StorageFailure {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

// ErrorKind is the discriminator translators match on
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    DuplicateIdentity,
    StorageFailure,
    Validation,
}

impl PersonError {
    pub fn not_found(id: &str) -> PersonError {
        PersonError::NotFound {
            message: format!("No records found for this id: {}", id),
            id: id.to_string(),
        }
    }

    pub fn duplicate_identity(email: &str) -> PersonError {
        PersonError::DuplicateIdentity {
            message: format!("Person already exist with given email: {}", email),
            email: email.to_string(),
        }
    }

    pub fn storage(message: &str, reason_code: Option<String>, retryable: bool) -> PersonError {
        PersonError::StorageFailure { message: message.to_string(), reason_code, retryable }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> PersonError {
        PersonError::Validation { message: message.to_string(), reason_code }
    }

    pub fn unique_violation(email: &str) -> PersonError {
        PersonError::storage(format!("email {} is already stored", email).as_str(),
                             Some(UNIQUE_VIOLATION.to_string()), false)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PersonError::NotFound { .. } => ErrorKind::NotFound,
            PersonError::DuplicateIdentity { .. } => ErrorKind::DuplicateIdentity,
            PersonError::StorageFailure { .. } => ErrorKind::StorageFailure,
            PersonError::Validation { .. } => ErrorKind::Validation,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PersonError::NotFound { message, .. } => message,
            PersonError::DuplicateIdentity { message, .. } => message,
            PersonError::StorageFailure { message, .. } => message,
            PersonError::Validation { message, .. } => message,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, PersonError::StorageFailure { reason_code: Some(reason), .. } if reason == UNIQUE_VIOLATION)
    }

    // Maps a store failure to the taxonomy: retryable failures stay retryable, a 404 from the
    // store means the record is gone and anything else is a plain storage failure.
    pub fn storage_or_not_found(message: &str, id: Option<&str>, reason: Option<String>, retryable: bool) -> PersonError {
        if retryable {
            return PersonError::storage(
                format!("ddb storage unavailable {:?} {:?}", message, reason).as_str(), reason, true);
        }
        if let (Some(id), Some(reason_val)) = (id, reason.as_ref()) {
            if reason_val.as_str().contains("404") {
                return PersonError::not_found(id);
            }
        }
        PersonError::storage(
            format!("ddb storage error {:?} {:?}", message, reason).as_str(), reason, false)
    }
}

impl From<serde_json::Error> for PersonError {
    fn from(err: serde_json::Error) -> Self {
        PersonError::storage(
            format!("serde json parsing {:?}", err).as_str(), Some("Serialization".to_string()), false)
    }
}

impl From<String> for PersonError {
    fn from(err: String) -> Self {
        PersonError::storage(
            format!("serde parsing {:?}", err).as_str(), Some("Serialization".to_string()), false)
    }
}

impl Display for PersonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PersonError::NotFound { message, .. } => {
                write!(f, "{}", message)
            }
            PersonError::DuplicateIdentity { message, .. } => {
                write!(f, "{}", message)
            }
            PersonError::StorageFailure { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            PersonError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for PersonError {}

/// A specialized Result type for person operations.
pub type PersonResult<T> = Result<T, PersonError>;
