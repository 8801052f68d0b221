//! Domain errors

use crate::domain::conversation::ServiceError;
use crate::domain::correlation::StoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Corrupt correlation entry {key}: {reason}")]
    CorruptCorrelation { key: String, reason: String },

    #[error("Unexpected conversation service response: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl DomainError {
    /// HTTP status and body returned by the conversation service, if that is
    /// what failed.
    pub fn remote_response(&self) -> Option<(u16, &serde_json::Value)> {
        match self {
            DomainError::Service(ServiceError::Http { status, body }) => Some((*status, body)),
            _ => None,
        }
    }
}
