//! Error types for the QR menu directory.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrMenuError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Entity is inactive: {entity} with id {id}")]
    Inactive { entity: String, id: String },

    #[error("Document store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("QR content exceeds the capacity of the code")]
    EncodingTooLarge,

    #[error("QR encoding failed: {0}")]
    EncodingFailed(String),
}

impl QrMenuError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for QrMenuError {
    fn from(err: serde_json::Error) -> Self {
        QrMenuError::StoreUnavailable(format!("document conversion failed: {err}"))
    }
}

pub type QrMenuResult<T> = Result<T, QrMenuError>;
