//! Database-specific error types and conversions.

use qrmenu_core::error::QrMenuError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Invalid {kind} name: {name:?}")]
    InvalidIdentifier { kind: &'static str, name: String },

    #[error("Unexpected row shape: {0}")]
    Conversion(String),
}

impl From<DbError> for QrMenuError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::InvalidIdentifier { .. } => QrMenuError::validation(err.to_string()),
            other => QrMenuError::StoreUnavailable(other.to_string()),
        }
    }
}
