//! Database error types

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DbError {
    /// Whether the underlying driver reported a UNIQUE constraint violation
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::Sqlx(sqlx::Error::Database(e)) if e.is_unique_violation())
    }
}
