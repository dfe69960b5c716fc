//! Error taxonomy shared by the access layer and the entity stores.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessError {
    /// Malformed or missing required input. Never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced parent record does not exist.
    #[error("{table} {id} does not exist")]
    Reference { table: String, id: i32 },

    /// The target of an update does not exist.
    #[error("{table} {id} not found")]
    NotFound { table: String, id: i32 },

    /// Connectivity, constraint violation or a row the store could not decode.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AccessError {
    pub fn validation(message: impl Into<String>) -> Self {
        AccessError::Validation(message.into())
    }

    pub fn reference(table: &str, id: i32) -> Self {
        AccessError::Reference {
            table: table.to_string(),
            id,
        }
    }

    pub fn not_found(table: &str, id: i32) -> Self {
        AccessError::NotFound {
            table: table.to_string(),
            id,
        }
    }
}

impl From<sqlx::Error> for AccessError {
    fn from(err: sqlx::Error) -> Self {
        AccessError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AccessError {
    fn from(err: serde_json::Error) -> Self {
        AccessError::Storage(format!("record (de)serialization failed: {}", err))
    }
}
