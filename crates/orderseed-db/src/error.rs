//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  mongodb::error::Error / bson::ser::Error / CoreError                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bin/seed: "An error occurred: ..." → exit code 1                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mongodb::error::ErrorKind;
use orderseed_core::{CoreError, ValidationError};
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Could not reach a server.
    ///
    /// ## When This Occurs
    /// - Invalid connection string
    /// - No server answered within the server-selection timeout
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The server rejected a command.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A bulk insert did not complete.
    #[error("Insert into {collection} failed: {message}")]
    InsertFailed { collection: String, message: String },

    /// Index creation failed.
    #[error("Index on {collection} failed: {message}")]
    IndexFailed { collection: String, message: String },

    /// An entity could not be turned into a document.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// A document could not be read back into an entity.
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    /// A collection does not hold the expected number of documents.
    #[error("{collection} holds {actual} documents, expected {expected}")]
    CountMismatch {
        collection: String,
        expected: u64,
        actual: u64,
    },

    /// Generation or validation failure from orderseed-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Wraps a failed insert with the collection it targeted.
    pub fn insert_failed(collection: impl Into<String>, err: impl std::fmt::Display) -> Self {
        DbError::InsertFailed {
            collection: collection.into(),
            message: err.to_string(),
        }
    }

    /// Wraps a failed index creation with the collection it targeted.
    pub fn index_failed(collection: impl Into<String>, err: impl std::fmt::Display) -> Self {
        DbError::IndexFailed {
            collection: collection.into(),
            message: err.to_string(),
        }
    }
}

/// Convert driver errors to DbError.
///
/// ## Error Mapping
/// ```text
/// ErrorKind::ServerSelection     → DbError::ConnectionFailed
/// ErrorKind::InvalidArgument     → DbError::ConnectionFailed (bad URI/options)
/// ErrorKind::Command             → DbError::QueryFailed
/// ErrorKind::BsonSerialization   → DbError::Serialization
/// ErrorKind::BsonDeserialization → DbError::Deserialization
/// Other                          → DbError::Internal
/// ```
impl From<mongodb::error::Error> for DbError {
    fn from(err: mongodb::error::Error) -> Self {
        match *err.kind {
            ErrorKind::ServerSelection { ref message, .. } => {
                DbError::ConnectionFailed(message.clone())
            }
            ErrorKind::InvalidArgument { ref message, .. } => {
                DbError::ConnectionFailed(message.clone())
            }
            ErrorKind::Command(ref command_err) => DbError::QueryFailed(format!(
                "{} ({}): {}",
                command_err.code_name, command_err.code, command_err.message
            )),
            ErrorKind::BsonSerialization(ref e) => DbError::Serialization(e.to_string()),
            ErrorKind::BsonDeserialization(ref e) => DbError::Deserialization(e.to_string()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<bson::ser::Error> for DbError {
    fn from(err: bson::ser::Error) -> Self {
        DbError::Serialization(err.to_string())
    }
}

impl From<bson::de::Error> for DbError {
    fn from(err: bson::de::Error) -> Self {
        DbError::Deserialization(err.to_string())
    }
}

impl From<ValidationError> for DbError {
    fn from(err: ValidationError) -> Self {
        DbError::Core(CoreError::Validation(err))
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DbError::CountMismatch {
            collection: "orders".to_string(),
            expected: 500_000,
            actual: 450_000,
        };
        assert_eq!(err.to_string(), "orders holds 450000 documents, expected 500000");

        let err = DbError::insert_failed("stores", "write concern timeout");
        assert_eq!(err.to_string(), "Insert into stores failed: write concern timeout");
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: DbError = CoreError::empty_pool("products").into();
        assert_eq!(err.to_string(), "Cannot generate orders: no products available");
    }
}
