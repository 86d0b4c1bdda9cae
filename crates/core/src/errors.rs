//! Core error types for the shop cart engine.
//!
//! This module defines database-agnostic error types. Storage-specific
//! errors (from Diesel, SQLite, etc.) are converted to these types by the
//! storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the shop cart engine.
///
/// Every operation exposed to the transport layer returns one of these
/// kinds. None of them is fatal to the process; each operation is
/// independently retryable by its caller.
#[derive(Error, Debug)]
pub enum Error {
    /// The referenced item or cart id does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input validation failed before any write was attempted.
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A partial update supplied no field that differs from the stored
    /// values, so no write was performed.
    #[error("Not modified: {0}")]
    NotModified(String),

    /// A concurrent mutation raced this one. Callers may retry the whole
    /// operation.
    #[error("Conflicting concurrent update: {0}")]
    Conflict(String),

    /// The storage layer failed. Once a write has begun, failures surface
    /// here rather than as one of the business-rule kinds above; the
    /// caller should retry the whole operation and never assume partial
    /// application.
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),
}

/// Database-agnostic error type for storage operations.
///
/// Uses `String` for all error details, allowing the storage layer to
/// convert storage-specific errors (Diesel, r2d2, SQLite) into this
/// format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// A stored row could not be decoded into its domain record.
    #[error("Row decode failed: {0}")]
    Decode(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for caller input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Field '{0}' cannot be modified")]
    ForbiddenField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Database(DatabaseError::Decode(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
