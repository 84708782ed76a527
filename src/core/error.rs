/// sqlprint Error Module
///
/// This module defines the error type shared by the waiter and the printers.
/// Execution failures, malformed SQL text and unsupported handles are always
/// returned to the caller; the remaining kinds go through the configured
/// [`Escalation`](crate::core::Escalation) policy first.
use std::time::Duration;
use thiserror::Error;

/// Error type for sqlprint operations.
///
/// - Driver failures while preparing or executing SQL
/// - SQL text that is not exactly one statement
/// - Output sink failures
/// - Handles that are neither a connection nor a transaction
/// - Column metadata and affected-row introspection failures
/// - A database that never answered its liveness check
#[derive(Error, Debug)]
pub enum SqlPrintError {
    /// Errors reported by SQLite while executing a query or statement
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failures writing to the output sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQL text that is empty or holds more than one statement
    #[error("Statement error: {0}")]
    Statement(String),

    /// The handle is neither a connection nor a transaction
    #[error("not a connection or transaction: {0}")]
    UnsupportedHandle(String),

    /// Column names of a query result could not be read
    #[error("Column metadata error: {0}")]
    ColumnMetadata(String),

    /// The driver could not report how many rows a statement changed
    #[error("Rows affected unavailable: {0}")]
    RowsAffected(String),

    /// The liveness check kept failing until the deadline passed
    #[error("Database unavailable after {waited:?}: {last}")]
    Unavailable { waited: Duration, last: String },

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Result to use SqlPrintError as the error type.
pub type Result<T> = std::result::Result<T, SqlPrintError>;
