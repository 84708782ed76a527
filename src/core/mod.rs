/// Core Module for sqlprint
///
/// Shared infrastructure used by the waiter and the printers: the error type,
/// the escalation policy for fatal conditions, and the database handle
/// abstractions.

pub mod db;
pub mod error;
pub mod escalation;

// Re-export commonly used types for convenience
pub use error::{Result, SqlPrintError};
pub use escalation::Escalation;
