/// Database Module
///
/// This module provides the handle abstractions the printers and the waiter
/// run against.
///
/// ## Architecture
///
/// - **Handles** (`handle.rs`): the `Handle`, `Cursor`, `ExecOutcome` and `Ping`
///   traits, implemented for `rusqlite::Connection`, `rusqlite::Transaction`
///   and the dynamically typed `HandleRef`
/// - **Query classification** (`query.rs`): decides whether SQL text returns rows
///
/// ## Error Handling
///
/// All database operations use the standardized `SqlPrintError` type.
pub mod handle;
pub mod query;

pub use handle::*;
pub use query::*;
