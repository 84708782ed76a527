// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod config;
pub mod printer;
pub mod results_grid;
pub mod wait;

#[cfg(test)]
mod test_utils;

pub use crate::core::db::{Handle, HandleKind, HandleRef, Ping};
pub use crate::core::{Escalation, Result, SqlPrintError};
pub use printer::{print_exec, print_query, Printer};
pub use wait::{wait_for_db, Waiter};
