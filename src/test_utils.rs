/// # Test Utilities Module
///
/// Scriptable stand-ins for database handles, used to drive the failure
/// paths SQLite itself never produces (unreadable column metadata, an
/// affected-row count the driver cannot report, a database that is down).
///
/// Every fake records what was done to it in a shared call log so tests can
/// assert on ordering, e.g. that a cursor was closed or that a rollback ran
/// before a fatal escalation.

use crate::core::db::{Cursor, ExecOutcome, Handle, HandleKind, Ping};
use crate::core::{Result, SqlPrintError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Builds a driver-level error carrying `msg`.
pub fn driver_error(msg: &str) -> SqlPrintError {
    SqlPrintError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
        Some(msg.to_string()),
    ))
}

/// Shared, ordered log of operations performed on a fake.
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// A handle whose every answer is scripted up front.
pub struct FakeHandle {
    pub kind: HandleKind,
    pub columns: std::result::Result<Vec<String>, String>,
    pub rows: Vec<Vec<String>>,
    pub query_error: Option<String>,
    pub row_error: Option<String>,
    pub exec_error: Option<String>,
    pub affected: std::result::Result<u64, String>,
    pub rollback_error: Option<String>,
    pub log: CallLog,
}

impl FakeHandle {
    /// A connection-kind fake with no rows and one affected row.
    pub fn connection() -> Self {
        FakeHandle {
            kind: HandleKind::Connection,
            columns: Ok(Vec::new()),
            rows: Vec::new(),
            query_error: None,
            row_error: None,
            exec_error: None,
            affected: Ok(1),
            rollback_error: None,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A transaction-kind fake with no rows and one affected row.
    pub fn transaction() -> Self {
        FakeHandle {
            kind: HandleKind::Transaction,
            ..Self::connection()
        }
    }

    pub fn with_kind(mut self, kind: HandleKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_result(mut self, columns: &[&str], rows: &[&[&str]]) -> Self {
        self.columns = Ok(columns.iter().map(|c| c.to_string()).collect());
        self.rows = rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        self
    }

    pub fn with_affected(mut self, affected: std::result::Result<u64, &str>) -> Self {
        self.affected = affected.map_err(str::to_string);
        self
    }

    pub fn with_column_error(mut self, msg: &str) -> Self {
        self.columns = Err(msg.to_string());
        self
    }

    pub fn with_query_error(mut self, msg: &str) -> Self {
        self.query_error = Some(msg.to_string());
        self
    }

    /// Makes the cursor fail once the scripted rows are exhausted.
    pub fn with_row_error(mut self, msg: &str) -> Self {
        self.row_error = Some(msg.to_string());
        self
    }

    pub fn with_exec_error(mut self, msg: &str) -> Self {
        self.exec_error = Some(msg.to_string());
        self
    }

    pub fn with_rollback_error(mut self, msg: &str) -> Self {
        self.rollback_error = Some(msg.to_string());
        self
    }

    /// Snapshot of the call log.
    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn record(&self, call: &str) {
        self.log.borrow_mut().push(call.to_string());
    }
}

struct FakeCursor {
    columns: std::result::Result<Vec<String>, String>,
    rows: std::vec::IntoIter<Vec<String>>,
    row_error: Option<String>,
    log: CallLog,
}

impl Cursor for FakeCursor {
    fn columns(&self) -> Result<Vec<String>> {
        self.columns.clone().map_err(|msg| driver_error(&msg))
    }

    fn next_row(&mut self) -> Result<Option<Vec<String>>> {
        match (self.rows.next(), &self.row_error) {
            (Some(row), _) => Ok(Some(row)),
            (None, Some(msg)) => Err(driver_error(msg)),
            (None, None) => Ok(None),
        }
    }
}

impl Drop for FakeCursor {
    fn drop(&mut self) {
        self.log.borrow_mut().push("cursor_closed".to_string());
    }
}

/// Affected-row outcome of a [`FakeHandle`] exec.
pub struct FakeOutcome(std::result::Result<u64, String>);

impl ExecOutcome for FakeOutcome {
    fn rows_affected(&self) -> Result<u64> {
        self.0.clone().map_err(|msg| driver_error(&msg))
    }
}

impl Handle for FakeHandle {
    type Outcome = FakeOutcome;

    fn kind(&self) -> HandleKind {
        self.kind
    }

    fn query(&self, sql: &str, visit: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>) -> Result<()> {
        self.record(&format!("query:{}", sql));
        if let Some(msg) = &self.query_error {
            return Err(driver_error(msg));
        }
        let mut cursor = FakeCursor {
            columns: self.columns.clone(),
            rows: self.rows.clone().into_iter(),
            row_error: self.row_error.clone(),
            log: Rc::clone(&self.log),
        };
        visit(&mut cursor)
    }

    fn exec(&self, sql: &str) -> Result<FakeOutcome> {
        self.record(&format!("exec:{}", sql));
        if let Some(msg) = &self.exec_error {
            return Err(driver_error(msg));
        }
        Ok(FakeOutcome(self.affected.clone()))
    }

    fn rollback(&self) -> Result<()> {
        self.record("rollback");
        match &self.rollback_error {
            Some(msg) => Err(driver_error(msg)),
            None => Ok(()),
        }
    }
}

/// A liveness check that fails a fixed number of times before succeeding.
pub struct FlakyPing {
    failures_left: Cell<u32>,
    attempts: Cell<u32>,
}

impl FlakyPing {
    pub fn failing(times: u32) -> Self {
        FlakyPing {
            failures_left: Cell::new(times),
            attempts: Cell::new(0),
        }
    }

    pub fn never_up() -> Self {
        Self::failing(u32::MAX)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.get()
    }
}

impl Ping for FlakyPing {
    fn ping(&self) -> Result<()> {
        self.attempts.set(self.attempts.get() + 1);
        match self.failures_left.get() {
            0 => Ok(()),
            n => {
                self.failures_left.set(n - 1);
                Err(driver_error("connection refused"))
            }
        }
    }
}
