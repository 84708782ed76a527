/// Database Handle Module
///
/// A handle is anything the printers can run SQL against: a connection or an
/// open transaction. Both expose the same two capabilities (run a query that
/// returns rows, run a statement that reports affected rows), so the printers
/// are written once against the `Handle` trait.

use crate::core::{Result, SqlPrintError};
use rusqlite::{types::ValueRef, Batch, Connection, Rows, Statement, Transaction};

/// The dynamic kind of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    /// A plain connection
    Connection,
    /// An open transaction
    Transaction,
    /// Anything else; carries the offending type name
    Unsupported(&'static str),
}

/// Row cursor over a query result.
///
/// A cursor is only reachable inside the closure passed to [`Handle::query`],
/// and is released when that closure returns.
pub trait Cursor {
    /// Column names, in query order.
    fn columns(&self) -> Result<Vec<String>>;

    /// Reads the next row with every cell coerced to a string.
    /// Returns `Ok(None)` once the cursor is exhausted.
    fn next_row(&mut self) -> Result<Option<Vec<String>>>;
}

/// Result of a mutating statement.
pub trait ExecOutcome {
    /// Number of rows the statement changed.
    fn rows_affected(&self) -> Result<u64>;
}

impl ExecOutcome for usize {
    fn rows_affected(&self) -> Result<u64> {
        Ok(*self as u64)
    }
}

/// Something SQL can be executed against.
pub trait Handle {
    /// What `exec` hands back.
    type Outcome: ExecOutcome;

    fn kind(&self) -> HandleKind;

    /// Runs `sql` and lends the resulting cursor to `visit`.
    ///
    /// Errors from preparing or starting the query are returned before
    /// `visit` runs. The cursor is dropped on every exit path.
    fn query(&self, sql: &str, visit: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>) -> Result<()>;

    /// Runs a mutating statement.
    fn exec(&self, sql: &str) -> Result<Self::Outcome>;

    /// Best-effort rollback. Only transactions have anything to undo.
    fn rollback(&self) -> Result<()> {
        Ok(())
    }
}

/// Liveness check.
pub trait Ping {
    fn ping(&self) -> Result<()>;
}

/// Coerces a SQLite value to the string the printers display.
///
/// Values keep whatever textual form the driver gives them; NULL becomes the
/// empty string and BLOBs are decoded as (lossy) UTF-8.
pub fn coerce_value(value: ValueRef) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).to_string(),
        ValueRef::Blob(b) => String::from_utf8_lossy(b).to_string(),
    }
}

struct SqliteCursor<'s> {
    columns: Vec<String>,
    rows: Rows<'s>,
}

impl Cursor for SqliteCursor<'_> {
    fn columns(&self) -> Result<Vec<String>> {
        Ok(self.columns.clone())
    }

    fn next_row(&mut self) -> Result<Option<Vec<String>>> {
        let width = self.columns.len();
        match self.rows.next()? {
            Some(row) => {
                let mut values = Vec::with_capacity(width);
                for i in 0..width {
                    values.push(coerce_value(row.get_ref(i)?));
                }
                Ok(Some(values))
            }
            None => Ok(None),
        }
    }
}

/// Prepares `sql`, which must hold exactly one statement.
///
/// SQLite only compiles the first statement of a string, so anything after it
/// would be dropped silently. Every statement is prepared before anything
/// runs; a multi-statement string is rejected without executing any of it.
fn prepare_single<'c>(conn: &'c Connection, sql: &str) -> Result<Statement<'c>> {
    let mut batch = Batch::new(conn, sql);
    let stmt = batch
        .next()?
        .ok_or_else(|| SqlPrintError::Statement("no SQL statement to run".to_string()))?;
    if batch.next()?.is_some() {
        return Err(SqlPrintError::Statement(
            "expected a single SQL statement, found several".to_string(),
        ));
    }
    Ok(stmt)
}

fn query_on(
    conn: &Connection,
    sql: &str,
    visit: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>,
) -> Result<()> {
    let mut stmt = prepare_single(conn, sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let rows = stmt.query([])?;
    let mut cursor = SqliteCursor { columns, rows };
    visit(&mut cursor)
}

fn exec_on(conn: &Connection, sql: &str) -> Result<usize> {
    let mut stmt = prepare_single(conn, sql)?;
    Ok(stmt.execute([])?)
}

impl Handle for Connection {
    type Outcome = usize;

    fn kind(&self) -> HandleKind {
        HandleKind::Connection
    }

    fn query(&self, sql: &str, visit: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>) -> Result<()> {
        query_on(self, sql, visit)
    }

    fn exec(&self, sql: &str) -> Result<usize> {
        exec_on(self, sql)
    }
}

impl Handle for Transaction<'_> {
    type Outcome = usize;

    fn kind(&self) -> HandleKind {
        HandleKind::Transaction
    }

    fn query(&self, sql: &str, visit: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>) -> Result<()> {
        query_on(self, sql, visit)
    }

    fn exec(&self, sql: &str) -> Result<usize> {
        exec_on(self, sql)
    }

    /// Issues `ROLLBACK` on the underlying connection. Dropping the
    /// transaction afterwards is a no-op because the connection is back in
    /// autocommit mode.
    fn rollback(&self) -> Result<()> {
        let conn: &Connection = self;
        conn.execute_batch("ROLLBACK")?;
        Ok(())
    }
}

impl Ping for Connection {
    /// Reads the schema, which forces SQLite to open and validate the file.
    fn ping(&self) -> Result<()> {
        self.query_row("SELECT count(*) FROM sqlite_master", [], |_| Ok(()))?;
        Ok(())
    }
}

/// A dynamically typed handle for callers that cannot name the concrete type
/// at compile time.
///
/// Anything other than a connection or a transaction is carried as
/// [`HandleRef::Other`] and rejected by every operation.
#[derive(Debug, Clone, Copy)]
pub enum HandleRef<'a, 'c> {
    Connection(&'a Connection),
    Transaction(&'a Transaction<'c>),
    Other(&'static str),
}

impl HandleRef<'_, '_> {
    /// Wraps a value that is neither a connection nor a transaction.
    pub fn other<T: ?Sized>(_value: &T) -> Self {
        HandleRef::Other(std::any::type_name::<T>())
    }

    fn unsupported(name: &str) -> SqlPrintError {
        SqlPrintError::UnsupportedHandle(name.to_string())
    }
}

impl<'a> From<&'a Connection> for HandleRef<'a, 'static> {
    fn from(conn: &'a Connection) -> Self {
        HandleRef::Connection(conn)
    }
}

impl<'a, 'c> From<&'a Transaction<'c>> for HandleRef<'a, 'c> {
    fn from(tx: &'a Transaction<'c>) -> Self {
        HandleRef::Transaction(tx)
    }
}

impl Handle for HandleRef<'_, '_> {
    type Outcome = usize;

    fn kind(&self) -> HandleKind {
        match self {
            HandleRef::Connection(_) => HandleKind::Connection,
            HandleRef::Transaction(_) => HandleKind::Transaction,
            HandleRef::Other(name) => HandleKind::Unsupported(*name),
        }
    }

    fn query(&self, sql: &str, visit: &mut dyn FnMut(&mut dyn Cursor) -> Result<()>) -> Result<()> {
        match self {
            HandleRef::Connection(conn) => conn.query(sql, visit),
            HandleRef::Transaction(tx) => tx.query(sql, visit),
            HandleRef::Other(name) => Err(Self::unsupported(name)),
        }
    }

    fn exec(&self, sql: &str) -> Result<usize> {
        match self {
            HandleRef::Connection(conn) => conn.exec(sql),
            HandleRef::Transaction(tx) => tx.exec(sql),
            HandleRef::Other(name) => Err(Self::unsupported(name)),
        }
    }

    fn rollback(&self) -> Result<()> {
        match self {
            HandleRef::Transaction(tx) => Handle::rollback(*tx),
            _ => Ok(()),
        }
    }
}
