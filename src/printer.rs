/// Printers Module
///
/// Runs one SQL statement against a handle and reports the result.
/// [`Printer::query`] renders the rows of a query as a bordered table,
/// [`Printer::exec`] reports how many rows a mutating statement changed.
/// Both echo the SQL first. Output goes to an injected sink so callers (and
/// tests) can capture it; [`print_query`] and [`print_exec`] write to stdout.

use crate::core::db::{Cursor, ExecOutcome, Handle, HandleKind};
use crate::core::{Escalation, Result, SqlPrintError};
use crate::results_grid::ResultsGrid;
use std::io::{Stdout, Write};
use tracing::{debug, warn};

/// Writes query tables and statement outcomes to a sink.
#[derive(Debug)]
pub struct Printer<W: Write> {
    out: W,
    escalation: Escalation,
}

impl Printer<Stdout> {
    /// A printer writing to the process's standard output.
    pub fn stdout() -> Self {
        Printer::new(std::io::stdout())
    }
}

impl<W: Write> Printer<W> {
    /// A printer writing to `out` with the default [`Escalation::Abort`] policy.
    pub fn new(out: W) -> Self {
        Printer {
            out,
            escalation: Escalation::default(),
        }
    }

    pub fn with_escalation(mut self, escalation: Escalation) -> Self {
        self.escalation = escalation;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Runs `sql` and renders its rows as a table.
    ///
    /// # Errors
    ///
    /// - `SqlPrintError::UnsupportedHandle` if `handle` is neither a
    ///   connection nor a transaction; nothing is executed or written.
    /// - `SqlPrintError::Database` or `SqlPrintError::Statement` if the query
    ///   fails to run or a row cannot be read; the echo line has been written
    ///   but no table is.
    /// - `SqlPrintError::ColumnMetadata` if the column names cannot be read,
    ///   only under [`Escalation::ReturnError`]; the other policies never
    ///   return.
    pub fn query<H: Handle + ?Sized>(&mut self, handle: &H, sql: &str) -> Result<()> {
        ensure_supported(handle)?;
        writeln!(self.out, "Executing SQL: {}", sql)?;
        debug!(kind = ?handle.kind(), "running query: {}", sql);

        let escalation = self.escalation;
        let mut grid = ResultsGrid::new();
        handle.query(sql, &mut |cursor| {
            let columns = cursor
                .columns()
                .map_err(|e| escalation.escalate(SqlPrintError::ColumnMetadata(e.to_string())))?;
            grid.set_headers(columns);
            while let Some(row) = cursor.next_row()? {
                grid.add_row(row);
            }
            Ok(())
        })?;

        debug!(rows = grid.rows.len(), "query finished");
        grid.write_to(&mut self.out)?;
        self.out.flush()?;
        Ok(())
    }

    /// Runs a mutating statement and reports the affected-row count.
    ///
    /// Zero affected rows is a success and prints `No rows changed`.
    ///
    /// If the driver cannot report the count, a transaction handle is rolled
    /// back (best effort, outcome ignored) before the failure is escalated.
    pub fn exec<H: Handle + ?Sized>(&mut self, handle: &H, sql: &str) -> Result<()> {
        ensure_supported(handle)?;
        write!(self.out, "Executing SQL: {}", sql)?;
        self.out.flush()?;
        debug!(kind = ?handle.kind(), "running statement: {}", sql);

        let outcome = handle.exec(sql)?;
        let affected = match outcome.rows_affected() {
            Ok(n) => n,
            Err(err) => {
                if handle.kind() == HandleKind::Transaction {
                    if let Err(rollback_err) = handle.rollback() {
                        warn!("rollback failed: {}", rollback_err);
                    }
                }
                return Err(self
                    .escalation
                    .escalate(SqlPrintError::RowsAffected(err.to_string())));
            }
        };

        if affected > 0 {
            writeln!(self.out, " OK, {} row(s) affected", affected)?;
        } else {
            writeln!(self.out, " No rows changed")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

fn ensure_supported<H: Handle + ?Sized>(handle: &H) -> Result<()> {
    match handle.kind() {
        HandleKind::Unsupported(name) => Err(SqlPrintError::UnsupportedHandle(name.to_string())),
        HandleKind::Connection | HandleKind::Transaction => Ok(()),
    }
}

/// Runs a query and prints its result table to stdout.
pub fn print_query<H: Handle + ?Sized>(handle: &H, sql: &str) -> Result<()> {
    Printer::stdout().query(handle, sql)
}

/// Runs a statement and prints its affected-row count to stdout.
pub fn print_exec<H: Handle + ?Sized>(handle: &H, sql: &str) -> Result<()> {
    Printer::stdout().exec(handle, sql)
}
