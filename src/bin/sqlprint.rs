use rusqlite::Connection;
use sqlprint::config::{self, Config};
use sqlprint::core::db::StatementType;
use sqlprint::{Printer, Result, SqlPrintError, Waiter};
use tracing::info;

const USAGE: &str = "usage: sqlprint [--config <file>] <database> <sql>...

Each <sql> argument must be a single statement. Statements starting with
SELECT, WITH, PRAGMA, EXPLAIN or VALUES print a table; everything else prints
an affected-row count. INSERT/UPDATE/DELETE ... RETURNING is not supported.";

fn main() {
    // Logs go to stderr so they never interleave with printed tables.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    if let Err(e) = run(std::env::args().skip(1).collect()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(mut args: Vec<String>) -> Result<()> {
    let config = if args.first().map(String::as_str) == Some("--config") {
        if args.len() < 2 {
            return Err(SqlPrintError::Config("--config requires a path".to_string()));
        }
        let path = args.remove(1);
        args.remove(0);
        info!("Loading configuration from: {}", path);
        config::load_config(&path)?
    } else {
        match config::default_config_path() {
            Some(path) => config::load_config_or_default(path)?,
            None => Config::default(),
        }
    };

    if args.len() < 2 {
        return Err(SqlPrintError::Config(USAGE.to_string()));
    }
    let db_path = args.remove(0);

    info!("Opening database: {}", db_path);
    let conn = Connection::open(&db_path)?;
    Waiter::from_config(&config.wait, config.output.escalation).wait(&conn)?;

    let mut printer = Printer::stdout().with_escalation(config.output.escalation);
    for sql in &args {
        if StatementType::from_sql(sql).returns_rows() {
            printer.query(&conn, sql)?;
        } else {
            printer.exec(&conn, sql)?;
        }
    }
    Ok(())
}
