/// Represents different SQL statement types for introspection
///
/// Classification looks at the SQL text alone, so a caller holding raw SQL
/// can route it to the query printer or the exec printer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatementType {
    /// SELECT statement
    Select,
    /// Common table expression (`WITH ...`)
    With,
    /// INSERT statement
    Insert,
    /// UPDATE statement
    Update,
    /// DELETE statement
    Delete,
    /// CREATE statement
    Create,
    /// DROP statement
    Drop,
    /// ALTER statement
    Alter,
    /// PRAGMA statement
    Pragma,
    /// EXPLAIN or EXPLAIN QUERY PLAN
    Explain,
    /// VALUES list
    Values,
    /// Transaction control (BEGIN, COMMIT, ROLLBACK)
    Transaction,
    /// Anything else
    Other,
}

/// Skips whitespace, `-- line` comments and `/* block */` comments.
fn skip_leading_comments(sql: &str) -> &str {
    let mut rest = sql.trim_start();
    loop {
        if let Some(after) = rest.strip_prefix("--") {
            rest = after.find('\n').map_or("", |i| &after[i + 1..]).trim_start();
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.find("*/").map_or("", |i| &after[i + 2..]).trim_start();
        } else {
            return rest;
        }
    }
}

impl StatementType {
    /// Classifies a SQL statement by its first keyword after any comments.
    ///
    /// Only the keyword is looked at: `INSERT ... RETURNING` is an `Insert`
    /// even though it produces rows.
    pub fn from_sql(sql: &str) -> Self {
        let sql_upper = skip_leading_comments(sql).to_uppercase();
        let keyword = sql_upper
            .split(|c: char| c.is_whitespace() || c == '(' || c == ';')
            .next()
            .unwrap_or("");

        match keyword {
            "SELECT" => StatementType::Select,
            "WITH" => StatementType::With,
            "INSERT" | "REPLACE" => StatementType::Insert,
            "UPDATE" => StatementType::Update,
            "DELETE" => StatementType::Delete,
            "CREATE" => StatementType::Create,
            "DROP" => StatementType::Drop,
            "ALTER" => StatementType::Alter,
            "PRAGMA" => StatementType::Pragma,
            "EXPLAIN" => StatementType::Explain,
            "VALUES" => StatementType::Values,
            "BEGIN" | "COMMIT" | "END" | "ROLLBACK" | "SAVEPOINT" | "RELEASE" => {
                StatementType::Transaction
            }
            _ => StatementType::Other,
        }
    }

    /// Whether statements of this type are printed as a result table.
    ///
    /// `PRAGMA` is treated as a query since most pragmas report a value.
    pub fn returns_rows(self) -> bool {
        matches!(
            self,
            StatementType::Select
                | StatementType::With
                | StatementType::Pragma
                | StatementType::Explain
                | StatementType::Values
        )
    }
}
