//! Ledger table bookkeeping.
//!
//! The ledger is a table `<schema>.<table>` with one row per applied
//! migration. A row is inserted in the same transaction that runs a
//! migration's up statements and deleted in the transaction that runs its
//! down statements.

use crate::error::{RunnerError, RunnerResult};
use chrono::{DateTime, Utc};
use ratchet_core::sql_utils::{escape_sql_string, quote_qualified};
use ratchet_db::Database;

/// One applied migration recorded in the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Migration name (file stem)
    pub name: String,

    /// When the migration was applied
    pub executed_at: DateTime<Utc>,
}

/// Location of the ledger table
#[derive(Debug, Clone)]
pub(crate) struct Ledger {
    schema: String,
    table: String,
}

impl Ledger {
    pub(crate) fn new(schema: &str, table: &str) -> Self {
        Self {
            schema: schema.to_string(),
            table: table.to_string(),
        }
    }

    /// Quoted `"schema"."table"` for use in SQL
    fn relation(&self) -> String {
        quote_qualified(&self.schema, &self.table)
    }

    /// Unquoted `schema.table` for display and catalog lookups
    pub(crate) fn display_name(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }

    /// Create the ledger schema and table if missing
    pub(crate) async fn bootstrap(&self, db: &dyn Database) -> RunnerResult<()> {
        db.create_schema_if_not_exists(&self.schema)
            .await
            .map_err(|e| ledger_error("create ledger schema", e))?;

        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                name VARCHAR PRIMARY KEY,
                executed_at TIMESTAMP NOT NULL DEFAULT current_timestamp
            )",
            self.relation()
        );
        db.execute(&sql)
            .await
            .map_err(|e| ledger_error("create ledger table", e))?;
        Ok(())
    }

    /// Whether the ledger table exists
    pub(crate) async fn exists(&self, db: &dyn Database) -> RunnerResult<bool> {
        db.relation_exists(&self.display_name())
            .await
            .map_err(|e| ledger_error("inspect catalog", e))
    }

    /// All entries in application order (oldest first, ties by name)
    pub(crate) async fn entries(&self, db: &dyn Database) -> RunnerResult<Vec<LedgerEntry>> {
        let sql = format!(
            "SELECT name, epoch_us(executed_at) FROM {} ORDER BY executed_at, name",
            self.relation()
        );
        let rows = db
            .query_rows(&sql)
            .await
            .map_err(|e| ledger_error("read ledger", e))?;

        rows.into_iter().map(parse_entry).collect()
    }

    /// Record `name` as applied at the current time
    pub(crate) async fn insert(&self, db: &dyn Database, name: &str) -> RunnerResult<()> {
        let executed_at = Utc::now().format("%Y-%m-%d %H:%M:%S%.6f");
        let sql = format!(
            "INSERT INTO {} (name, executed_at) VALUES ('{}', TIMESTAMP '{}')",
            self.relation(),
            escape_sql_string(name),
            executed_at
        );
        db.execute(&sql)
            .await
            .map_err(|e| ledger_error("record migration", e))?;
        Ok(())
    }

    /// Remove the entry for `name`
    pub(crate) async fn delete(&self, db: &dyn Database, name: &str) -> RunnerResult<()> {
        let sql = format!(
            "DELETE FROM {} WHERE name = '{}'",
            self.relation(),
            escape_sql_string(name)
        );
        let deleted = db
            .execute(&sql)
            .await
            .map_err(|e| ledger_error("remove migration", e))?;
        if deleted == 0 {
            return Err(RunnerError::Ledger(format!(
                "no ledger entry for '{}' in {}",
                name,
                self.display_name()
            )));
        }
        Ok(())
    }
}

fn parse_entry(row: Vec<String>) -> RunnerResult<LedgerEntry> {
    let mut columns = row.into_iter();
    let (Some(name), Some(micros)) = (columns.next(), columns.next()) else {
        return Err(RunnerError::Ledger(
            "ledger row is missing columns".to_string(),
        ));
    };

    let executed_at = micros
        .parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_micros)
        .ok_or_else(|| {
            RunnerError::Ledger(format!(
                "invalid executed_at '{}' for migration '{}'",
                micros, name
            ))
        })?;

    Ok(LedgerEntry { name, executed_at })
}

fn ledger_error(operation: &str, err: ratchet_db::DbError) -> RunnerError {
    RunnerError::Ledger(format!("{}: {}", operation, err))
}
