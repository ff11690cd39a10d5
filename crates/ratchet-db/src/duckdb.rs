//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::row_helpers::collect_rows;
use crate::traits::{DatabaseCore, DatabaseSchema, DatabaseTransaction};
use async_trait::async_trait;
use duckdb::Connection;
use ratchet_core::sql_utils::{escape_sql_string, quote_ident};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// URL scheme accepted by [`DuckDbBackend::from_url`]
const URL_SCHEME: &str = "duckdb://";

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                return Err(DbError::ConnectionError(format!(
                    "directory '{}' does not exist",
                    parent.display()
                )));
            }
        }
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Open a connection from a database URL.
    ///
    /// Accepts `duckdb://<path>`, `duckdb::memory:`, `:memory:` or a bare
    /// file path. Any other `scheme://` is rejected.
    pub fn from_url(url: &str) -> DbResult<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DbError::UnsupportedUrl {
                url: url.to_string(),
                reason: "empty connection string".to_string(),
            });
        }
        if url == "duckdb::memory:" {
            return Self::in_memory();
        }
        if let Some(path) = url.strip_prefix(URL_SCHEME) {
            if path.is_empty() {
                return Err(DbError::UnsupportedUrl {
                    url: url.to_string(),
                    reason: "missing database path".to_string(),
                });
            }
            log::debug!("Opening DuckDB database at {}", path);
            return Self::new(path);
        }
        if let Some((scheme, _)) = url.split_once("://") {
            return Err(DbError::UnsupportedUrl {
                url: url.to_string(),
                reason: format!("scheme '{}' is not supported, use duckdb://", scheme),
            });
        }
        log::debug!("Opening DuckDB database at {}", url);
        Self::new(url)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute SQL synchronously
    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        conn.execute(sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Query rows synchronously
    fn query_rows_sync(&self, sql: &str) -> DbResult<Vec<Vec<String>>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        collect_rows(&mut stmt)
    }

    /// Check if relation exists synchronously
    fn relation_exists_sync(&self, name: &str) -> DbResult<bool> {
        let conn = self.lock()?;

        let (schema, table) = match name.rsplit_once('.') {
            Some((schema, table)) => (schema, table),
            None => ("main", name),
        };

        let sql = format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = '{}' AND table_name = '{}'",
            escape_sql_string(schema),
            escape_sql_string(table)
        );

        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;

        Ok(count > 0)
    }

    fn transaction_sync(&self, operation: &'static str, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::TransactionError {
                operation,
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl DatabaseCore for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Vec<String>>> {
        self.query_rows_sync(sql)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[async_trait]
impl DatabaseSchema for DuckDbBackend {
    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.relation_exists_sync(name)
    }

    async fn create_schema_if_not_exists(&self, schema: &str) -> DbResult<()> {
        let sql = format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema));
        self.execute_sync(&sql)?;
        Ok(())
    }
}

#[async_trait]
impl DatabaseTransaction for DuckDbBackend {
    async fn begin(&self) -> DbResult<()> {
        self.transaction_sync("begin", "BEGIN TRANSACTION")
    }

    async fn commit(&self) -> DbResult<()> {
        self.transaction_sync("commit", "COMMIT")
    }

    async fn rollback(&self) -> DbResult<()> {
        self.transaction_sync("rollback", "ROLLBACK")
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
