//! Database trait definitions
//!
//! The migration runner needs a small set of capabilities: execute a
//! statement, run a query, check for a relation, create a schema, and
//! begin / commit / roll back a transaction on one connection. They are split
//! into focused traits and combined by [`Database`].

use crate::error::DbResult;
use async_trait::async_trait;

/// Statement execution and querying
#[async_trait]
pub trait DatabaseCore: Send + Sync {
    /// Execute one SQL statement, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple semicolon-separated SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute query returning every row, each column rendered as a string
    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Vec<String>>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// Schema inspection and creation
#[async_trait]
pub trait DatabaseSchema: Send + Sync {
    /// Check if a table or view exists; `name` may be `schema.table`
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Create a schema if it does not exist
    async fn create_schema_if_not_exists(&self, schema: &str) -> DbResult<()>;
}

/// Explicit transaction control on the backend's single connection
#[async_trait]
pub trait DatabaseTransaction: Send + Sync {
    /// Start a transaction
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()>;
}

/// Full database capability set used by the migration runner
pub trait Database: DatabaseCore + DatabaseSchema + DatabaseTransaction {}

impl<T: DatabaseCore + DatabaseSchema + DatabaseTransaction> Database for T {}
