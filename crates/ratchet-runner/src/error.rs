//! Error types for ratchet-runner

use ratchet_core::CoreError;
use ratchet_db::DbError;
use ratchet_sql::SqlError;
use thiserror::Error;

/// Migration runner errors
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Configuration, naming or file error (R001)
    #[error("[R001] {0}")]
    Core(#[from] CoreError),

    /// Migration file could not be split into statements (R002)
    #[error("[R002] Failed to parse migration '{migration}': {source}")]
    Parse {
        migration: String,
        #[source]
        source: SqlError,
    },

    /// A migration statement failed; its transaction was rolled back (R003)
    #[error("[R003] Migration '{migration}' failed at line {line}: {source}\n  statement: {statement}")]
    Execution {
        migration: String,
        statement: String,
        line: usize,
        #[source]
        source: DbError,
    },

    /// Reading or writing the ledger table failed (R004)
    #[error("[R004] Ledger operation failed: {0}")]
    Ledger(String),

    /// Connection or transaction error outside a migration statement (R005)
    #[error("[R005] {0}")]
    Db(#[from] DbError),
}

/// Result type alias for RunnerError
pub type RunnerResult<T> = Result<T, RunnerError>;
