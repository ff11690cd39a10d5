//! Error types for ratchet-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Connection string names a backend this build cannot open (D003)
    #[error("[D003] Unsupported database URL '{url}': {reason}")]
    UnsupportedUrl { url: String, reason: String },

    /// BEGIN / COMMIT / ROLLBACK failed (D004)
    #[error("[D004] Transaction {operation} failed: {message}")]
    TransactionError {
        operation: &'static str,
        message: String,
    },

    /// Mutex poisoned (D005)
    #[error("[D005] Database mutex poisoned: {0}")]
    MutexPoisoned(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
