//! Error types for ratchet-core

use thiserror::Error;

/// Core error type for Ratchet
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: YAML parse error in the configuration file
    #[error("[C002] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: No database connection string was provided by flag, env, or config
    #[error("[C004] No database connection string configured. Pass --database-url, set DATABASE_URL, or add `database.url` to ratchet.yml")]
    MissingDatabaseUrl,

    /// C005: Migration file name does not follow `<timestamp>_<description>.sql`
    #[error("[C005] Invalid migration name '{name}': {reason}")]
    InvalidMigrationName { name: String, reason: String },

    /// C006: A migration file with this name already exists
    #[error("[C006] Migration file already exists: {path}")]
    MigrationExists { path: String },

    /// C007: IO error with file path context
    #[error("[C007] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
