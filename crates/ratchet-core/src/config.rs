//! Configuration types and parsing for ratchet.yml

use crate::error::{CoreError, CoreResult};
use crate::sql_utils::is_plain_identifier;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "ratchet.yml";

/// Main configuration from ratchet.yml
///
/// Every field has a default, so an absent config file is equivalent to an
/// empty one. Command-line flags and environment variables are merged on top
/// with [`Config::apply_overrides`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory containing `<timestamp>_<description>.sql` migration files
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Where applied migrations are recorded
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection string (e.g. `duckdb://app.duckdb` or `:memory:`)
    #[serde(default)]
    pub url: Option<String>,
}

/// Ledger table location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Schema holding the ledger table
    #[serde(default = "default_ledger_schema")]
    pub schema: String,

    /// Ledger table name
    #[serde(default = "default_ledger_table")]
    pub table: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            schema: default_ledger_schema(),
            table: default_ledger_table(),
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Connection string override
    pub database_url: Option<String>,

    /// Migrations directory override
    pub migrations_dir: Option<String>,
}

const DEFAULT_MIGRATIONS_DIR: &str = "db/migrations";

fn default_migrations_dir() -> String {
    DEFAULT_MIGRATIONS_DIR.to_string()
}

fn default_ledger_schema() -> String {
    "ratchet".to_string()
}

fn default_ledger_table() -> String {
    "schema_migrations".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            database: DatabaseConfig::default(),
            ledger: LedgerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load `ratchet.yml` from a directory, falling back to defaults when the
    /// file does not exist
    pub fn load_or_default(dir: &Path) -> CoreResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
            Ok(Self::default())
        }
    }

    /// Merge command-line and environment overrides into this configuration
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> CoreResult<Self> {
        if let Some(url) = overrides.database_url {
            self.database.url = Some(url);
        }
        if let Some(dir) = overrides.migrations_dir {
            self.migrations_dir = dir;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }

        for (field, value) in [
            ("ledger.schema", &self.ledger.schema),
            ("ledger.table", &self.ledger.table),
        ] {
            if !is_plain_identifier(value) {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "{} must be a plain SQL identifier ([A-Za-z_][A-Za-z0-9_]*), got '{}'",
                        field, value
                    ),
                });
            }
        }

        if let Some(url) = &self.database.url {
            if url.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: "database.url cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// The configured connection string
    pub fn database_url(&self) -> CoreResult<&str> {
        self.database
            .url
            .as_deref()
            .ok_or(CoreError::MissingDatabaseUrl)
    }

    /// Migrations directory resolved against `root`
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
