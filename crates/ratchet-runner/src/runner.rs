//! Migration execution
//!
//! [`MigrationRunner`] applies pending migration files in name order and
//! reverts applied ones newest first. Each migration runs in its own
//! transaction together with its ledger insert or delete, so a migration is
//! either fully applied and recorded or not at all.

use crate::error::{RunnerError, RunnerResult};
use crate::ledger::{Ledger, LedgerEntry};
use ratchet_core::sql_utils::is_plain_identifier;
use ratchet_core::{discover_migrations, Config, CoreError, MigrationFile, MigrationName};
use ratchet_db::Database;
use ratchet_sql::{parse_migration, Direction, ParsedMigration, Statement};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Explicit runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Directory holding migration files
    pub migrations_dir: PathBuf,

    /// Schema of the ledger table
    pub ledger_schema: String,

    /// Name of the ledger table
    pub ledger_table: String,
}

impl RunnerConfig {
    /// Configuration with the default ledger location
    pub fn new(migrations_dir: impl Into<PathBuf>) -> Self {
        let ledger = ratchet_core::LedgerConfig::default();
        Self {
            migrations_dir: migrations_dir.into(),
            ledger_schema: ledger.schema,
            ledger_table: ledger.table,
        }
    }

    /// Build from a loaded [`Config`], resolving the migrations directory
    /// against `root`
    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self {
            migrations_dir: config.migrations_dir_absolute(root),
            ledger_schema: config.ledger.schema.clone(),
            ledger_table: config.ledger.table.clone(),
        }
    }

    /// Override the migrations directory
    pub fn with_migrations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.migrations_dir = dir.into();
        self
    }

    fn validate(&self) -> RunnerResult<()> {
        for (field, value) in [
            ("ledger schema", &self.ledger_schema),
            ("ledger table", &self.ledger_table),
        ] {
            if !is_plain_identifier(value) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("{} '{}' is not a plain SQL identifier", field, value),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Outcome of [`MigrationRunner::apply_all`]
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    /// Migrations applied by this run, in order
    pub applied: Vec<MigrationName>,

    /// Migrations skipped because the ledger already lists them
    pub already_applied: Vec<MigrationName>,

    /// Migrations with no up statements; not recorded
    pub empty: Vec<MigrationName>,

    /// Total execution time
    pub duration: Duration,
}

/// Why a ledger entry was not reverted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkippedRevert {
    /// The migration's down section has no statements
    NoDownStatements(String),

    /// No migration file exists for the ledger entry
    MissingFile(String),
}

impl SkippedRevert {
    /// Name of the skipped migration
    pub fn name(&self) -> &str {
        match self {
            SkippedRevert::NoDownStatements(name) | SkippedRevert::MissingFile(name) => name,
        }
    }
}

impl std::fmt::Display for SkippedRevert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkippedRevert::NoDownStatements(name) => write!(f, "{}: no down migrations", name),
            SkippedRevert::MissingFile(name) => write!(f, "{}: migration file not found", name),
        }
    }
}

/// Outcome of [`MigrationRunner::revert_last`] and [`MigrationRunner::revert_all`]
#[derive(Debug, Clone, Default)]
pub struct RevertReport {
    /// Migrations reverted by this run, newest first
    pub reverted: Vec<String>,

    /// Ledger entries left in place
    pub skipped: Vec<SkippedRevert>,

    /// Total execution time
    pub duration: Duration,
}

impl RevertReport {
    /// True when the ledger had nothing to revert
    pub fn is_noop(&self) -> bool {
        self.reverted.is_empty() && self.skipped.is_empty()
    }
}

/// Outcome of [`MigrationRunner::status`]
#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    /// Whether the ledger table exists
    pub ledger_exists: bool,

    /// Ledger entries in application order
    pub applied: Vec<LedgerEntry>,

    /// Migration files not listed in the ledger, in name order
    pub pending: Vec<MigrationName>,
}

enum RevertOutcome {
    Reverted,
    Skipped(SkippedRevert),
}

/// Applies and reverts migration files against one database
pub struct MigrationRunner {
    db: Arc<dyn Database>,
    config: RunnerConfig,
    ledger: Ledger,
}

impl MigrationRunner {
    /// Create a runner; fails if the ledger location is not a plain identifier
    pub fn new(db: Arc<dyn Database>, config: RunnerConfig) -> RunnerResult<Self> {
        config.validate()?;
        let ledger = Ledger::new(&config.ledger_schema, &config.ledger_table);
        Ok(Self { db, config, ledger })
    }

    /// Runner configuration
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Create the ledger schema and table if missing
    pub async fn bootstrap(&self) -> RunnerResult<()> {
        log::debug!(
            "Ensuring ledger {} exists ({})",
            self.ledger.display_name(),
            self.db.db_type()
        );
        self.ledger.bootstrap(self.db.as_ref()).await
    }

    /// Apply every migration file not yet in the ledger, in name order.
    ///
    /// Stops at the first failing migration; its transaction is rolled back
    /// and later files are not attempted.
    pub async fn apply_all(&self) -> RunnerResult<ApplyReport> {
        let start = Instant::now();
        self.bootstrap().await?;

        let applied: HashSet<String> = self
            .ledger
            .entries(self.db.as_ref())
            .await?
            .into_iter()
            .map(|entry| entry.name)
            .collect();

        let files = discover_migrations(&self.config.migrations_dir)?;
        if files.is_empty() {
            log::info!(
                "No migration files in {}",
                self.config.migrations_dir.display()
            );
        }

        let mut report = ApplyReport::default();
        for file in files {
            if applied.contains(file.name.as_str()) {
                log::debug!("Skipping {} (already applied)", file.name);
                report.already_applied.push(file.name);
                continue;
            }

            let parsed = parse_file(&file)?;
            if parsed.up.is_empty() {
                log::warn!("Migration {} has no up statements, skipping", file.name);
                report.empty.push(file.name);
                continue;
            }

            log::info!("Applying {}", file.name);
            self.run_in_transaction(file.name.as_str(), &parsed, Direction::Up)
                .await?;
            report.applied.push(file.name);
        }

        report.duration = start.elapsed();
        Ok(report)
    }

    /// Revert the most recently applied migration
    pub async fn revert_last(&self) -> RunnerResult<RevertReport> {
        let start = Instant::now();
        self.bootstrap().await?;

        let mut report = RevertReport::default();
        let entries = self.ledger.entries(self.db.as_ref()).await?;
        match entries.last() {
            Some(entry) => self.revert_into(entry, &mut report).await?,
            None => log::info!("No applied migrations to revert"),
        }

        report.duration = start.elapsed();
        Ok(report)
    }

    /// Revert every applied migration, newest first.
    ///
    /// Entries without down statements or without a file are skipped and
    /// reported; the first failing revert stops the run.
    pub async fn revert_all(&self) -> RunnerResult<RevertReport> {
        let start = Instant::now();
        self.bootstrap().await?;

        let mut report = RevertReport::default();
        let entries = self.ledger.entries(self.db.as_ref()).await?;
        if entries.is_empty() {
            log::info!("No applied migrations to revert");
        }
        for entry in entries.iter().rev() {
            self.revert_into(entry, &mut report).await?;
        }

        report.duration = start.elapsed();
        Ok(report)
    }

    /// Report ledger contents and pending files without changing anything
    pub async fn status(&self) -> RunnerResult<StatusReport> {
        let ledger_exists = self.ledger.exists(self.db.as_ref()).await?;
        let applied = if ledger_exists {
            self.ledger.entries(self.db.as_ref()).await?
        } else {
            Vec::new()
        };

        let applied_names: HashSet<&str> = applied.iter().map(|e| e.name.as_str()).collect();
        let pending = discover_migrations(&self.config.migrations_dir)?
            .into_iter()
            .filter(|file| !applied_names.contains(file.name.as_str()))
            .map(|file| file.name)
            .collect();

        Ok(StatusReport {
            ledger_exists,
            applied,
            pending,
        })
    }

    async fn revert_into(
        &self,
        entry: &LedgerEntry,
        report: &mut RevertReport,
    ) -> RunnerResult<()> {
        match self.revert_entry(entry).await? {
            RevertOutcome::Reverted => report.reverted.push(entry.name.clone()),
            RevertOutcome::Skipped(skipped) => report.skipped.push(skipped),
        }
        Ok(())
    }

    async fn revert_entry(&self, entry: &LedgerEntry) -> RunnerResult<RevertOutcome> {
        let file = discover_migrations(&self.config.migrations_dir)?
            .into_iter()
            .find(|file| file.name.as_str() == entry.name);
        let Some(file) = file else {
            log::warn!(
                "Migration {} is in the ledger but has no file in {}, skipping",
                entry.name,
                self.config.migrations_dir.display()
            );
            return Ok(RevertOutcome::Skipped(SkippedRevert::MissingFile(
                entry.name.clone(),
            )));
        };

        let parsed = parse_file(&file)?;
        if parsed.down.is_empty() {
            log::warn!("Migration {} has no down migrations, skipping", entry.name);
            return Ok(RevertOutcome::Skipped(SkippedRevert::NoDownStatements(
                entry.name.clone(),
            )));
        }

        log::info!("Reverting {}", entry.name);
        self.run_in_transaction(&entry.name, &parsed, Direction::Down)
            .await?;
        Ok(RevertOutcome::Reverted)
    }

    /// Run one direction of a migration plus its ledger change in a single
    /// transaction; any failure rolls the whole transaction back.
    async fn run_in_transaction(
        &self,
        name: &str,
        parsed: &ParsedMigration,
        direction: Direction,
    ) -> RunnerResult<()> {
        self.db.begin().await?;

        let result = self
            .execute_and_record(name, parsed.statements(direction), direction)
            .await;

        match &result {
            Ok(()) => {
                if let Err(commit_err) = self.db.commit().await {
                    if let Err(e) = self.db.rollback().await {
                        log::error!("Rollback after failed commit of {} failed: {}", name, e);
                    }
                    return Err(commit_err.into());
                }
            }
            Err(_) => {
                if let Err(e) = self.db.rollback().await {
                    log::error!("Rollback of {} failed: {}", name, e);
                }
            }
        }
        result
    }

    async fn execute_and_record(
        &self,
        name: &str,
        statements: &[Statement],
        direction: Direction,
    ) -> RunnerResult<()> {
        for statement in statements {
            log::debug!(
                "{} {} (line {}): {}",
                direction,
                name,
                statement.line,
                statement.sql
            );
            self.db
                .execute_batch(&statement.sql)
                .await
                .map_err(|source| RunnerError::Execution {
                    migration: name.to_string(),
                    statement: statement.sql.clone(),
                    line: statement.line,
                    source,
                })?;
        }

        match direction {
            Direction::Up => self.ledger.insert(self.db.as_ref(), name).await,
            Direction::Down => self.ledger.delete(self.db.as_ref(), name).await,
        }
    }
}

fn parse_file(file: &MigrationFile) -> RunnerResult<ParsedMigration> {
    let content = file.read()?;
    parse_migration(&content).map_err(|source| RunnerError::Parse {
        migration: file.name.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
