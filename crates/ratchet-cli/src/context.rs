//! Runtime context for CLI commands

use anyhow::{Context, Result};
use ratchet_core::{Config, ConfigOverrides};
use ratchet_db::{Database, DuckDbBackend};
use ratchet_runner::{MigrationRunner, RunnerConfig};
use std::path::Path;
use std::sync::Arc;

use crate::cli::{DirArgs, GlobalArgs};

/// Load configuration and merge flag / environment overrides on top.
///
/// Relative paths resolve against the current directory.
pub(crate) fn load_config(global: &GlobalArgs, dir: &DirArgs) -> Result<Config> {
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load configuration file {}", path))?,
        None => Config::load_or_default(Path::new("."))
            .context("Failed to load ratchet.yml")?,
    };

    config
        .apply_overrides(ConfigOverrides {
            database_url: global.database_url.clone(),
            migrations_dir: dir.dir.clone(),
        })
        .context("Invalid configuration")
}

/// Runner configuration for `config`
pub(crate) fn runner_config(config: &Config) -> RunnerConfig {
    RunnerConfig::from_config(config, Path::new("."))
}

/// Runtime context containing the configuration and a connected runner
pub(crate) struct RuntimeContext {
    /// Effective configuration
    pub config: Config,

    /// Runner bound to the configured database
    pub runner: MigrationRunner,
}

impl RuntimeContext {
    /// Load configuration and connect to the database
    pub(crate) fn new(global: &GlobalArgs, dir: &DirArgs) -> Result<Self> {
        let config = load_config(global, dir)?;
        let url = config.database_url()?;

        let db: Arc<dyn Database> =
            Arc::new(DuckDbBackend::from_url(url).context("Failed to connect to database")?);

        let runner = MigrationRunner::new(db, runner_config(&config))?;
        log::debug!(
            "Using migrations in {}",
            runner.config().migrations_dir.display()
        );

        Ok(Self { config, runner })
    }
}
