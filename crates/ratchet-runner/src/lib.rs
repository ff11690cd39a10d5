//! ratchet-runner - Migration execution for Ratchet
//!
//! This crate applies and reverts migration files against a database,
//! tracking applied migrations in a ledger table.

pub mod error;
mod ledger;
pub mod runner;
pub mod scaffold;

pub use error::{RunnerError, RunnerResult};
pub use ledger::LedgerEntry;
pub use runner::{
    ApplyReport, MigrationRunner, RevertReport, RunnerConfig, SkippedRevert, StatusReport,
};
