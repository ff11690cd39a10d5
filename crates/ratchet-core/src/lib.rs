//! ratchet-core - Core library for Ratchet
//!
//! This crate provides shared types used across all Ratchet components:
//! configuration parsing, strongly-typed migration names, migration file
//! discovery, and SQL identifier helpers.

pub mod config;
pub mod error;
pub mod migration_file;
pub mod migration_name;
pub mod sql_utils;

pub use config::{Config, ConfigOverrides, DatabaseConfig, LedgerConfig};
pub use error::{CoreError, CoreResult};
pub use migration_file::{discover_migrations, MigrationFile};
pub use migration_name::MigrationName;
