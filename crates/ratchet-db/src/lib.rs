//! ratchet-db - Database abstraction layer for Ratchet
//!
//! This crate provides the `Database` trait family used by the migration
//! runner and its DuckDB implementation.

pub mod duckdb;
pub mod error;
mod row_helpers;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{Database, DatabaseCore, DatabaseSchema, DatabaseTransaction};
