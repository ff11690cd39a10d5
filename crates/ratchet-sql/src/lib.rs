//! ratchet-sql - SQL script layer for Ratchet
//!
//! This crate splits SQL scripts into standalone statements and parses
//! migration files into up and down statement sequences.

pub mod error;
pub mod migration_parser;
pub mod splitter;

pub use error::{QuotedRegion, SqlError, SqlResult};
pub use migration_parser::{parse_migration, Direction, ParsedMigration, DOWN_MARKER, UP_MARKER};
pub use splitter::{lines_inside_quotes, split_statements, split_statements_strict, Statement};
