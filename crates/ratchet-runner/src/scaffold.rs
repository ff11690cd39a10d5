//! New migration file scaffolding.

use crate::error::RunnerResult;
use chrono::{DateTime, Utc};
use ratchet_core::{CoreError, CoreResult, MigrationFile, MigrationName};
use ratchet_sql::{DOWN_MARKER, UP_MARKER};
use std::path::Path;

/// Timestamp prefix format for new migration names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Normalise a user-supplied description into the `<description>` part of a
/// migration name.
///
/// Lowercases, turns spaces and dashes into underscores, and requires the
/// result to be non-empty `[a-z0-9_]+`.
///
/// # Examples
/// ```
/// use ratchet_runner::scaffold::normalize_description;
/// assert_eq!(normalize_description("Add Users-Table").unwrap(), "add_users_table");
/// assert!(normalize_description("drop;table").is_err());
/// ```
pub fn normalize_description(name: &str) -> CoreResult<String> {
    let normalized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();

    if normalized.is_empty() {
        return Err(CoreError::InvalidMigrationName {
            name: name.to_string(),
            reason: "name cannot be empty".to_string(),
        });
    }
    if let Some(bad) = normalized
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
    {
        return Err(CoreError::InvalidMigrationName {
            name: name.to_string(),
            reason: format!("character '{}' is not allowed, use [a-z0-9_]", bad),
        });
    }
    Ok(normalized)
}

/// Template written into a new migration file
pub fn migration_template(name: &MigrationName, created_at: DateTime<Utc>) -> String {
    format!(
        "-- Migration: {}\n\
         -- Created: {}\n\
         \n\
         {}\n\
         \n\
         \n\
         {}\n\
         \n",
        name,
        created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        UP_MARKER,
        DOWN_MARKER
    )
}

/// Write `<timestamp>_<name>.sql` into `dir` from the template.
///
/// Refuses to overwrite an existing file.
pub fn create_migration(
    dir: &Path,
    name: &str,
    created_at: DateTime<Utc>,
) -> RunnerResult<MigrationFile> {
    let description = normalize_description(name)?;
    let migration_name = MigrationName::parse(format!(
        "{}_{}",
        created_at.format(TIMESTAMP_FORMAT),
        description
    ))?;
    let content = migration_template(&migration_name, created_at);
    let file = MigrationFile::create(dir, migration_name, &content)?;
    log::info!("Created migration {}", file.path.display());
    Ok(file)
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;
