//! Strongly-typed migration name wrapper.

use crate::error::{CoreError, CoreResult};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Name of a migration: the file stem of `<timestamp>_<description>.sql`.
///
/// The timestamp prefix is one or more ASCII digits. Names compare by plain
/// byte order, which is the order migrations are applied in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MigrationName(String);

impl MigrationName {
    /// Validate and wrap a migration name (a file stem, without `.sql`).
    pub fn parse(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        let invalid = |reason: &str| CoreError::InvalidMigrationName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        let digits = name.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(invalid("must start with a numeric timestamp"));
        }
        let rest = &name[digits..];
        let Some(description) = rest.strip_prefix('_') else {
            return Err(invalid("timestamp must be followed by '_'"));
        };
        if description.is_empty() {
            return Err(invalid("description after the timestamp is empty"));
        }
        if description
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == '\\')
        {
            return Err(invalid(
                "description must not contain whitespace or path separators",
            ));
        }
        Ok(Self(name))
    }

    /// The numeric timestamp prefix.
    pub fn version(&self) -> &str {
        let digits = self.0.bytes().take_while(u8::is_ascii_digit).count();
        &self.0[..digits]
    }

    /// The descriptive suffix after the timestamp.
    pub fn description(&self) -> &str {
        &self.0[self.version().len() + 1..]
    }

    /// File name on disk for this migration.
    pub fn file_name(&self) -> String {
        format!("{}.sql", self.0)
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MigrationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MigrationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for MigrationName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MigrationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for MigrationName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "migration_name_test.rs"]
mod tests;
