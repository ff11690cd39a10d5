//! Migration file discovery and creation.
//!
//! A migrations directory holds flat `<timestamp>_<description>.sql` files.
//! Files are immutable once written; their content is read fresh on every run.

use crate::error::{CoreError, CoreResult};
use crate::migration_name::MigrationName;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One migration file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// Name derived from the file stem
    pub name: MigrationName,

    /// Path to the `.sql` file
    pub path: PathBuf,
}

impl MigrationFile {
    /// Read the raw file content
    pub fn read(&self) -> CoreResult<String> {
        fs::read_to_string(&self.path).map_err(|e| CoreError::IoWithPath {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// Write a new migration file into `dir`, creating the directory if needed.
    ///
    /// Never overwrites: an existing file with the same name is an error.
    pub fn create(dir: &Path, name: MigrationName, content: &str) -> CoreResult<Self> {
        fs::create_dir_all(dir).map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;

        let path = dir.join(name.file_name());
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    CoreError::MigrationExists {
                        path: path.display().to_string(),
                    }
                } else {
                    CoreError::IoWithPath {
                        path: path.display().to_string(),
                        source: e,
                    }
                }
            })?;
        file.write_all(content.as_bytes())
            .map_err(|e| CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            })?;

        Ok(Self { name, path })
    }
}

/// Discover all `.sql` migration files directly inside `dir`, sorted by name.
///
/// A missing directory yields an empty list. A `.sql` file whose stem is not
/// a valid [`MigrationName`] is an error.
pub fn discover_migrations(dir: &Path) -> CoreResult<Vec<MigrationFile>> {
    if !dir.exists() {
        log::info!("Migrations directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut migrations = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() || !path.extension().is_some_and(|e| e == "sql") {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            return Err(CoreError::InvalidMigrationName {
                name: path.display().to_string(),
                reason: "file name is not valid UTF-8".to_string(),
            });
        };
        let name = MigrationName::parse(stem)?;
        migrations.push(MigrationFile { name, path });
    }

    migrations.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(migrations)
}

#[cfg(test)]
#[path = "migration_file_test.rs"]
mod tests;
