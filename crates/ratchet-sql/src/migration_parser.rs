//! Up/down section parsing for migration files.
//!
//! A migration file holds an up section introduced by a `-- migrate:up` line
//! and a down section introduced by a `-- migrate:down` line. Markers are
//! found by a pass over raw lines before statement splitting. Outside quoted
//! regions, other `--` lines are dropped; lines that begin inside a string,
//! quoted identifier, dollar block or block comment are kept verbatim, so a
//! function body may contain comment or marker-looking lines.

use crate::error::{SqlError, SqlResult};
use crate::splitter::{lines_inside_quotes, split_statements_strict, Statement};

/// Marker line opening the up section
pub const UP_MARKER: &str = "-- migrate:up";

/// Marker line opening the down section
pub const DOWN_MARKER: &str = "-- migrate:down";

/// Direction of a migration section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Apply the migration
    Up,
    /// Revert the migration
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Statements of one migration file, recomputed from its text on every run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMigration {
    /// Statements applying the migration, in source order
    pub up: Vec<Statement>,

    /// Statements reverting the migration, in source order
    pub down: Vec<Statement>,
}

impl ParsedMigration {
    /// Statements for the given direction
    pub fn statements(&self, direction: Direction) -> &[Statement] {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }
}

/// Text of one section plus the file line each of its lines came from
#[derive(Debug, Default)]
struct SectionText {
    text: String,
    file_lines: Vec<usize>,
}

impl SectionText {
    fn push_line(&mut self, line: &str, file_line: usize) {
        self.text.push_str(line);
        self.text.push('\n');
        self.file_lines.push(file_line);
    }

    /// Map a 1-based line within the section to a 1-based file line
    fn file_line(&self, section_line: usize) -> usize {
        self.file_lines
            .get(section_line.saturating_sub(1))
            .copied()
            .unwrap_or(section_line)
    }

    fn into_statements(self) -> SqlResult<Vec<Statement>> {
        let statements = split_statements_strict(&self.text).map_err(|e| match e {
            SqlError::Unterminated { region, line } => SqlError::Unterminated {
                region,
                line: self.file_line(line),
            },
        })?;

        Ok(statements
            .into_iter()
            .filter(|s| !s.is_comment_only())
            .map(|mut s| {
                s.line = self.file_line(s.line);
                s
            })
            .collect())
    }
}

/// Returns the section a marker line opens, if `line` is one
fn marker(line: &str) -> Option<Direction> {
    let trimmed = line.trim();
    for (prefix, direction) in [(UP_MARKER, Direction::Up), (DOWN_MARKER, Direction::Down)] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return Some(direction);
            }
        }
    }
    None
}

/// Parse the raw text of a migration file into up and down statements.
///
/// Statement line numbers refer to lines of `content`. Statements consisting
/// only of comments are dropped. Fails if a section ends inside a quoted
/// region.
pub fn parse_migration(content: &str) -> SqlResult<ParsedMigration> {
    // Quote state starts fresh at the first marker; the preamble is not scanned
    let Some(first_marker) = content.lines().position(|line| marker(line).is_some()) else {
        if content.lines().any(|line| !is_blank_or_comment(line)) {
            warn_ignored_preamble();
        }
        return Ok(ParsedMigration::default());
    };
    let offset: usize = content
        .split_inclusive('\n')
        .take(first_marker)
        .map(str::len)
        .sum();
    let quoted = lines_inside_quotes(&content[offset..]);

    let mut up = SectionText::default();
    let mut down = SectionText::default();
    let mut current: Option<Direction> = None;

    for (idx, line) in content.lines().enumerate().skip(first_marker) {
        let inside_quotes = quoted.get(idx - first_marker).copied().unwrap_or(false);
        if !inside_quotes {
            if let Some(direction) = marker(line) {
                current = Some(direction);
                continue;
            }
            if line.trim_start().starts_with("--") {
                continue;
            }
        }

        match current {
            Some(Direction::Up) => up.push_line(line, idx + 1),
            Some(Direction::Down) => down.push_line(line, idx + 1),
            None => {}
        }
    }

    if content
        .lines()
        .take(first_marker)
        .any(|line| !is_blank_or_comment(line))
    {
        warn_ignored_preamble();
    }

    Ok(ParsedMigration {
        up: up.into_statements()?,
        down: down.into_statements()?,
    })
}

fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with("--")
}

fn warn_ignored_preamble() {
    log::warn!(
        "Ignoring SQL before the first `{}` / `{}` marker",
        UP_MARKER,
        DOWN_MARKER
    );
}

#[cfg(test)]
#[path = "migration_parser_test.rs"]
mod tests;
