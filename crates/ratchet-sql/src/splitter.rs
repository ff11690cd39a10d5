//! SQL script tokenizer
//!
//! Splits a multi-statement script into standalone statements on `;`,
//! without looking inside string literals, quoted identifiers, dollar-quoted
//! blocks, or comments. This is a single left-to-right scan with one active
//! [`ScanState`]; it does not parse SQL.
//!
//! Comments are kept in place inside the statement they precede or follow.
//! Dollar tags match by exact text, so `$a$ ... $b$ ... $a$` is one block.

use crate::error::{QuotedRegion, SqlError, SqlResult};

/// Scanner state at a given point in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Outside any quoted or commented region
    Normal,
    /// Inside `'...'`
    InString,
    /// Inside `"..."`
    InQuotedIdentifier,
    /// Inside a dollar-quoted block opened by this exact tag (e.g. `$body$`)
    InDollarBlock(String),
    /// Inside `-- ...` up to the end of the line
    InLineComment,
    /// Inside `/* ... */`
    InBlockComment,
}

impl ScanState {
    /// The region that would be left unterminated if input ended here.
    ///
    /// A line comment is closed by end of input, so it is never reported.
    fn unterminated_region(&self) -> Option<QuotedRegion> {
        match self {
            ScanState::Normal | ScanState::InLineComment => None,
            ScanState::InString => Some(QuotedRegion::String),
            ScanState::InQuotedIdentifier => Some(QuotedRegion::QuotedIdentifier),
            ScanState::InDollarBlock(tag) => Some(QuotedRegion::DollarBlock(tag.clone())),
            ScanState::InBlockComment => Some(QuotedRegion::BlockComment),
        }
    }
}

/// One statement produced by the splitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Statement text, trimmed, without the terminating `;`
    pub sql: String,

    /// 1-based line of the first non-whitespace character
    pub line: usize,

    has_code: bool,
}

impl Statement {
    /// Returns `true` if the statement holds nothing but comments.
    pub fn is_comment_only(&self) -> bool {
        !self.has_code
    }
}

/// Split `sql` into trimmed, non-empty statements.
///
/// Total over any input: an unterminated string, identifier, dollar block or
/// block comment simply runs to end of input and closes the last statement.
/// Use [`split_statements_strict`] to reject such input instead.
///
/// # Examples
/// ```
/// use ratchet_sql::split_statements;
/// assert_eq!(split_statements("SELECT 1; SELECT 2;"), vec!["SELECT 1", "SELECT 2"]);
/// assert_eq!(split_statements("SELECT ';';"), vec!["SELECT ';'"]);
/// ```
pub fn split_statements(sql: &str) -> Vec<String> {
    Splitter::new(sql)
        .run()
        .statements
        .into_iter()
        .map(|s| s.sql)
        .collect()
}

/// Split `sql` like [`split_statements`], failing if the input ends inside a
/// quoted region or block comment.
pub fn split_statements_strict(sql: &str) -> SqlResult<Vec<Statement>> {
    let scan = Splitter::new(sql).run();
    match scan.state.unterminated_region() {
        Some(region) => Err(SqlError::Unterminated {
            region,
            line: scan.region_line,
        }),
        None => Ok(scan.statements),
    }
}

/// For each line of `sql` (as produced by [`str::lines`]), whether the line
/// begins inside a string, quoted identifier, dollar block, or block comment.
pub fn lines_inside_quotes(sql: &str) -> Vec<bool> {
    Splitter::new(sql).run().line_starts
}

struct Splitter<'a> {
    sql: &'a str,
    pos: usize,
    line: usize,
    state: ScanState,
    /// Line where the current quoted region or comment opened
    region_line: usize,
    buffer: String,
    buffer_line: Option<usize>,
    has_code: bool,
    statements: Vec<Statement>,
    line_starts: Vec<bool>,
}

impl<'a> Splitter<'a> {
    fn new(sql: &'a str) -> Self {
        Self {
            sql,
            pos: 0,
            line: 1,
            state: ScanState::Normal,
            region_line: 1,
            buffer: String::new(),
            buffer_line: None,
            has_code: false,
            statements: Vec::new(),
            line_starts: vec![false],
        }
    }

    fn run(mut self) -> Self {
        while self.pos < self.sql.len() {
            if self.state == ScanState::Normal {
                self.step_normal();
            } else {
                self.step_region();
            }
        }
        self.finish_statement();
        self
    }

    fn step_normal(&mut self) {
        let sql = self.sql;
        let rest = &sql[self.pos..];

        if rest.starts_with(';') {
            self.pos += 1;
            self.finish_statement();
        } else if rest.starts_with("--") {
            self.enter(ScanState::InLineComment, 2);
        } else if rest.starts_with("/*") {
            self.enter(ScanState::InBlockComment, 2);
        } else if rest.starts_with('\'') {
            self.has_code = true;
            self.enter(ScanState::InString, 1);
        } else if rest.starts_with('"') {
            self.has_code = true;
            self.enter(ScanState::InQuotedIdentifier, 1);
        } else if let Some(tag) = dollar_tag(rest) {
            self.has_code = true;
            let len = tag.len();
            self.enter(ScanState::InDollarBlock(tag.to_string()), len);
        } else {
            let c = next_char(rest);
            if !c.is_whitespace() {
                self.has_code = true;
            }
            self.consume(c.len_utf8());
        }
    }

    fn step_region(&mut self) {
        let sql = self.sql;
        let rest = &sql[self.pos..];

        // Length of the closing delimiter at this position, if any
        let closing = match &self.state {
            ScanState::Normal => None,
            ScanState::InString => close_quoted(rest, '\''),
            ScanState::InQuotedIdentifier => close_quoted(rest, '"'),
            ScanState::InDollarBlock(tag) => rest.starts_with(tag.as_str()).then_some(tag.len()),
            ScanState::InLineComment => rest.starts_with('\n').then_some(1),
            ScanState::InBlockComment => rest.starts_with("*/").then_some(2),
        };

        match closing {
            Some(len) => {
                self.state = ScanState::Normal;
                self.consume(len);
            }
            None => {
                // A doubled quote is an escape and stays inside the region
                let escaped = match self.state {
                    ScanState::InString => rest.starts_with("''"),
                    ScanState::InQuotedIdentifier => rest.starts_with("\"\""),
                    _ => false,
                };
                let len = if escaped { 2 } else { next_char(rest).len_utf8() };
                self.consume(len);
            }
        }
    }

    fn enter(&mut self, state: ScanState, delimiter_len: usize) {
        self.state = state;
        self.region_line = self.line;
        self.consume(delimiter_len);
    }

    /// Append the next `len` bytes to the statement buffer
    fn consume(&mut self, len: usize) {
        let end = self.pos + len;
        for c in self.sql[self.pos..end].chars() {
            if self.buffer_line.is_none() && !c.is_whitespace() {
                self.buffer_line = Some(self.line);
            }
            self.buffer.push(c);
            if c == '\n' {
                self.line += 1;
                self.line_starts.push(self.state != ScanState::Normal);
            }
        }
        self.pos = end;
    }

    fn finish_statement(&mut self) {
        let trimmed = self.buffer.trim();
        if !trimmed.is_empty() {
            self.statements.push(Statement {
                sql: trimmed.to_string(),
                line: self.buffer_line.unwrap_or(self.line),
                has_code: self.has_code,
            });
        }
        self.buffer.clear();
        self.buffer_line = None;
        self.has_code = false;
    }
}

fn next_char(rest: &str) -> char {
    rest.chars().next().unwrap_or('\0')
}

/// Closing quote of a quoted region: a lone `quote`, not a doubled one
fn close_quoted(rest: &str, quote: char) -> Option<usize> {
    let mut chars = rest.chars();
    if chars.next() != Some(quote) {
        return None;
    }
    (chars.next() != Some(quote)).then_some(1)
}

/// Match a dollar-quote tag (`$$` or `$ident$`) at the start of `rest`.
///
/// The identifier must start with a letter or `_`, so positional parameters
/// such as `$1` are left alone.
fn dollar_tag(rest: &str) -> Option<&str> {
    let body = rest.strip_prefix('$')?;
    for (i, c) in body.char_indices() {
        if c == '$' {
            return Some(&rest[..i + 2]);
        }
        let valid = if i == 0 {
            c.is_alphabetic() || c == '_'
        } else {
            c.is_alphanumeric() || c == '_'
        };
        if !valid {
            return None;
        }
    }
    None
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
