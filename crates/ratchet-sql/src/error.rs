//! Error types for ratchet-sql

use std::fmt;
use thiserror::Error;

/// A quoted or commented region that must be closed before end of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotedRegion {
    /// `'...'` string literal
    String,
    /// `"..."` quoted identifier
    QuotedIdentifier,
    /// `$tag$...$tag$` block; holds the full delimiter, e.g. `$$` or `$body$`
    DollarBlock(String),
    /// `/* ... */` comment
    BlockComment,
}

impl fmt::Display for QuotedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotedRegion::String => f.write_str("string literal"),
            QuotedRegion::QuotedIdentifier => f.write_str("quoted identifier"),
            QuotedRegion::DollarBlock(tag) => write!(f, "dollar-quoted block {}", tag),
            QuotedRegion::BlockComment => f.write_str("block comment"),
        }
    }
}

/// SQL script errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlError {
    /// Input ended inside a quoted region (S001)
    #[error("[S001] Unterminated {region} starting at line {line}")]
    Unterminated { region: QuotedRegion, line: usize },
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
