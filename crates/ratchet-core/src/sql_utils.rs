//! SQL identifier quoting utilities
//!
//! The ledger schema and table names come from user configuration and end up
//! interpolated into DDL, so they are validated as plain identifiers and then
//! quoted before use.

/// Quote a SQL identifier.
///
/// Wraps the identifier in double quotes and escapes any embedded double quotes
/// by doubling them, following the SQL standard.
///
/// # Examples
/// ```
/// use ratchet_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("schema_migrations"), r#""schema_migrations""#);
/// assert_eq!(quote_ident(r#"my"table"#), r#""my""table""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a `schema.table` pair as a qualified relation name.
///
/// # Examples
/// ```
/// use ratchet_core::sql_utils::quote_qualified;
/// assert_eq!(
///     quote_qualified("ratchet", "schema_migrations"),
///     r#""ratchet"."schema_migrations""#
/// );
/// ```
pub fn quote_qualified(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

/// Escape a SQL string literal value by doubling single quotes.
///
/// This is for use inside single-quoted SQL string literals, not identifiers.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Returns `true` if `ident` is a plain unquoted identifier: an ASCII letter
/// or underscore followed by ASCII letters, digits, or underscores.
///
/// # Examples
/// ```
/// use ratchet_core::sql_utils::is_plain_identifier;
/// assert!(is_plain_identifier("schema_migrations"));
/// assert!(!is_plain_identifier("1st"));
/// assert!(!is_plain_identifier("drop table; --"));
/// ```
pub fn is_plain_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;
