use super::*;

fn sql(statements: &[Statement]) -> Vec<&str> {
    statements.iter().map(|s| s.sql.as_str()).collect()
}

#[test]
fn test_parse_up_and_down() {
    let content = "-- migrate:up\nCREATE TABLE a (id INT);\nCREATE TABLE b (id INT);\n\n-- migrate:down\nDROP TABLE b;\nDROP TABLE a;\n";
    let parsed = parse_migration(content).unwrap();
    assert_eq!(
        sql(&parsed.up),
        vec!["CREATE TABLE a (id INT)", "CREATE TABLE b (id INT)"]
    );
    assert_eq!(sql(&parsed.down), vec!["DROP TABLE b", "DROP TABLE a"]);
}

#[test]
fn test_comment_lines_dropped() {
    let content = "-- migrate:up\n-- create the table\nCREATE TABLE a (id INT);\n-- migrate:down\n-- nothing to undo\n";
    let parsed = parse_migration(content).unwrap();
    assert_eq!(sql(&parsed.up), vec!["CREATE TABLE a (id INT)"]);
    assert!(parsed.down.is_empty());
}

#[test]
fn test_missing_down_section() {
    let parsed = parse_migration("-- migrate:up\nSELECT 1;").unwrap();
    assert_eq!(sql(&parsed.up), vec!["SELECT 1"]);
    assert!(parsed.down.is_empty());
}

#[test]
fn test_missing_up_section() {
    let parsed = parse_migration("-- migrate:down\nDROP TABLE a;").unwrap();
    assert!(parsed.up.is_empty());
    assert_eq!(sql(&parsed.down), vec!["DROP TABLE a"]);
}

#[test]
fn test_empty_file() {
    let parsed = parse_migration("").unwrap();
    assert_eq!(parsed, ParsedMigration::default());
}

#[test]
fn test_text_before_first_marker_ignored() {
    let parsed = parse_migration("SELECT 0;\n-- migrate:up\nSELECT 1;").unwrap();
    assert_eq!(sql(&parsed.up), vec!["SELECT 1"]);
}

#[test]
fn test_stray_quote_in_preamble_does_not_hide_markers() {
    let content = "Author: O'Brien\n-- migrate:up\nCREATE TABLE t (id INT);\n-- migrate:down\nDROP TABLE t;\n";
    let parsed = parse_migration(content).unwrap();
    assert_eq!(sql(&parsed.up), vec!["CREATE TABLE t (id INT)"]);
    assert_eq!(sql(&parsed.down), vec!["DROP TABLE t"]);
    assert_eq!(parsed.up[0].line, 3);
}

#[test]
fn test_open_block_comment_in_preamble_does_not_hide_markers() {
    let content = "/* header\n-- migrate:up\nCREATE TABLE t (id INT);\n-- migrate:down\nDROP TABLE t;\n";
    let parsed = parse_migration(content).unwrap();
    assert_eq!(sql(&parsed.up), vec!["CREATE TABLE t (id INT)"]);
    assert_eq!(sql(&parsed.down), vec!["DROP TABLE t"]);
}

#[test]
fn test_no_markers_yields_empty_sections() {
    let parsed = parse_migration("CREATE TABLE t (id INT);\n").unwrap();
    assert_eq!(parsed, ParsedMigration::default());
}

#[test]
fn test_dollar_block_keeps_comment_and_marker_lines() {
    let content = "-- migrate:up
CREATE FUNCTION f() RETURNS int AS $$
-- keep this comment
-- migrate:down
SELECT 1;
$$ LANGUAGE sql;
-- migrate:down
DROP FUNCTION f;
";
    let parsed = parse_migration(content).unwrap();
    assert_eq!(
        sql(&parsed.up),
        vec!["CREATE FUNCTION f() RETURNS int AS $$\n-- keep this comment\n-- migrate:down\nSELECT 1;\n$$ LANGUAGE sql"]
    );
    assert_eq!(sql(&parsed.down), vec!["DROP FUNCTION f"]);
}

#[test]
fn test_statement_lines_refer_to_file() {
    let content = "-- migrate:up\n-- comment\nSELECT 1;\n\nSELECT 2;\n-- migrate:down\nSELECT 3;\n";
    let parsed = parse_migration(content).unwrap();
    let up_lines: Vec<usize> = parsed.up.iter().map(|s| s.line).collect();
    assert_eq!(up_lines, vec![3, 5]);
    assert_eq!(parsed.down[0].line, 7);
}

#[test]
fn test_unterminated_string_reports_file_line() {
    let content = "-- migrate:up\nSELECT 1;\nSELECT 'oops;\n-- migrate:down\nSELECT 2;\n";
    let err = parse_migration(content).unwrap_err();
    assert_eq!(
        err,
        SqlError::Unterminated {
            region: crate::error::QuotedRegion::String,
            line: 3
        }
    );
}

#[test]
fn test_marker_variants() {
    let content = "  -- migrate:up transaction:false\nSELECT 1;\n-- migrate:upgrade notes\n-- migrate:down\nSELECT 2;";
    let parsed = parse_migration(content).unwrap();
    assert_eq!(sql(&parsed.up), vec!["SELECT 1"]);
    assert_eq!(sql(&parsed.down), vec!["SELECT 2"]);
}

#[test]
fn test_repeated_marker_appends_to_section() {
    let content = "-- migrate:up\nSELECT 1;\n-- migrate:down\nSELECT 2;\n-- migrate:up\nSELECT 3;";
    let parsed = parse_migration(content).unwrap();
    assert_eq!(sql(&parsed.up), vec!["SELECT 1", "SELECT 3"]);
    assert_eq!(sql(&parsed.down), vec!["SELECT 2"]);
}

#[test]
fn test_trailing_inline_comment_not_a_statement() {
    let parsed = parse_migration("-- migrate:up\nSELECT 1; -- trailing note\n").unwrap();
    assert_eq!(sql(&parsed.up), vec!["SELECT 1"]);
}

#[test]
fn test_statements_by_direction() {
    let parsed = parse_migration("-- migrate:up\nSELECT 1;\n-- migrate:down\nSELECT 2;").unwrap();
    assert_eq!(sql(parsed.statements(Direction::Up)), vec!["SELECT 1"]);
    assert_eq!(sql(parsed.statements(Direction::Down)), vec!["SELECT 2"]);
    assert_eq!(Direction::Down.to_string(), "down");
}
