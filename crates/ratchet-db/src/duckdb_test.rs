use super::*;

#[tokio::test]
async fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

async fn row_count(db: &DuckDbBackend, table: &str) -> usize {
    db.query_rows(&format!("SELECT * FROM {table}"))
        .await
        .unwrap()
        .len()
}

#[tokio::test]
async fn test_query_rows_count() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE nums AS SELECT * FROM range(10) t(n)")
        .await
        .unwrap();

    assert_eq!(row_count(&db, "nums").await, 10);
}

#[tokio::test]
async fn test_execute_batch() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE t1 (id INT); CREATE TABLE t2 (id INT); INSERT INTO t1 VALUES (1);",
    )
    .await
    .unwrap();

    assert!(db.relation_exists("t1").await.unwrap());
    assert!(db.relation_exists("t2").await.unwrap());
}

#[tokio::test]
async fn test_execute_reports_statement_on_error() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.execute("SELEC 1").await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("[D002]"), "got: {msg}");
    assert!(msg.contains("SELEC 1"), "got: {msg}");
}

#[tokio::test]
async fn test_query_rows_renders_columns_as_strings() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE t (id INTEGER, name VARCHAR, ok BOOLEAN);
         INSERT INTO t VALUES (1, 'a', true), (2, NULL, false);",
    )
    .await
    .unwrap();

    let rows = db
        .query_rows("SELECT id, name, ok FROM t ORDER BY id")
        .await
        .unwrap();
    assert_eq!(
        rows,
        vec![
            vec!["1".to_string(), "a".to_string(), "true".to_string()],
            vec!["2".to_string(), "null".to_string(), "false".to_string()],
        ]
    );
}

#[tokio::test]
async fn test_query_rows_empty_result() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute("CREATE TABLE t (id INTEGER)").await.unwrap();
    let rows = db.query_rows("SELECT id FROM t").await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_relation_not_exists() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(!db.relation_exists("nonexistent").await.unwrap());
    assert!(!db.relation_exists("missing_schema.t").await.unwrap());
}

#[tokio::test]
async fn test_create_schema_if_not_exists() {
    let db = DuckDbBackend::in_memory().unwrap();

    db.create_schema_if_not_exists("ratchet").await.unwrap();
    db.execute("CREATE TABLE ratchet.schema_migrations (name VARCHAR)")
        .await
        .unwrap();

    assert!(db
        .relation_exists("ratchet.schema_migrations")
        .await
        .unwrap());
    assert!(!db.relation_exists("schema_migrations").await.unwrap());

    // IF NOT EXISTS keeps a second call harmless
    db.create_schema_if_not_exists("ratchet").await.unwrap();
}

#[tokio::test]
async fn test_commit_keeps_changes() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute("CREATE TABLE t (id INTEGER)").await.unwrap();

    db.begin().await.unwrap();
    db.execute("INSERT INTO t VALUES (1)").await.unwrap();
    db.commit().await.unwrap();

    assert_eq!(row_count(&db, "t").await, 1);
}

#[tokio::test]
async fn test_rollback_discards_dml_and_ddl() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute("CREATE TABLE t (id INTEGER)").await.unwrap();

    db.begin().await.unwrap();
    db.execute("INSERT INTO t VALUES (1)").await.unwrap();
    db.execute("CREATE TABLE created_in_tx (id INTEGER)")
        .await
        .unwrap();
    db.rollback().await.unwrap();

    assert_eq!(row_count(&db, "t").await, 0);
    assert!(!db.relation_exists("created_in_tx").await.unwrap());
}

#[tokio::test]
async fn test_commit_without_transaction_fails() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.commit().await.unwrap_err();
    assert!(matches!(
        err,
        DbError::TransactionError {
            operation: "commit",
            ..
        }
    ));
}

#[test]
fn test_from_url_memory_forms() {
    for url in [":memory:", "duckdb::memory:", "duckdb://:memory:"] {
        assert!(DuckDbBackend::from_url(url).is_ok(), "url: {url}");
    }
}

#[tokio::test]
async fn test_from_url_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.duckdb");
    let url = format!("duckdb://{}", path.display());

    {
        let db = DuckDbBackend::from_url(&url).unwrap();
        db.execute("CREATE TABLE t (id INTEGER)").await.unwrap();
    }
    assert!(path.exists());

    let reopened = DuckDbBackend::from_url(path.to_str().unwrap()).unwrap();
    assert!(reopened.relation_exists("t").await.unwrap());
}

#[test]
fn test_from_url_rejects_other_schemes() {
    let err = DuckDbBackend::from_url("postgres://localhost/app")
        .err()
        .unwrap();
    assert!(matches!(err, DbError::UnsupportedUrl { .. }));
    assert!(err.to_string().contains("postgres"));
}

#[test]
fn test_from_url_rejects_empty() {
    assert!(matches!(
        DuckDbBackend::from_url("").err().unwrap(),
        DbError::UnsupportedUrl { .. }
    ));
    assert!(matches!(
        DuckDbBackend::from_url("duckdb://").err().unwrap(),
        DbError::UnsupportedUrl { .. }
    ));
}

#[test]
fn test_from_path_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("app.duckdb");
    assert!(matches!(
        DuckDbBackend::from_path(&path).err().unwrap(),
        DbError::ConnectionError(_)
    ));
}
