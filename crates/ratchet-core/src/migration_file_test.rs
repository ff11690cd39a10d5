use super::*;
use tempfile::TempDir;

fn write(dir: &Path, file: &str, content: &str) {
    fs::write(dir.join(file), content).unwrap();
}

#[test]
fn test_discover_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let migrations = discover_migrations(&dir.path().join("missing")).unwrap();
    assert!(migrations.is_empty());
}

#[test]
fn test_discover_sorted_by_name() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "20240102_b.sql", "");
    write(dir.path(), "20240101_a.sql", "");
    write(dir.path(), "20231231_z.sql", "");

    let names: Vec<String> = discover_migrations(dir.path())
        .unwrap()
        .into_iter()
        .map(|m| m.name.into_inner())
        .collect();
    assert_eq!(names, vec!["20231231_z", "20240101_a", "20240102_b"]);
}

#[test]
fn test_discover_ignores_other_files_and_subdirectories() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "20240101_a.sql", "");
    write(dir.path(), "README.md", "notes");
    fs::create_dir(dir.path().join("20240103_nested.sql")).unwrap();
    fs::create_dir(dir.path().join("archive")).unwrap();
    write(&dir.path().join("archive"), "20230101_old.sql", "");

    let migrations = discover_migrations(dir.path()).unwrap();
    assert_eq!(migrations.len(), 1);
    assert_eq!(migrations[0].name, "20240101_a");
}

#[test]
fn test_discover_rejects_badly_named_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "init.sql", "");
    let err = discover_migrations(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidMigrationName { .. }));
}

#[test]
fn test_read_content() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "20240101_a.sql", "-- migrate:up\nSELECT 1;\n");
    let migrations = discover_migrations(dir.path()).unwrap();
    assert_eq!(migrations[0].read().unwrap(), "-- migrate:up\nSELECT 1;\n");
}

#[test]
fn test_create_writes_file_and_directory() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("db").join("migrations");
    let name = MigrationName::parse("20240101000000_init").unwrap();

    let file = MigrationFile::create(&target, name, "-- migrate:up\n").unwrap();
    assert_eq!(file.path, target.join("20240101000000_init.sql"));
    assert_eq!(fs::read_to_string(&file.path).unwrap(), "-- migrate:up\n");
}

#[test]
fn test_create_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "20240101000000_init.sql", "original");
    let name = MigrationName::parse("20240101000000_init").unwrap();

    let err = MigrationFile::create(dir.path(), name, "replacement").unwrap_err();
    assert!(matches!(err, CoreError::MigrationExists { .. }));
    assert_eq!(
        fs::read_to_string(dir.path().join("20240101000000_init.sql")).unwrap(),
        "original"
    );
}
