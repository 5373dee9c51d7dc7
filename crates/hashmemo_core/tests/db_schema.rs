use hashmemo_core::db::{ensure_schema, open_db, open_db_in_memory, DbError, SCHEMA_VERSION};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_memos_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    assert_eq!(
        table_columns(&conn, "memos"),
        vec!["id", "title", "body", "tags", "created_at", "updated_at"]
    );
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memos.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO memos (title, created_at) VALUES ('kept', '2026-01-01 00:00:00.000');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), SCHEMA_VERSION);
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM memos;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_missing_directory_reports_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("memos.db");

    let err = open_db(&path).unwrap_err();
    match &err {
        DbError::Open { location, .. } => assert_eq!(location, &path.display().to_string()),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("cannot open memo database"));
}

#[test]
fn ensure_schema_stamps_fresh_database_and_keeps_existing_rows() {
    let conn = Connection::open_in_memory().unwrap();
    assert_eq!(schema_version(&conn), 0);

    ensure_schema(&conn).unwrap();
    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    conn.execute(
        "INSERT INTO memos (title, created_at) VALUES ('kept', '2026-01-01 00:00:00.000');",
        [],
    )
    .unwrap();

    ensure_schema(&conn).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM memos;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_columns(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    let mut rows = stmt.query([]).unwrap();
    let mut columns = Vec::new();
    while let Some(row) = rows.next().unwrap() {
        columns.push(row.get::<_, String>(1).unwrap());
    }
    columns
}
