use childrec_core::db::schema::{stored_version, SCHEMA_VERSION};
use childrec_core::db::{open_db, open_db_in_memory, DbError, OpenMode};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_children_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(stored_version(&conn).unwrap(), SCHEMA_VERSION);
    assert_table_exists(&conn, "children");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("children.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO children (name, surname, mail_address, age, created_at)
             VALUES ('Ada', 'Lovelace', 'ada@x.com', 34, 0);",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(stored_version(&conn_second).unwrap(), SCHEMA_VERSION);
    let rows: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM children;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
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
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_path_in_missing_directory_reports_unavailable_medium() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("children.db");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::Unavailable {
            mode: OpenMode::File,
            ..
        } | DbError::Sqlite(_)
    ));
}

#[test]
fn schema_rejects_inactive_row_without_deleted_at() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute(
        "INSERT INTO children (name, surname, mail_address, age, created_at, is_active)
         VALUES ('a', 'b', 'c', 1, 0, 0);",
        [],
    );
    assert!(result.is_err());
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
