use childrec_core::db::schema::SCHEMA_VERSION;
use childrec_core::db::open_db_in_memory;
use childrec_core::{utc_now, ChildRepository, NewChild, RepoError, SqliteChildRepository};
use rusqlite::Connection;

fn ada() -> NewChild {
    NewChild::new("Ada", "Lovelace", "ada@x.com", 34)
}

#[test]
fn create_assigns_id_and_defaults() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteChildRepository::try_new(&conn).unwrap();

    let before = utc_now();
    let child = repo.create(&ada()).unwrap();

    assert_eq!(child.id, 1);
    assert_eq!(child.name, "Ada");
    assert_eq!(child.surname, "Lovelace");
    assert_eq!(child.mail_address, "ada@x.com");
    assert_eq!(child.age, 34);
    assert!(child.is_active);
    assert_eq!(child.updated_at, None);
    assert_eq!(child.deleted_at, None);
    assert!(child.created_at >= before);
    assert!(child.created_at <= utc_now());
}

#[test]
fn ids_are_unique_and_increasing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteChildRepository::try_new(&conn).unwrap();

    let first = repo.create(&ada()).unwrap();
    let second = repo.create(&NewChild::new("Alan", "Turing", "alan@x.com", 41)).unwrap();

    assert!(second.id > first.id);
}

#[test]
fn get_returns_none_for_missing_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteChildRepository::try_new(&conn).unwrap();

    assert!(repo.get(42).unwrap().is_none());
}

#[test]
fn save_overwrites_mutable_fields_and_keeps_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteChildRepository::try_new(&conn).unwrap();

    let created = repo.create(&ada()).unwrap();
    let mut changed = created.clone();
    changed.name = "Augusta".to_string();
    changed.age = 36;
    changed.created_at = created.created_at + chrono::Duration::days(1);
    changed.updated_at = Some(changed.created_at);

    let saved = repo.save(&changed).unwrap();
    assert_eq!(saved.name, "Augusta");
    assert_eq!(saved.age, 36);
    assert_eq!(saved.created_at, created.created_at);
    assert_eq!(saved.updated_at, changed.updated_at);
}

#[test]
fn save_missing_record_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteChildRepository::try_new(&conn).unwrap();

    let mut ghost = repo.create(&ada()).unwrap();
    ghost.id = 99;

    let err = repo.save(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
}

#[test]
fn save_rejects_status_inconsistency() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteChildRepository::try_new(&conn).unwrap();

    let mut child = repo.create(&ada()).unwrap();
    child.is_active = false;

    let err = repo.save(&child).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.get(child.id).unwrap().unwrap().is_active);
}

#[test]
fn list_all_includes_inactive_records_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteChildRepository::try_new(&conn).unwrap();

    let first = repo.create(&ada()).unwrap();
    let mut second = repo.create(&NewChild::new("Alan", "Turing", "alan@x.com", 41)).unwrap();
    second.toggle_active(utc_now());
    repo.save(&second).unwrap();

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1].id, second.id);
    assert!(!all[1].is_active);
    assert_eq!(repo.count().unwrap(), 2);
}

#[test]
fn read_rejects_invalid_persisted_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteChildRepository::try_new(&conn).unwrap();

    let child = repo.create(&ada()).unwrap();
    conn.execute(
        "UPDATE children SET updated_at = created_at - 1000 WHERE id = ?1;",
        [child.id],
    )
    .unwrap();

    let err = repo.get(child.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteChildRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_children_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", SCHEMA_VERSION))
        .unwrap();

    let result = SqliteChildRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("children"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE children (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            surname TEXT NOT NULL,
            mail_address TEXT NOT NULL,
            age INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER,
            is_active INTEGER NOT NULL DEFAULT 1
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", SCHEMA_VERSION))
        .unwrap();

    let result = SqliteChildRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "children",
            column: "deleted_at"
        })
    ));
}
