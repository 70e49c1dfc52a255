use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn childrec(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("childrec").unwrap();
    cmd.env_remove("CHILDREC_LOG_DIR")
        .env_remove("CHILDREC_DB_PATH")
        .arg("--db")
        .arg(db);
    cmd
}

#[test]
fn add_toggle_update_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("children.db");

    childrec(&db)
        .args(["add", "Ada", "Lovelace", "ada@x.com", "34"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1\tAda\tLovelace"))
        .stdout(predicate::str::contains("active"));

    childrec(&db)
        .args(["toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inactive"));

    childrec(&db)
        .args(["update", "1", "--age", "35"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\t35\t"));

    childrec(&db)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada"))
        .stdout(predicate::str::contains("inactive"));
}

#[test]
fn json_output_exposes_record_fields() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("children.db");

    childrec(&db)
        .args(["add", "Ada", "Lovelace", "ada@x.com", "34"])
        .assert()
        .success();

    let output = childrec(&db).args(["--json", "get", "1"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["age"], 34);
    assert_eq!(value["is_active"], true);
    assert!(value["deleted_at"].is_null());
}

#[test]
fn bad_age_fails_without_creating_a_record() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("children.db");

    childrec(&db)
        .args(["add", "Ada", "Lovelace", "ada@x.com", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("age must be an integer"));

    let output = childrec(&db).args(["--json", "list"]).output().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!([]));
}

#[test]
fn missing_id_exits_with_not_found_code() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("children.db");

    childrec(&db)
        .args(["toggle", "9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no child with id 9"));
}

#[test]
fn version_flag_reports_core_version() {
    Command::cargo_bin("childrec")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(childrec_core::core_version()));
}
