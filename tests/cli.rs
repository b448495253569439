//! End-to-end tests for the ckexport binary

use assert_cmd::Command;
use predicates::prelude::*;
use rusqlite::Connection;
use tempfile::TempDir;

fn create_test_db(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("CoinKeeper2.db3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE "Transaction" (
            Uid INTEGER PRIMARY KEY,
            Name TEXT,
            Note TEXT,
            DefaultAmount REAL,
            Icon TEXT,
            Date TEXT,
            DestinationUid INTEGER,
            Deleted INTEGER NOT NULL DEFAULT 0,
            Virtual INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE Category (Uid INTEGER PRIMARY KEY, Title TEXT);
        INSERT INTO Category (Uid, Title) VALUES (1, 'Food'), (2, 'Books');
        INSERT INTO "Transaction"
            (Name, Note, DefaultAmount, Icon, Date, DestinationUid, Deleted)
        VALUES
            ('Coffee', NULL,    3.5,  'cup',  '2024-01-05 09:00:00', 1, 0),
            ('Lunch',  'café',  12.0, 'fork', '2024-01-05 13:30:00', 1, 0),
            ('Book',   NULL,    20.0, 'book', '2024-01-06 18:00:00', 2, 0),
            ('Gone',   NULL,    9.9,  'x',    '2024-01-01 00:00:00', 1, 1);
        "#,
    )
    .unwrap();
    path
}

#[test]
fn exports_csv_target() {
    let dir = TempDir::new().unwrap();
    let db = create_test_db(&dir);
    let target = dir.path().join("out.csv");

    Command::cargo_bin("ckexport")
        .unwrap()
        .arg("-d")
        .arg(&db)
        .arg("-t")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetched 3 transactions"));

    let text = std::fs::read_to_string(&target).unwrap();
    assert!(text.starts_with("Name,Note,DefaultAmount,Icon,Date"));
    assert!(text.contains("Coffee"));
    assert!(text.contains("\"3,5\""));
    assert!(!text.contains("Gone"));
}

#[test]
fn exports_grouped_with_field_selection() {
    let dir = TempDir::new().unwrap();
    let db = create_test_db(&dir);
    let target = dir.path().join("grouped.csv");

    Command::cargo_bin("ckexport")
        .unwrap()
        .arg("-d")
        .arg(&db)
        .args(["-f", "Date", "Name", "DefaultAmount"])
        .arg("--group-by-date")
        .arg("-t")
        .arg(&target)
        .assert()
        .success();

    let text = std::fs::read_to_string(&target).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Date,Name,DefaultAmount");
    assert_eq!(lines[1], "2024-01-05");
    assert_eq!(lines[4], "2024-01-06");
}

#[test]
fn exports_multiple_targets_from_one_fetch() {
    let dir = TempDir::new().unwrap();
    let db = create_test_db(&dir);
    let csv_target = dir.path().join("out.csv");
    let json_target = dir.path().join("out.json");

    Command::cargo_bin("ckexport")
        .unwrap()
        .arg("-d")
        .arg(&db)
        .arg("-t")
        .arg(&csv_target)
        .arg(&json_target)
        .assert()
        .success();

    assert!(csv_target.exists());
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_target).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[test]
fn missing_database_fails() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("ckexport")
        .unwrap()
        .arg("-d")
        .arg(dir.path().join("nope.db3"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Connection error"));
}

#[test]
fn unknown_field_fails() {
    let dir = TempDir::new().unwrap();
    let db = create_test_db(&dir);

    Command::cargo_bin("ckexport")
        .unwrap()
        .arg("-d")
        .arg(&db)
        .args(["-f", "NoSuchColumn"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Query error"));
}

#[test]
fn unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let db = create_test_db(&dir);

    Command::cargo_bin("ckexport")
        .unwrap()
        .arg("-d")
        .arg(&db)
        .arg("-t")
        .arg(dir.path().join("out.xlsx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("xlsx"));
}
