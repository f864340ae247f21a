//! CLI integration tests
//!
//! Runs the `tally` binary against a temporary data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn tally(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_DATA_DIR", dir.path())
        .env_remove("TALLY_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn run(dir: &TempDir, args: &[&str]) {
    tally(dir).args(args).assert().success();
}

/// Alice pays food for everyone, Bob drinks for two, Charlie hands Alice 20
fn weekend(dir: &TempDir) {
    run(dir, &["init"]);
    run(dir, &["group", "create", "All", "Alice", "Bob", "Charlie"]);
    run(dir, &["group", "create", "AB", "Alice", "Bob"]);
    run(dir, &["expense", "add", "Alice", "150", "All", "Food"]);
    run(dir, &["expense", "add", "Bob", "60", "AB", "Drinks"]);
    run(dir, &["prepayment", "add", "Charlie", "20", "Alice"]);
}

#[test]
fn test_help_output() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("shared expense ledger"))
        .stdout(predicate::str::contains("settle"))
        .stdout(predicate::str::contains("export"));

    tally(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("who has to pay whom to settle up"));
}

#[test]
fn test_settle_end_to_end() {
    let dir = TempDir::new().unwrap();
    weekend(&dir);

    tally(&dir)
        .arg("settle")
        .assert()
        .success()
        .stdout("Bob pays Alice 20.00\nCharlie pays Alice 30.00\n");
}

#[test]
fn test_balance_table() {
    let dir = TempDir::new().unwrap();
    weekend(&dir);

    tally(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expects 50.00"))
        .stdout(predicate::str::contains("Owes 20.00"))
        .stdout(predicate::str::contains("Owes 30.00"));
}

#[test]
fn test_ledger_file_layout() {
    let dir = TempDir::new().unwrap();
    weekend(&dir);

    let raw = fs::read_to_string(dir.path().join("ledger.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["persons"], serde_json::json!(["Alice", "Bob", "Charlie"]));
    assert_eq!(value["groups"]["AB"], serde_json::json!(["Alice", "Bob"]));
    assert_eq!(value["expenses"][1]["person"], "Bob");
    assert_eq!(value["expenses"][1]["amount"], 60.0);
    assert_eq!(value["prepayments"][0]["recipient"], "Alice");
}

#[test]
fn test_report_to_file() {
    let dir = TempDir::new().unwrap();
    weekend(&dir);
    let report = dir.path().join("report.txt");

    tally(&dir)
        .args(["report", "--output"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("- Bob spent 60.00 on Drinks, split across group 'AB' (2 persons)."));
    assert!(text.contains("Charlie pays Alice 30.00"));
}

#[test]
fn test_expense_edit_and_remove() {
    let dir = TempDir::new().unwrap();
    weekend(&dir);

    run(&dir, &["expense", "edit", "2", "--amount", "90"]);
    tally(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("90.00"));

    run(&dir, &["expense", "remove", "2"]);
    tally(&dir)
        .args(["expense", "remove", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expense not found: #2"));
}

#[test]
fn test_unknown_group_is_rejected() {
    let dir = TempDir::new().unwrap();
    weekend(&dir);

    tally(&dir)
        .args(["expense", "add", "Alice", "10", "Nobody", "Snacks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nobody"));
}

#[test]
fn test_invalid_amount_is_rejected() {
    let dir = TempDir::new().unwrap();
    weekend(&dir);

    tally(&dir)
        .args(["prepayment", "add", "Bob", "lots", "Alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid money format"));
}

#[test]
fn test_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);

    tally(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    run(&dir, &["init", "--sample", "--force"]);
    tally(&dir)
        .args(["person", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 5 persons"));
}

#[test]
fn test_leaving_last_group_removes_person() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);
    run(&dir, &["group", "create", "Pair", "Ann", "Ben"]);

    tally(&dir)
        .args(["person", "leave", "Ben", "Pair"])
        .assert()
        .success()
        .stdout(predicate::str::contains("was removed"));

    tally(&dir)
        .args(["person", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 persons"));
}

#[test]
fn test_export_csv_to_stdout() {
    let dir = TempDir::new().unwrap();
    weekend(&dir);

    tally(&dir)
        .args(["export", "csv"])
        .assert()
        .success()
        .stdout("from,to,amount\nBob,Alice,20.0\nCharlie,Alice,30.0\n");
}

#[test]
fn test_export_and_import_json() {
    let dir = TempDir::new().unwrap();
    weekend(&dir);
    let export = dir.path().join("trip.json");

    tally(&dir).args(["export", "json", "--output"]).arg(&export).assert().success();

    let other = dir.path().join("copy.json");
    tally(&dir)
        .arg("--file")
        .arg(&other)
        .arg("import")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 persons, 2 groups, 2 expenses, 1 prepayments"));

    tally(&dir)
        .arg("--file")
        .arg(&other)
        .arg("settle")
        .assert()
        .success()
        .stdout(predicate::str::contains("Charlie pays Alice 30.00"));
}

#[test]
fn test_import_into_default_ledger() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init", "--sample"]);
    let export = dir.path().join("trip.json");
    tally(&dir).args(["export", "json", "--output"]).arg(&export).assert().success();
    let exported = fs::read_to_string(&export).unwrap();

    // Non-empty ledger needs --force
    tally(&dir)
        .arg("import")
        .arg(&export)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ledger.json already has data"));

    run(&dir, &["init", "--force"]);
    tally(&dir)
        .arg("import")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 persons, 4 groups, 6 expenses, 2 prepayments"));

    let raw = fs::read_to_string(dir.path().join("ledger.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["persons"].as_array().unwrap().len(), 5);

    // The export itself is left alone and stays importable
    assert_eq!(fs::read_to_string(&export).unwrap(), exported);
    tally(&dir)
        .args(["import", "--force"])
        .arg(&export)
        .assert()
        .success();
}

#[test]
fn test_group_create_reports_stored_members() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);

    tally(&dir)
        .args(["group", "create", "Pair", "Ann", "Ann", "Ben"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Members: 2"));
}

#[test]
fn test_default_group_from_settings() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);
    run(&dir, &["group", "create", "Everyone", "Ann"]);
    fs::write(
        dir.path().join("config.json"),
        r#"{"default_group": "Everyone"}"#,
    )
    .unwrap();

    tally(&dir)
        .args(["person", "add", "Ben"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added person: Ben (group 'Everyone')"));

    tally(&dir)
        .args(["group", "show", "Everyone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Members (2)"));
}
