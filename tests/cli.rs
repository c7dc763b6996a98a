use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expenses(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.env("EXPENSE_TRACKER_DATA_DIR", dir.path())
        .env_remove("EXPENSE_TRACKER_SLOT")
        .env_remove("RUST_LOG");
    cmd
}

/// Record an expense and return its full id
fn add(dir: &TempDir, args: &[&str]) -> String {
    let output = expenses(dir).arg("add").args(args).output().unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find(|l| l.trim_start().starts_with("ID:"))
        .and_then(|l| l.split_whitespace().last())
        .unwrap()
        .to_string()
}

#[test]
fn add_then_list() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["--date", "2024-01-15", "12.50", "food", "Lunch", "at", "cafe"]);

    expenses(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch at cafe"))
        .stdout(predicate::str::contains("$12.50"))
        .stdout(predicate::str::contains("1 expense, total $12.50"));
}

#[test]
fn slot_file_holds_plain_json() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["--date", "2024-01-15", "12", "daily", "Soap"]);

    let raw = std::fs::read_to_string(dir.path().join("data").join("expenses.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];

    assert_eq!(first["date"], "2024-01-15");
    assert_eq!(first["category"], "daily");
    assert_eq!(first["amount"], 12);
    assert_eq!(first["description"], "Soap");
}

#[test]
fn invalid_input_is_rejected() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["add", "5", "rent", "Flat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid category"));

    expenses(&dir)
        .args(["add", "0", "food", "Nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than zero"));

    expenses(&dir)
        .args(["add", "--date", "2024-02-30", "5", "food", "Bad date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));

    expenses(&dir)
        .args(["add", "100000000000000000", "food", "Overflow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount out of range"));

    expenses(&dir)
        .args(["add", "1000000000.01", "food", "Yacht"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be at most"));

    expenses(&dir)
        .args(["add", "--", "--5", "food", "Double negative"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid money format"));

    assert!(!dir.path().join("data").join("expenses.json").exists());
}

#[test]
fn time_fields_in_date_format_are_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"date_format": "%Y-%m-%d %H:%M"}"#,
    )
    .unwrap();

    expenses(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date_format"));
}

#[test]
fn summary_ranks_categories() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["--date", "2024-01-03", "10", "food", "Groceries"]);
    add(&dir, &["--date", "2024-01-09", "5", "food", "Snack"]);
    add(&dir, &["--date", "2024-01-09", "3", "daily", "Soap"]);
    add(&dir, &["--date", "2024-02-01", "99", "recreation", "Concert"]);

    expenses(&dir)
        .args(["summary", "--month", "2024-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spending by Category: 2024-01"))
        .stdout(predicate::str::contains("$18.00"))
        .stdout(predicate::str::contains("Top category: Food ($15.00, 83.3%)"))
        .stdout(predicate::str::contains("Recreation").not());

    expenses(&dir)
        .args(["summary", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top category: Recreation"));
}

#[test]
fn summary_csv_output() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["--date", "2024-01-03", "10", "food", "Groceries"]);
    let out = dir.path().join("summary.csv");

    expenses(&dir)
        .args(["summary", "--month", "2024-01", "--output"])
        .arg(&out)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Period,Category,Amount,Count,Percentage"));
    assert!(csv.contains("2024-01,food,10.00,1,100.00"));
}

#[test]
fn edit_by_id_prefix() {
    let dir = TempDir::new().unwrap();
    let id = add(&dir, &["--date", "2024-01-15", "10", "food", "Lunch"]);

    expenses(&dir)
        .args(["edit", &id[..8], "--amount", "12", "--description", "Dinner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount:      $12.00"))
        .stdout(predicate::str::contains("Description: Dinner"));

    expenses(&dir)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dinner"));

    expenses(&dir)
        .args(["edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn delete_and_clear() {
    let dir = TempDir::new().unwrap();
    let a = add(&dir, &["1", "food", "A"]);
    let b = add(&dir, &["2", "food", "B"]);
    add(&dir, &["3", "food", "C"]);

    expenses(&dir)
        .args(["delete", &a, &b])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 expenses"));

    expenses(&dir)
        .args(["delete", "no-such-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expense not found"));

    expenses(&dir)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force"));

    expenses(&dir)
        .args(["clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 expenses"));

    expenses(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn slots_are_independent() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["4", "transportation", "Bus"]);

    expenses(&dir)
        .args(["--slot", "trip", "add", "40", "recreation", "Museum"])
        .assert()
        .success();

    assert!(dir.path().join("data").join("trip.json").exists());

    expenses(&dir)
        .args(["list", "--slot", "trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Museum"))
        .stdout(predicate::str::contains("Bus").not());

    expenses(&dir)
        .args(["--slot", "../escape", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid slot name"));
}

#[test]
fn corrupt_slot_starts_empty() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("expenses.json"), "{not json").unwrap();

    expenses(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."))
        .stderr(predicate::str::contains("discarding unreadable expense data"));
}

#[test]
fn calendar_view() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["--date", "2024-02-14", "25", "recreation", "Dinner"]);

    expenses(&dir)
        .args(["calendar", "--month", "2024-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expenses: 2024-02"))
        .stdout(predicate::str::contains(" 14*"))
        .stdout(predicate::str::contains("$25.00"));
}

#[test]
fn export_formats() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["--date", "2024-01-15", "7.25", "food", "Bagel"]);

    expenses(&dir)
        .args(["export", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"schema_version\":\"1.0.0\""))
        .stdout(predicate::str::contains("Bagel"));

    expenses(&dir)
        .args(["export", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID,Date,Category,Amount,Description"))
        .stdout(predicate::str::contains("2024-01-15,food,7.25,Bagel"));

    let out = dir.path().join("backup.yaml");
    expenses(&dir)
        .args(["export", "yaml", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 expenses"));
    assert!(std::fs::read_to_string(&out)
        .unwrap()
        .contains("description: Bagel"));
}

#[test]
fn history_records_changes() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No history recorded yet."));

    let id = add(&dir, &["--date", "2024-01-15", "10", "food", "Lunch"]);
    expenses(&dir)
        .args(["edit", &id, "--amount", "12"])
        .assert()
        .success();
    expenses(&dir).args(["delete", &id]).assert().success();

    expenses(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Expense"))
        .stdout(predicate::str::contains("amount: $10.00 -> $12.00"))
        .stdout(predicate::str::contains("DELETE Expense"));

    expenses(&dir)
        .args(["--slot", "trip", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history recorded yet."));

    add(&dir, &["--slot", "trip", "40", "recreation", "Museum"]);
    expenses(&dir)
        .args(["--slot", "trip", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Museum"))
        .stdout(predicate::str::contains("Lunch").not());
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Storage slot:    expenses"))
        .stdout(predicate::str::contains("expenses.json"));
}
