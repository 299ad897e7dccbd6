use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", dir.path())
        .env("FINTRACK_USER", "alice")
        .env("FINTRACK_PASSWORD", "password123")
        .env_remove("RUST_LOG");
    cmd
}

fn registered() -> TempDir {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["register", "alice", "alice@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User 'alice' registered."));
    dir
}

#[test]
fn config_needs_no_login() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .env_remove("FINTRACK_USER")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Default period:   monthly"));
}

#[test]
fn duplicate_registration_fails() {
    let dir = registered();
    fintrack(&dir)
        .args(["register", "alice", "other@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User already exists: alice"));
}

#[test]
fn short_password_rejected() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .env("FINTRACK_PASSWORD", "short")
        .args(["register", "bob", "bob@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}

#[test]
fn wrong_password_is_rejected() {
    let dir = registered();
    fintrack(&dir)
        .env("FINTRACK_PASSWORD", "not-the-password")
        .args(["expense", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));
}

#[test]
fn missing_user_is_an_error() {
    let dir = registered();
    fintrack(&dir)
        .env_remove("FINTRACK_USER")
        .args(["expense", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user given"));
}

#[test]
fn expenses_add_list_and_total() {
    let dir = registered();
    fintrack(&dir)
        .args(["expense", "add", "50", "Food", "Lunch", "--date", "2025-01-01", "--tags", "work,team"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense added: rec-"));
    fintrack(&dir)
        .args(["expense", "add", "20", "Transport", "Bus", "--date", "2025-01-15"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["expense", "list", "--tag", "team"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch").and(predicate::str::contains("Bus").not()));

    fintrack(&dir)
        .args(["expense", "total"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$70.00"));

    fintrack(&dir)
        .args(["expense", "total", "--start", "2025-01-10", "--end", "2025-01-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$20.00"));

    assert!(dir.path().join("data").join("expenses_alice.json").exists());
}

#[test]
fn invalid_amount_is_a_validation_error() {
    let dir = registered();
    fintrack(&dir)
        .args(["expense", "add", "0", "Food", "Refund"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn unknown_record_id_is_not_found() {
    let dir = registered();
    fintrack(&dir)
        .args(["income", "delete", "rec-00000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record not found: rec-00000000"));
}

#[test]
fn budget_alert_flow() {
    let dir = registered();
    fintrack(&dir)
        .args(["budget", "set", "Food", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget set: Food_monthly"));

    fintrack(&dir)
        .args(["budget", "spend", "Food", "450"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alert threshold reached"));

    fintrack(&dir)
        .args(["budget", "spend", "Food", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("over budget"));

    fintrack(&dir)
        .args(["budget", "spend", "Travel", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Budget not found: Travel_monthly"));
}

#[test]
fn net_balance_report() {
    let dir = registered();
    fintrack(&dir)
        .args(["income", "add", "3000", "Salary", "January", "--date", "2025-01-31"])
        .assert()
        .success();
    fintrack(&dir)
        .args(["expense", "add", "1200", "Housing", "Rent", "--date", "2025-01-01"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["report", "balance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1800.00"));
}

#[test]
fn generate_report_file() {
    let dir = registered();
    fintrack(&dir)
        .args(["expense", "add", "50", "Food", "Lunch", "--date", "2025-01-01"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["report", "generate", "category_summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("category_summary_all_all.json"));

    let path = dir
        .path()
        .join("reports")
        .join("alice")
        .join("category_summary_all_all.json");
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(report["category_totals"]["Food"], 50.0);
}

#[test]
fn unknown_report_kind_fails() {
    let dir = registered();
    fintrack(&dir)
        .args(["report", "generate", "pie_chart"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown report type 'pie_chart'"));
}

#[test]
fn history_lists_changes() {
    let dir = registered();
    fintrack(&dir)
        .args(["expense", "add", "5", "Food", "Snack"])
        .assert()
        .success();

    fintrack(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("alice CREATE Expense"));
}

#[test]
fn malformed_report_range_is_rejected() {
    let dir = registered();
    fintrack(&dir)
        .args(["report", "generate", "category_summary", "--start", "2025/01/01", "--end", "2025-01-31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date '2025/01/01'"));
}

#[test]
fn oversized_amount_is_rejected() {
    let dir = registered();
    fintrack(&dir)
        .args(["expense", "add", "99999999999999999", "Food", "Feast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn oversized_trend_window_is_rejected() {
    let dir = registered();
    fintrack(&dir)
        .args(["report", "trend", "--months", "10000000"])
        .assert()
        .failure();
}
