use assert_cmd::Command;
use predicates::prelude::*;

/// Run `tally` with an empty home directory so no user settings leak in.
fn tally(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("HOME", home.path()).env("NO_COLOR", "1");
    cmd
}

#[test]
fn summary_over_sample_data() {
    let home = tempfile::tempdir().unwrap();
    tally(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{20b9}5,399.00"))
        .stdout(predicate::str::contains("\u{20b9}1,079.80"))
        .stdout(predicate::str::contains("Category Breakdown"));
}

#[test]
fn summary_filtered_by_category() {
    let home = tempfile::tempdir().unwrap();
    tally(&home)
        .args(["summary", "--category", "food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{20b9}450.00"))
        .stdout(predicate::str::contains("100.0%"));
}

#[test]
fn list_filtered_by_month_is_newest_first() {
    let home = tempfile::tempdir().unwrap();
    let output = tally(&home)
        .args(["list", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 expenses"))
        .stdout(predicate::str::contains("Movie tickets").not())
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let flight = text.find("Flight booking to Goa").unwrap();
    let headphones = text.find("New headphones").unwrap();
    assert!(flight < headphones);
}

#[test]
fn months_lists_newest_first() {
    let home = tempfile::tempdir().unwrap();
    tally(&home)
        .arg("months")
        .assert()
        .success()
        .stdout("2025-10  October 2025\n2025-09  September 2025\n");
}

#[test]
fn unknown_category_fails() {
    let home = tempfile::tempdir().unwrap();
    tally(&home)
        .args(["list", "--category", "snacks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category: snacks"));
}

#[test]
fn bad_month_fails() {
    let home = tempfile::tempdir().unwrap();
    tally(&home)
        .args(["summary", "--month", "October"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));
}

#[test]
fn config_changes_currency() {
    let home = tempfile::tempdir().unwrap();
    tally(&home)
        .args(["config", "--currency", "$", "--default-category", "bills"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved."));
    assert!(home.path().join(".config/tally/settings.json").exists());

    tally(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("$5,399.00"));
}

#[test]
fn config_rejects_unknown_category() {
    let home = tempfile::tempdir().unwrap();
    tally(&home)
        .args(["config", "--default-category", "snacks"])
        .assert()
        .failure();
    assert!(!home.path().join(".config/tally/settings.json").exists());
}

#[test]
fn session_without_terminal_prints_overview() {
    let home = tempfile::tempdir().unwrap();
    tally(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Recent Transactions"))
        .stdout(predicate::str::contains("Grocery shopping at D-Mart"));

    tally(&home)
        .args(["run", "--empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found"));
}
