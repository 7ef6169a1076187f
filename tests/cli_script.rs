use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const TODAY: &str = "2024-03-15";

fn shell(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("money_tracker_cli").unwrap();
    cmd.env("MONEY_TRACKER_CLI_SCRIPT", "1")
        .env("MONEY_TRACKER_HOME", home)
        .env("MONEY_TRACKER_TODAY", TODAY)
        .env_remove("RUST_LOG");
    cmd
}

fn transactions_file(home: &TempDir) -> std::path::PathBuf {
    home.path().join("data").join("mtp_transactions.json")
}

#[test]
fn script_mode_records_and_lists_transactions() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
add income 1000 Salary 2024-03-10
add expense 12.5 food today \"team lunch\"
list
exit
";

    shell(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("Recorded income of $1,000.00 (Salary)")
                .and(contains("Recorded expense of $12.50 (Food)"))
                .and(contains("-$12.50"))
                .and(contains("team lunch"))
                .and(contains("Mar 15th, 2024"))
                .and(contains("2 of 2 transaction(s) shown.")),
        );

    let json = fs::read_to_string(transactions_file(&home)).unwrap();
    assert!(json.contains("\"type\":\"expense\""));
    assert!(json.contains("\"category\":\"Food\""));
}

#[test]
fn summary_flags_spending_over_the_daily_limit() {
    let home = tempfile::tempdir().unwrap();
    let script = format!(
        "\
budget 100
add expense 120 Food {TODAY}
add expense 500 Housing 2024-03-14
summary
"
    );

    shell(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("Over budget by $20.00")
                .and(contains("[####################] 100%"))
                .and(contains("Daily spending limit exceeded."))
                .and(contains("Last 7 days"))
                .and(contains("Fri")),
        );
}

#[test]
fn summary_json_reports_projected_interest() {
    let home = tempfile::tempdir().unwrap();
    let script = format!(
        "\
add income 1000 Salary 2024-03-01
add expense 50 Transport {TODAY}
summary --json
"
    );

    shell(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("\"today\": \"2024-03-15\"")
                .and(contains("\"projectedInterest\": 45.0"))
                .and(contains("\"balance\": 950.0"))
                .and(contains("\"budgetProgress\": 50.0"))
                .and(contains("\"isOverBudget\": false")),
        );
}

#[test]
fn ledger_persists_across_runs_and_deletes_by_prefix() {
    let home = tempfile::tempdir().unwrap();
    shell(home.path())
        .write_stdin("add expense 30 Housing 2024-01-01 rent\n")
        .assert()
        .success();

    let json = fs::read_to_string(transactions_file(&home)).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&json).unwrap();
    let id = stored[0]["id"].as_str().unwrap().replace('-', "");

    shell(home.path())
        .write_stdin("list rent\n")
        .assert()
        .success()
        .stdout(contains("Housing").and(contains("Jan 1st, 2024")));

    shell(home.path())
        .write_stdin(format!("delete {}\ndelete {}\n", &id[..8], &id[..8]))
        .assert()
        .success()
        .stdout(contains("Deleted expense of $30.00").and(contains("nothing deleted")));

    shell(home.path())
        .write_stdin("list\n")
        .assert()
        .success()
        .stdout(contains("No transactions recorded yet"));
}

#[test]
fn invalid_input_is_reported_without_writing() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
add expense -5 Food
add expense 5 Salary
add expense 5 Food 05/01/2024
add income 1234567890.123456789 Gift
add income 79228162514264337593543950335 Gift
budget 0.001
";

    shell(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("amount: must be greater than zero")
                .and(contains("not a known expense category"))
                .and(contains("is not a YYYY-MM-DD date"))
                .and(contains("amount: at most 2 decimal places"))
                .and(contains("amount: must not exceed 999999999999.99"))
                .and(contains("daily limit: at most 2 decimal places")),
        );

    assert!(!transactions_file(&home).exists());
    assert!(!home.path().join("data").join("mtp_budget.json").exists());
}

#[test]
fn corrupt_data_falls_back_to_an_empty_ledger() {
    let home = tempfile::tempdir().unwrap();
    let data = home.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("mtp_transactions.json"), "not json").unwrap();
    fs::write(data.join("mtp_budget.json"), "{\"dailyLimit\":").unwrap();

    shell(home.path())
        .write_stdin("list\nbudget\n")
        .assert()
        .success()
        .stdout(contains("No transactions recorded yet").and(contains("$100.00")));
}

#[test]
fn unknown_commands_suggest_the_closest_match() {
    let home = tempfile::tempdir().unwrap();
    shell(home.path())
        .write_stdin("sumary\nhelp delete\n")
        .assert()
        .success()
        .stdout(
            contains("Unknown command `sumary`")
                .and(contains("Did you mean `summary`?"))
                .and(contains("Aliases:"))
                .and(contains("rm")),
        );
}

#[test]
fn config_changes_apply_to_later_runs() {
    let home = tempfile::tempdir().unwrap();
    shell(home.path())
        .write_stdin("config set symbol €\nconfig set precision 0\n")
        .assert()
        .success();

    shell(home.path())
        .write_stdin("add income 1234.4 Gift\n")
        .assert()
        .success()
        .stdout(contains("€1,234"));
}
