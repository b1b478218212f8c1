use assert_cmd::Command;
use predicates::prelude::*;

fn assetctl() -> Command {
    Command::cargo_bin("assetctl").unwrap()
}

#[test]
fn test_missing_url_prints_help_on_stdout() {
    assetctl()
        .arg("--delete")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Usage"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_invalid_url_reports_value_without_help() {
    assetctl()
        .args(["--listAll", "--url=foobar"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("foobar"))
        .stdout(predicate::str::contains("Usage").not())
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_delete_without_ids_prints_help() {
    assetctl()
        .args(["--delete", "--url=http://localhost:9080"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_no_operation_prints_help() {
    assetctl()
        .args(["--url=http://localhost:9080"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_connection_problem_is_reported_per_asset() {
    // Port 9 is discard; nothing answers there.
    assetctl()
        .args(["--delete", "--url=http://127.0.0.1:9", "9999"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Asset 9999 not deleted"))
        .stdout(predicate::str::contains(
            "There was a problem connecting to the repository",
        ))
        .stdout(predicate::str::contains("Deleted asset 9999").not());
}

#[test]
fn test_help_succeeds() {
    assetctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}
