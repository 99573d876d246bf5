use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("pagetext").unwrap()
}

#[test]
fn help_flag_prints_usage_with_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn text_subcommand_help() {
    cmd()
        .args(["text", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--encoding"))
        .stdout(predicate::str::contains("--on-error"))
        .stdout(predicate::str::contains("--pages"));
}

#[test]
fn info_subcommand_help() {
    cmd()
        .args(["info", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("pagetext "));
}

#[test]
fn no_subcommand_fails() {
    cmd().assert().failure();
}

#[test]
fn unknown_subcommand_fails() {
    cmd()
        .arg("tables")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn invalid_format_value_fails() {
    cmd()
        .args(["text", "page.json", "--format", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn missing_file_reports_not_found() {
    cmd()
        .args(["text", "/nonexistent/pagetext/page.json", "-o", "-"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("file not found"));
}
