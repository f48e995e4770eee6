//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn hospitalctl() -> Command {
    let mut cmd = Command::cargo_bin("hospitalctl").unwrap();
    cmd.env_remove("DATABASE_URL")
        .env_remove("HOSPITALCTL_BIND")
        .env_remove("HOSPITALCTL_TIMEZONE");
    cmd
}

#[test]
fn test_help_lists_commands() {
    hospitalctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    hospitalctl()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--timezone"));
}

#[test]
fn test_migrate_requires_database_url() {
    hospitalctl()
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_serve_rejects_unknown_timezone() {
    hospitalctl()
        .args(["serve", "--timezone", "Mars/Olympus_Mons"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timezone"));
}
