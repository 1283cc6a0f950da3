//! Integration tests for the dumb_pelican_client binary

use assert_cmd::Command;
use predicates::prelude::*;

fn client() -> Command {
    let mut cmd = Command::cargo_bin("dumb_pelican_client").unwrap();
    // Keep the test environment from leaking into the binary under test
    cmd.env_remove("_CONDOR_CREDS");
    cmd.env_remove("PELICAN_DIRECTOR_URL");
    cmd
}

#[test]
fn test_help_lists_object_command() {
    client()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("object"));
}

#[test]
fn test_object_help_lists_get_and_put() {
    client()
        .args(["object", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("get").and(predicate::str::contains("put")));
}

#[test]
fn test_get_without_credential_dir_fails() {
    client()
        .args(["object", "get", "osdf:///icecube/file.bin", "out.bin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("_CONDOR_CREDS"));
}

#[test]
fn test_get_rejects_non_federation_url() {
    let cred_dir = tempfile::tempdir().unwrap();

    client()
        .args([
            "--cred-dir",
            cred_dir.path().to_str().unwrap(),
            "object",
            "get",
            "https://example.org/file.bin",
            "out.bin",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("osdf://"));
}

#[test]
fn test_missing_subcommand_fails() {
    client().assert().failure();
}
