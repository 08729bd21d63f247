//! Binary-level tests: argument parsing, exit status, and rendered output

use assert_cmd::Command;
use distwalk_lib::DependencyKind::{Build, Run, Test};
use distwalk_lib::testing::DistributionFixture;
use predicates::prelude::*;

fn fixture() -> DistributionFixture {
    DistributionFixture::new()
        .unwrap()
        .released("A", &[(Build, "B"), (Test, "gtest")])
        .released("B", &[(Build, "C")])
        .released("C", &[])
        .untagged("D", &[(Run, "C")])
}

/// Command isolated from the caller's environment and `.env` files
fn distwalk(fixture: &DistributionFixture) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_distwalk"));
    cmd.current_dir(fixture.path())
        .env_remove("RUST_LOG")
        .env_remove("DISTWALK_SNAPSHOT")
        .env_remove("DISTWALK_LOG_LEVEL")
        .env_remove("DISTWALK_LOG_FORMAT")
        .env_remove("DISTWALK_LOG_OUTPUT")
        .env_remove("DISTWALK_COLOR")
        .env_remove("DISTWALK_OUTPUT");
    cmd
}

#[test]
fn recursive_depends_prints_one_package_per_line() {
    let fixture = fixture();
    let snapshot = fixture.write().unwrap();

    distwalk(&fixture)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["depends", "A", "-k", "build", "--recursive"])
        .assert()
        .success()
        .stdout("B\nC\n");
}

#[test]
fn snapshot_from_environment() {
    let fixture = fixture();
    let snapshot = fixture.write().unwrap();

    distwalk(&fixture)
        .env("DISTWALK_SNAPSHOT", &snapshot)
        .args(["depends", "A", "--kind", "build", "--kind", "test", "--restrict"])
        .assert()
        .success()
        .stdout("B\n");
}

#[test]
fn dependents_as_json() {
    let fixture = fixture();
    let snapshot = fixture.write().unwrap();

    let output = distwalk(&fixture)
        .arg("-s")
        .arg(&snapshot)
        .args(["--output", "json", "dependents", "C", "-k", "build", "-r"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["direction"], "dependents");
    assert_eq!(report["packages"], serde_json::json!(["A", "B"]));
}

#[test]
fn untagged_repository_fails_reverse_scan() {
    let fixture = fixture();
    let snapshot = fixture.write().unwrap();

    distwalk(&fixture)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["dependents", "C", "-k", "run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no 'release' tag set"));
}

#[test]
fn unknown_dependency_kind_is_rejected() {
    let fixture = fixture();
    let snapshot = fixture.write().unwrap();

    distwalk(&fixture)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["depends", "A", "-k", "doc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("doc"));
}

#[test]
fn kind_is_required() {
    let fixture = fixture();
    let snapshot = fixture.write().unwrap();

    distwalk(&fixture)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["depends", "A"])
        .assert()
        .failure();
}

#[test]
fn missing_snapshot_file_is_reported() {
    let fixture = fixture();

    distwalk(&fixture)
        .args(["--snapshot", "does-not-exist.yaml", "packages"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Release snapshot not found"));
}

#[test]
fn packages_lists_release_eligible_only() {
    let fixture = fixture();
    let snapshot = fixture.write().unwrap();

    distwalk(&fixture)
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["packages", "--released-only"])
        .assert()
        .success()
        .stdout("A\nB\nC\n");
}
