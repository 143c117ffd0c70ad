//! Integration tests for the hostspec binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;

fn hostspec() -> Command {
    let mut cmd = Command::new(cargo_bin("hostspec"));
    cmd.env_remove("RANCHER_DOCKER_VERSION")
        .env_remove("HOSTSPEC_PACKAGE")
        .env_remove("HOSTSPEC_SERVICE")
        .env_remove("HOSTSPEC_HOST")
        .env_remove("HOSTSPEC_SSH_KEY")
        .env_remove("RUST_LOG")
        .env_remove("DEBUG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_no_args_without_version_aborts() -> Result<(), Box<dyn std::error::Error>> {
    hostspec().assert().code(2).stderr(predicate::str::contains(
        "Failed to find required envvar 'RANCHER_DOCKER_VERSION'!",
    ));
    Ok(())
}

#[test]
fn cli_check_with_empty_version_aborts() -> Result<(), Box<dyn std::error::Error>> {
    hostspec()
        .arg("check")
        .env("RANCHER_DOCKER_VERSION", "")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Test Summary").not())
        .stderr(predicate::str::contains("RANCHER_DOCKER_VERSION"));
    Ok(())
}

#[test]
fn cli_json_without_version_prints_no_report() -> Result<(), Box<dyn std::error::Error>> {
    hostspec()
        .args(["check", "--json"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn cli_check_with_version_reports_summary() -> Result<(), Box<dyn std::error::Error>> {
    // The build host may or may not run docker; only the shape is fixed.
    let output = hostspec()
        .arg("check")
        .env("RANCHER_DOCKER_VERSION", "17.03.2")
        .output()?;

    let code = output.status.code();
    assert!(code == Some(0) || code == Some(1), "unexpected exit {:?}", code);
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Test Summary:"));
    assert!(stdout.contains("Package docker-engine"));
    Ok(())
}

#[test]
fn cli_check_json_is_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let output = hostspec()
        .args(["check", "--json"])
        .env("RANCHER_DOCKER_VERSION", "17.03.2")
        .output()?;

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["profile"], "docker");
    assert_eq!(json["summary"]["total"], 5);
    Ok(())
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    hostspec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compliance checks"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    hostspec()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hostspec"));
    Ok(())
}

#[test]
fn cli_list_works_without_version() -> Result<(), Box<dyn std::error::Error>> {
    hostspec()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Service docker"))
        .stdout(predicate::str::contains("should be running"));
    Ok(())
}

#[test]
fn cli_list_honors_package_override() -> Result<(), Box<dyn std::error::Error>> {
    hostspec()
        .args(["list", "--package", "docker-ce"])
        .env("RANCHER_DOCKER_VERSION", "18.09")
        .assert()
        .success()
        .stdout(predicate::str::contains("Package docker-ce"))
        .stdout(predicate::str::contains("version should include \"18.09\""));
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    hostspec()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hostspec"));
    Ok(())
}

#[test]
fn cli_rejects_unknown_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    hostspec().arg("frobnicate").assert().failure();
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_bare_run_reports_invalid_target_variable() -> Result<(), Box<dyn std::error::Error>> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    hostspec()
        .env("RANCHER_DOCKER_VERSION", "17.03.2")
        .env("HOSTSPEC_PACKAGE", OsStr::from_bytes(b"docker-\xff"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Test Summary").not())
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[test]
fn cli_unreachable_host_fails_without_report() -> Result<(), Box<dyn std::error::Error>> {
    hostspec()
        .args([
            "check",
            "--host",
            "hostspec-test.invalid",
            "--ssh-timeout",
            "1",
            "--ssh-attempts",
            "1",
        ])
        .env("RANCHER_DOCKER_VERSION", "17.03.2")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Test Summary").not())
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[test]
fn cli_debug_env_enables_debug_logging() -> Result<(), Box<dyn std::error::Error>> {
    hostspec()
        .arg("list")
        .env("DEBUG", "1")
        .assert()
        .success()
        .stderr(predicate::str::contains("hostspec starting"));
    Ok(())
}

#[test]
fn cli_debug_false_keeps_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    hostspec()
        .arg("list")
        .env("DEBUG", "false")
        .assert()
        .success()
        .stderr(predicate::str::contains("hostspec starting").not());
    Ok(())
}
