//! Binary smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn help_lists_build_command() {
    Command::cargo_bin("hoist")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"));
}

#[test]
fn build_requires_app_argument() {
    Command::cargo_bin("hoist")
        .unwrap()
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("APP"));
}

#[test]
fn missing_configuration_fails_non_zero() {
    let temp = TempDir::new().unwrap();

    Command::cargo_bin("hoist")
        .unwrap()
        .current_dir(temp.path())
        .args(["build", "api", "--config", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn startup_with_colors_enabled_does_not_panic() {
    let temp = TempDir::new().unwrap();

    // Colored output is the default; logger init must survive it and the
    // run must end with a rendered diagnostic, not an abort.
    Command::cargo_bin("hoist")
        .unwrap()
        .current_dir(temp.path())
        .args(["build", "api", "--config", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn explicit_missing_bundler_config_fails_non_zero() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("hoist.json"),
        r#"{ "compilerOptions": { "webpack": true } }"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("tsconfig.json"),
        r#"{ "compilerOptions": { "outDir": "dist" } }"#,
    )
    .unwrap();

    Command::cargo_bin("hoist")
        .unwrap()
        .current_dir(temp.path())
        .args([
            "build",
            "api",
            "--webpack-path",
            "custom.webpack.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("custom.webpack.json"));
}
