#![allow(clippy::unwrap_used)]
// CLI smoke tests. Anything needing a live vendor endpoint lives in the
// api/core integration tests; these only cover argument handling and the
// config helpers.

use assert_cmd::Command;
use predicates::prelude::*;

fn trydan() -> Command {
    let mut cmd = Command::cargo_bin("trydan").unwrap();
    // Keep the developer's real config and env out of the tests.
    cmd.env_remove("TRYDAN_TOKEN")
        .env_remove("TRYDAN_DEVICE_ID")
        .env_remove("TRYDAN_API")
        .env_remove("TRYDAN_BASE_URL");
    cmd
}

#[test]
fn help_lists_the_command_tree() {
    trydan()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("charge"));
}

#[test]
fn version_prints() {
    trydan()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trydan"));
}

#[test]
fn no_arguments_is_a_usage_error() {
    trydan().assert().failure().code(2);
}

#[test]
fn status_without_credentials_exits_with_the_auth_code() {
    let tmp = tempfile::tempdir().unwrap();
    trydan()
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .arg("status")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("No API token"));
}

#[test]
fn config_path_points_at_a_toml_file() {
    let tmp = tempfile::tempdir().unwrap();
    trydan()
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tmp.path();
    let xdg = tmp.path().join("config");

    trydan()
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", &xdg)
        .args(["config", "init"])
        .assert()
        .success();

    trydan()
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", &xdg)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    trydan()
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", &xdg)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn set_current_rejects_out_of_range_amps() {
    let tmp = tempfile::tempdir().unwrap();
    trydan()
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .env("TRYDAN_TOKEN", "tok")
        .env("TRYDAN_DEVICE_ID", "dev")
        .args(["set", "current", "64"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("must be 0-63"));
}
