//! Integration tests for the command line interface.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Binary pointed at a config file inside `tmp`, so the user's own
/// configuration never leaks into a test.
fn sweeper_actions(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sweeper-actions").unwrap();
    cmd.env_remove("SWEEPER_ACTIONS_CONFIG")
        .arg("--config")
        .arg(tmp.path().join("config.toml"));
    cmd
}

#[test]
fn shows_help() {
    let tmp = TempDir::new().unwrap();
    sweeper_actions(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cleanup actions"));
}

#[test]
fn shows_version() {
    let tmp = TempDir::new().unwrap();
    sweeper_actions(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn requires_subcommand() {
    let tmp = TempDir::new().unwrap();
    sweeper_actions(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn list_shows_enabled_standard_cleanups() {
    let tmp = TempDir::new().unwrap();
    sweeper_actions(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("cleanup_hard_delete"))
        .stdout(predicate::str::contains("cleanup_make_clean"))
        .stdout(predicate::str::contains("cleanup_user_defined_0").not());
}

#[test]
fn list_all_includes_user_cleanups() {
    let tmp = TempDir::new().unwrap();
    sweeper_actions(&tmp)
        .args(["list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleanup_user_defined_9"))
        .stdout(predicate::str::contains("(disabled)"));
}

#[test]
fn list_json_is_valid() {
    let tmp = TempDir::new().unwrap();
    let output = sweeper_actions(&tmp)
        .args(["list", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 7);
    assert_eq!(ids[0], "cleanup_open_in_file_manager");
    assert_eq!(ids[6], "cleanup_hard_delete");
}

#[test]
fn run_dry_run_keeps_target() {
    let tmp = TempDir::new().unwrap();
    let victim = tmp.path().join("victim");
    fs::create_dir(&victim).unwrap();

    sweeper_actions(&tmp)
        .args(["run", "--dry-run", "cleanup_hard_delete"])
        .arg(&victim)
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN]"))
        .stdout(predicate::str::contains("rm -rf"));

    assert!(victim.exists());
}

#[test]
fn run_hard_delete_with_force() {
    let tmp = TempDir::new().unwrap();
    let victim = tmp.path().join("victim");
    fs::create_dir(&victim).unwrap();
    fs::write(victim.join("big.bin"), "x".repeat(4096)).unwrap();

    sweeper_actions(&tmp)
        .args(["run", "--force", "cleanup_hard_delete"])
        .arg(&victim)
        .assert()
        .success()
        .stdout(predicate::str::contains("Freed:"))
        .stdout(predicate::str::contains("KiB"));

    assert!(!victim.exists());
}

#[test]
fn run_hard_delete_declined() {
    let tmp = TempDir::new().unwrap();
    let victim = tmp.path().join("victim");
    fs::create_dir(&victim).unwrap();

    sweeper_actions(&tmp)
        .args(["run", "cleanup_hard_delete"])
        .arg(&victim)
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    assert!(victim.exists());
}

#[test]
fn run_unknown_cleanup_fails() {
    let tmp = TempDir::new().unwrap();
    sweeper_actions(&tmp)
        .args(["run", "cleanup_nope"])
        .arg(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No cleanup with id 'cleanup_nope'"));
}

#[test]
fn run_not_applicable_is_skipped() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("file.txt");
    fs::write(&file, "hello").unwrap();

    sweeper_actions(&tmp)
        .args(["run", "cleanup_make_clean"])
        .arg(&file)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Skipped"));
}

#[test]
fn run_missing_path_fails() {
    let tmp = TempDir::new().unwrap();
    sweeper_actions(&tmp)
        .args(["run", "cleanup_make_clean"])
        .arg(tmp.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot access"));
}

#[test]
fn configure_then_run_user_cleanup() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path().join("work");
    fs::create_dir(&work).unwrap();

    sweeper_actions(&tmp)
        .args([
            "configure",
            "cleanup_user_defined_0",
            "--title",
            "Mark",
            "--command",
            "touch marked",
            "--enable",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 'Mark'"));

    let saved = fs::read_to_string(tmp.path().join("config.toml")).unwrap();
    assert!(saved.contains("touch marked"));

    sweeper_actions(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("cleanup_user_defined_0"));

    sweeper_actions(&tmp)
        .args(["run", "cleanup_user_defined_0"])
        .arg(&work)
        .assert()
        .success();

    assert!(work.join("marked").exists());

    let saved = fs::read_to_string(tmp.path().join("config.toml")).unwrap();
    assert!(saved.contains("activity_points = 10"));
}

#[test]
fn threshold_message_only_on_crossing_run() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path().join("work");
    fs::create_dir(&work).unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        r#"
[general]
activity_threshold = 15

[cleanups.cleanup_user_defined_0]
enabled = true
command = "true"
"#,
    )
    .unwrap();

    let run = |expect_message: bool| {
        let assert = sweeper_actions(&tmp)
            .args(["run", "cleanup_user_defined_0"])
            .arg(&work)
            .assert()
            .success();
        let message = predicate::str::contains("Activity threshold reached");
        if expect_message {
            assert.stdout(message);
        } else {
            assert.stdout(message.not());
        }
    };

    run(false);
    run(true);
    run(false);
}

#[test]
fn configure_unknown_cleanup_fails() {
    let tmp = TempDir::new().unwrap();
    sweeper_actions(&tmp)
        .args(["configure", "cleanup_nope", "--enable"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cleanup_nope"));

    assert!(!tmp.path().join("config.toml").exists());
}

#[test]
fn configure_rejects_enabled_empty_command() {
    let tmp = TempDir::new().unwrap();
    sweeper_actions(&tmp)
        .args(["configure", "cleanup_user_defined_1", "--enable"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty command"));
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    sweeper_actions(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sweeper-actions"));
}
