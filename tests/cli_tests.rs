use assert_cmd::{cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn nag(config: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("morning-nag");
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn test_preview_hell_profile() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("missing.yaml");

    nag(&config)
        .args(["--at", "08:00", "--profile", "hell", "--preview", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("profile: hell"))
        .stdout(predicate::str::contains(
            "T-  06:00  MID   Attention, 6 minutes left. Move fast!",
        ))
        .stdout(predicate::str::contains("Almost late. 4 minutes left!"))
        .stdout(predicate::str::contains("Last 10 seconds. Run!"))
        .stdout(predicate::str::contains("T+  00:10  LATE  You're late! Leave now!"));
}

#[test]
fn test_preview_uses_locale_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");
    fs::write(
        &config,
        "target:\n  time: \"07:30\"\n  profile: gentle\nspeech:\n  locale: zh-TW\n",
    )
    .unwrap();

    nag(&config)
        .args(["--preview", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("to 07:30 (profile: gentle)"))
        .stdout(predicate::str::contains("快遲到了！剩 1 分鐘！"))
        .stdout(predicate::str::contains("時間到！快出門！"));
}

#[test]
fn test_invalid_target_refuses_to_start() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("missing.yaml");

    nag(&config)
        .args(["--at", "25:00", "--mute", "--no-notify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid target time '25:00'"));
}

#[test]
fn test_missing_target_refuses_to_start() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("missing.yaml");

    nag(&config)
        .args(["--mute", "--no-notify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no target time set"));
}

#[test]
fn test_save_writes_settings() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");

    nag(&config)
        .args(["--at", "07:15", "--profile", "GENTLE", "--save", "--preview", "1"])
        .assert()
        .success();

    let saved = fs::read_to_string(&config).unwrap();
    assert!(saved.contains("07:15"), "{saved}");
    assert!(saved.contains("profile: gentle"), "{saved}");
}
