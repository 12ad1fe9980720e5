use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let state_path = dir.path().join("state.sqlite");
    let content = format!(
        "[general]\nstate_db_path = \"{}\"\n\n[watch]\nsubreddit = \"healthcare\"\n",
        state_path.display()
    );
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");

    let mut cmd = cargo_bin_cmd!("reddit-relay");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).expect("read config");
    assert!(content.contains("subreddit = \"healthcare\""));
    assert!(content.contains("state_db_path"));
    assert!(content.contains("api_key_env"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "# existing\n").expect("seed config");

    let mut cmd = cargo_bin_cmd!("reddit-relay");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn posts_reports_empty_cache() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = write_config(&dir);

    let mut cmd = cargo_bin_cmd!("reddit-relay");
    cmd.args(["--config"])
        .arg(&config_path)
        .arg("posts")
        .assert()
        .success()
        .stdout(predicate::str::contains("No cached posts"));
}

#[test]
fn posts_json_outputs_empty_array() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = write_config(&dir);

    let mut cmd = cargo_bin_cmd!("reddit-relay");
    let output = cmd
        .args(["--config"])
        .arg(&config_path)
        .args(["posts", "--json"])
        .output()
        .expect("run posts");

    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value, Value::Array(vec![]));
}

#[test]
fn doctor_fails_without_api_key() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = write_config(&dir);

    let mut cmd = cargo_bin_cmd!("reddit-relay");
    cmd.env_remove("AMPLITUDE_API_KEY")
        .args(["--config"])
        .arg(&config_path)
        .arg("doctor")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Doctor found problems"));
}

#[test]
fn doctor_succeeds_with_api_key_set() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = write_config(&dir);

    let mut cmd = cargo_bin_cmd!("reddit-relay");
    let output = cmd
        .env("AMPLITUDE_API_KEY", "test-key")
        .args(["--config"])
        .arg(&config_path)
        .args(["doctor", "--json"])
        .output()
        .expect("run doctor");

    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["overall"], "ok");
    assert_eq!(value["amplitude"]["status"], "ok");
}
