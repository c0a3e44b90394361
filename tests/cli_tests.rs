use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use assert_cmd::Command;
use predicates::prelude::*;

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    path.push(format!("salesforecast-cli-test-{nanos}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

fn salesforecast() -> Command {
    let mut cmd = Command::cargo_bin("salesforecast").expect("binary built");
    cmd.env_remove("DATABASE_URL")
        .env_remove("CUBEJS_API_SECRET")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let path = write_temp_config("[retry]\nmax_attempts = 0\n");
    let assert = salesforecast()
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert();
    let _ = fs::remove_file(&path);

    assert
        .failure()
        .stderr(predicate::str::contains("retry.max_attempts"));
}

#[test]
fn check_config_summarises_valid_file() {
    let path = write_temp_config("[forecast]\nmodel_version = \"v9\"\n");
    let assert = salesforecast()
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert();
    let _ = fs::remove_file(&path);

    assert
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("v9"))
        .stdout(predicate::str::contains("placeholder"));
}

#[test]
fn explicit_missing_config_fails() {
    salesforecast()
        .args(["--config", "/nonexistent/salesforecast.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn check_database_reports_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("check.db");
    let path = write_temp_config(&format!("[database]\nurl = \"{}\"\n", db.display()));

    let assert = salesforecast()
        .args(["check", "database", "--config"])
        .arg(&path)
        .assert();
    let _ = fs::remove_file(&path);

    assert
        .success()
        .stdout(predicate::str::contains("migrations applied"))
        .stdout(predicate::str::contains("none stored"));
}

#[test]
fn bare_invocation_runs_pipeline_with_unreachable_cube() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("run.db");
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let path = write_temp_config(&format!(
        "[database]\nurl = \"{}\"\n\n[cube]\nbase_url = \"http://{addr}\"\ntimeout_secs = 1\n\n[retry]\nbackoff_secs = 0\n",
        db.display()
    ));

    let assert = salesforecast().arg("--config").arg(&path).assert();
    let _ = fs::remove_file(&path);

    assert
        .success()
        .stdout(predicate::str::contains("374.00"))
        .stdout(predicate::str::contains("Pipeline completed"));
}
