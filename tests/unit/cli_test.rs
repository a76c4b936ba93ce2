//! Integration tests for the folio CLI

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn folio() -> assert_cmd::Command {
    assert_cmd::Command::new(cargo::cargo_bin!("folio"))
}

fn init(temp: &TempDir) -> std::path::PathBuf {
    let config = temp.path().join("config.toml");
    folio().arg("--config").arg(&config).arg("init").assert().success();
    config
}

#[test]
fn test_version() {
    folio()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("folio"));
}

#[test]
fn test_help() {
    folio()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Admins sign in to edit projects"));
}

#[test]
fn test_no_args_shows_info() {
    folio()
        .assert()
        .success()
        .stdout(predicate::str::contains("folio init"));
}

#[test]
fn test_version_json() {
    folio()
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn test_init_creates_config_and_data_dir() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");

    folio()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("folio initialized!"));

    assert!(config.exists());
    assert!(temp.path().join("data").is_dir());
    let content = std::fs::read_to_string(&config).unwrap();
    assert!(content.contains("[server]"));
}

#[test]
fn test_init_twice_needs_force() {
    let temp = TempDir::new().unwrap();
    let config = init(&temp);

    folio()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    folio()
        .arg("--config")
        .arg(&config)
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("folio initialized!"));
}

#[test]
fn test_passwd_prints_hash() {
    folio()
        .args(["passwd", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$argon2"));
}

#[test]
fn test_passwd_with_email_saves_account() {
    let temp = TempDir::new().unwrap();
    let config = init(&temp);

    folio()
        .arg("--config")
        .arg(&config)
        .args(["passwd", "hunter2", "--email", "admin@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Admin account saved"));

    let content = std::fs::read_to_string(&config).unwrap();
    assert!(content.contains("admin@example.com"));
    assert!(content.contains("$argon2"));
    assert!(!content.contains("hunter2"));
}

#[test]
fn test_list_empty_collection() {
    let temp = TempDir::new().unwrap();
    let config = init(&temp);

    folio()
        .arg("--config")
        .arg(&config)
        .args(["list", "projects"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found."));
}

#[test]
fn test_list_skills_json() {
    let temp = TempDir::new().unwrap();
    let config = init(&temp);
    std::fs::write(
        temp.path().join("data").join("skills.json"),
        r#"[
  { "id": "a", "type": "technical", "name": "Rust", "level": 90 },
  { "id": "b", "type": "soft", "name": "Writing" }
]"#,
    )
    .unwrap();

    let output = folio()
        .arg("--config")
        .arg(&config)
        .args(["--json", "list", "skills"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["collection"], "skills");
    assert_eq!(json["categories"][0]["items"][0]["title"], "Rust");
    assert_eq!(json["categories"][1]["category"], "soft");
}

#[test]
fn test_list_unknown_collection_fails() {
    folio()
        .args(["list", "blog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_malformed_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[server\n").unwrap();

    folio()
        .arg("--config")
        .arg(&config)
        .args(["list", "skills"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
