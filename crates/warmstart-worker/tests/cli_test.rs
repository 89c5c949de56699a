use assert_cmd::Command;
use tempfile::tempdir;

#[test]
fn test_config_command_writes_template() {
    let config_dir = tempdir().unwrap();

    let output = Command::cargo_bin("warmstart")
        .unwrap()
        .arg("config")
        .arg("--config-dir")
        .arg(config_dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let config_path = config_dir.path().join("config.toml");
    assert!(config_path.exists());
    assert!(stdout.contains(&config_path.display().to_string()));
    assert!(stdout.contains("initialization_delay_ms"));
    assert!(stdout.contains("[logging]"));
}

#[test]
fn test_invalid_config_fails() {
    let config_dir = tempdir().unwrap();
    std::fs::write(
        config_dir.path().join("config.toml"),
        "initialization_delay_ms = \"soon\"",
    )
    .unwrap();

    let output = Command::cargo_bin("warmstart")
        .unwrap()
        .arg("--config-dir")
        .arg(config_dir.path())
        .arg("config")
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8_lossy(&output).contains("Invalid config"));
}

#[test]
fn test_zero_heartbeat_reported_on_stderr() {
    let config_dir = tempdir().unwrap();
    std::fs::write(
        config_dir.path().join("config.toml"),
        "heartbeat_interval_secs = 0",
    )
    .unwrap();

    let output = Command::cargo_bin("warmstart")
        .unwrap()
        .arg("--config-dir")
        .arg(config_dir.path())
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(
        String::from_utf8_lossy(&output)
            .contains("heartbeat_interval_secs must be greater than zero")
    );
}
