use std::time::Duration;

use tempfile::tempdir;
use tracing::Level;
use warmstart_config::{AppConfig, ConfigDir, ConfigError, Configurable};

use super::WorkerConfig;

#[test]
fn test_defaults_from_template() {
    let config_dir = tempdir().unwrap();
    let config = AppConfig::<WorkerConfig>::load(ConfigDir::Custom(config_dir.path().into()))
        .unwrap();

    let snapshot = config.snapshot();
    assert_eq!(Duration::from_secs(8), snapshot.initialization_delay());
    assert_eq!(Duration::from_secs(300), snapshot.heartbeat_interval());
    assert_eq!(Level::INFO, *snapshot.logging.log_level);
}

#[test]
fn test_values_from_file() {
    let config_dir = tempdir().unwrap();
    std::fs::write(
        config_dir.path().join("config.toml"),
        "initialization_delay_ms = 250\nheartbeat_interval_secs = 2\n\n[logging]\nlog_level = \"debug\"\n",
    )
    .unwrap();

    let config = AppConfig::<WorkerConfig>::load(ConfigDir::Custom(config_dir.path().into()))
        .unwrap();
    let snapshot = config.snapshot();
    assert_eq!(Duration::from_millis(250), snapshot.initialization_delay());
    assert_eq!(Duration::from_secs(2), snapshot.heartbeat_interval());
    assert_eq!(Level::DEBUG, *snapshot.logging.log_level);
}

#[test]
fn test_zero_heartbeat_rejected_at_load() {
    let config_dir = tempdir().unwrap();
    std::fs::write(
        config_dir.path().join("config.toml"),
        "heartbeat_interval_secs = 0\n",
    )
    .unwrap();

    let result = AppConfig::<WorkerConfig>::load(ConfigDir::Custom(config_dir.path().into()));
    let Err(ConfigError::Invalid { message, .. }) = result else {
        panic!("expected a zero heartbeat interval to be rejected");
    };
    assert!(message.contains("heartbeat_interval_secs"));
}

#[test]
fn test_default_is_valid() {
    assert!(WorkerConfig::default().validate().is_ok());
}
