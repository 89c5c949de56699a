use confique::Config;
use tempfile::tempdir;

use crate::{AppConfig, ConfigDir, ConfigError, Configurable};

#[derive(Default, Clone, Config, Debug)]
struct TestConfig {
    #[config(default = true)]
    test: bool,
}

impl Configurable for TestConfig {}

#[derive(Default, Clone, Config, Debug)]
struct EnvConfig {
    #[config(env = "WARMSTART_CONFIG_TEST_DELAY", default = 10)]
    delay: u64,
}

impl Configurable for EnvConfig {}

#[derive(Default, Clone, Config, Debug)]
struct LimitConfig {
    #[config(default = 5)]
    limit: u32,
}

impl Configurable for LimitConfig {
    fn validate(&self) -> Result<(), String> {
        if self.limit == 0 {
            return Err("limit must be greater than zero".to_owned());
        }
        Ok(())
    }
}

#[test]
fn test_initial_load_writes_template() {
    let config_dir = tempdir().unwrap();
    let config_path = config_dir.path().join("nested").join("config.toml");

    let config = AppConfig::<TestConfig>::load(ConfigDir::Custom(
        config_dir.path().join("nested"),
    ))
    .unwrap();
    assert_eq!(config_path, config.full_path());
    assert!(config_path.exists());
    assert!(config.snapshot().test);
    assert_eq!(
        "# Default value: true\n#test = true",
        config.contents().unwrap().trim()
    );
}

#[test]
fn test_existing_file_is_kept() {
    let config_dir = tempdir().unwrap();
    std::fs::write(config_dir.path().join("config.toml"), "test = false").unwrap();

    let config = AppConfig::<TestConfig>::load(ConfigDir::Custom(config_dir.path().into()))
        .unwrap();
    assert!(!config.snapshot().test);
    assert_eq!("test = false", config.contents().unwrap());
}

#[test]
fn test_snapshot_changes_on_reload() {
    let config_dir = tempdir().unwrap();
    let config = AppConfig::<TestConfig>::load(ConfigDir::Custom(config_dir.path().into()))
        .unwrap();

    std::fs::write(config_dir.path().join("config.toml"), "test = false").unwrap();
    assert!(config.snapshot().test);
    assert!(!config.reload().unwrap().test);
    assert!(!config.snapshot().test);
}

#[test]
fn test_unparseable_file() {
    let config_dir = tempdir().unwrap();
    std::fs::write(config_dir.path().join("config.toml"), "test = \"not a bool\"").unwrap();

    let result = AppConfig::<TestConfig>::load(ConfigDir::Custom(config_dir.path().into()));
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
fn test_validation_failure() {
    let config_dir = tempdir().unwrap();
    std::fs::write(config_dir.path().join("config.toml"), "limit = 0").unwrap();

    let result = AppConfig::<LimitConfig>::load(ConfigDir::Custom(config_dir.path().into()));
    let Err(ConfigError::Invalid { message, .. }) = result else {
        panic!("expected validation failure");
    };
    assert_eq!("limit must be greater than zero", message);
}

#[test]
fn test_failed_reload_keeps_snapshot() {
    let config_dir = tempdir().unwrap();
    std::fs::write(config_dir.path().join("config.toml"), "limit = 3").unwrap();
    let config = AppConfig::<LimitConfig>::load(ConfigDir::Custom(config_dir.path().into()))
        .unwrap();

    std::fs::write(config_dir.path().join("config.toml"), "limit = 0").unwrap();
    assert!(config.reload().is_err());
    assert_eq!(3, config.snapshot().limit);
}

#[test]
fn test_env_overrides_file() {
    let config_dir = tempdir().unwrap();
    std::fs::write(config_dir.path().join("config.toml"), "delay = 20").unwrap();
    // SAFETY: no other test reads or writes this variable
    unsafe { std::env::set_var("WARMSTART_CONFIG_TEST_DELAY", "30") };

    let config = AppConfig::<EnvConfig>::load(ConfigDir::Custom(config_dir.path().into()))
        .unwrap();
    assert_eq!(30, config.snapshot().delay);
}
