use std::time::Duration;

use confique::Config;
use warmstart_config::Configurable;
use warmstart_logging::UserConfig;

#[derive(Debug, Clone, Config)]
pub struct WorkerConfig {
    /// How long the offline data load takes, in milliseconds.
    #[config(env = "WARMSTART_INITIALIZATION_DELAY_MS", default = 8000)]
    pub initialization_delay_ms: u64,
    /// Interval between runs of the long-running operation, in seconds. Must
    /// be greater than zero.
    #[config(env = "WARMSTART_HEARTBEAT_INTERVAL_SECS", default = 300)]
    pub heartbeat_interval_secs: u64,
    #[config(nested)]
    pub logging: UserConfig,
}

impl WorkerConfig {
    pub fn initialization_delay(&self) -> Duration {
        Duration::from_millis(self.initialization_delay_ms)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }
}

impl Configurable for WorkerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.heartbeat_interval_secs == 0 {
            return Err("heartbeat_interval_secs must be greater than zero".to_owned());
        }
        Ok(())
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            initialization_delay_ms: 8000,
            heartbeat_interval_secs: 300,
            logging: UserConfig::default(),
        }
    }
}

#[cfg(test)]
#[path = "./worker_config_test.rs"]
mod worker_config_test;
