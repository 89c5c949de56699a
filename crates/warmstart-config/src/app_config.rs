use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use confique::Config;
use confique::toml::{self, FormatOptions};
use tracing::{debug, info};

use crate::{ConfigDir, ConfigError};

const CONFIG_FILENAME: &str = "config.toml";

/// A config schema that [`AppConfig`] can load.
pub trait Configurable: Config + Default + Send + Sync + Clone + 'static {
    /// Checks constraints the field types can't express. The message ends up
    /// in [`ConfigError::Invalid`].
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// `config.toml` layered under environment variables.
///
/// The last successfully loaded values are kept in memory, so reading them
/// never touches the file.
#[derive(Clone, Debug)]
pub struct AppConfig<T: Configurable> {
    path: PathBuf,
    current: Arc<ArcSwap<T>>,
}

impl<T: Configurable> AppConfig<T> {
    /// Loads the config from `config_dir`, writing a commented template there
    /// first if the file doesn't exist yet.
    pub fn load(config_dir: ConfigDir) -> Result<Self, ConfigError> {
        let config = Self {
            path: config_dir.resolve()?.join(CONFIG_FILENAME),
            current: Arc::new(ArcSwap::from_pointee(T::default())),
        };
        config.write_template_if_missing()?;
        config.reload()?;
        Ok(config)
    }

    pub fn full_path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> Result<String, ConfigError> {
        fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })
    }

    pub fn snapshot(&self) -> Arc<T> {
        self.current.load_full()
    }

    /// Reads the environment and the file again. The in-memory values are only
    /// replaced if the result is valid.
    pub fn reload(&self) -> Result<Arc<T>, ConfigError> {
        let config = T::builder()
            .env()
            .file(&self.path)
            .load()
            .map_err(|e| self.invalid(e.to_string()))?;
        config.validate().map_err(|message| self.invalid(message))?;

        let config = Arc::new(config);
        self.current.store(config.clone());
        Ok(config)
    }

    fn write_template_if_missing(&self) -> Result<(), ConfigError> {
        if self.path.exists() {
            debug!("Using existing config file {:?}", self.path);
            return Ok(());
        }

        let write = || -> io::Result<()> {
            if let Some(dir) = self.path.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(&self.path, toml::template::<T>(FormatOptions::default()))
        };
        write().map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!("Wrote config template to {:?}", self.path);
        Ok(())
    }

    fn invalid(&self, message: String) -> ConfigError {
        ConfigError::Invalid {
            path: self.path.clone(),
            message,
        }
    }
}

#[cfg(test)]
#[path = "./app_config_test.rs"]
mod app_config_test;
