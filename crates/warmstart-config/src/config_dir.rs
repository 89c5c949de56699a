use std::path::PathBuf;

use directories::ProjectDirs;
use warmstart_core::Label;

use crate::ConfigError;

/// Where the config file lives.
#[derive(Clone, Debug)]
pub enum ConfigDir {
    /// The per-user config directory derived from the service label.
    ProjectDir(Label),
    Custom(PathBuf),
}

impl ConfigDir {
    pub(crate) fn resolve(self) -> Result<PathBuf, ConfigError> {
        match self {
            ConfigDir::Custom(dir) => Ok(dir),
            ConfigDir::ProjectDir(label) => {
                ProjectDirs::from(&label.qualifier, &label.organization, &label.application)
                    .map(|dirs| dirs.config_dir().to_owned())
                    .ok_or(ConfigError::NoProjectDir(label))
            }
        }
    }
}
