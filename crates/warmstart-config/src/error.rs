use std::io;
use std::path::PathBuf;

use warmstart_core::Label;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("No config directory is available for {0}")]
    NoProjectDir(Label),
    #[error("Unable to write config template {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("Unable to read config file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Invalid config in {path:?}: {message}")]
    Invalid { path: PathBuf, message: String },
}
