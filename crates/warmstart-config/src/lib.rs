mod app_config;
mod config_dir;
mod error;

pub use app_config::*;
pub use config_dir::*;
pub use error::*;
pub use confique;
