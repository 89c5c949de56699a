mod error_handler;
mod error_sink;

pub use color_eyre;
pub use color_eyre::config::Theme;
pub use error_handler::*;
pub use error_sink::*;
