mod logger_builder;
mod logger_guard;

pub use logger_builder::*;
pub use {time, tracing_subscriber};
