#[cfg(feature = "server")]
pub mod server;
#[cfg(feature = "signal")]
pub mod signal;

mod label;
use std::error::Error;

pub use async_trait::async_trait;
pub use label::*;
pub use tokio_util::sync::CancellationToken;

pub type BoxedError = Box<dyn Error + Send + Sync + 'static>;
