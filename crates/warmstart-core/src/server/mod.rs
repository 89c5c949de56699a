mod background_service;
pub use background_service::*;

mod service_context;
pub use service_context::*;

pub mod error;

pub use tokio_util::sync::CancellationToken;
