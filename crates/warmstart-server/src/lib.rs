mod handler;
pub use handler::*;

mod service;
pub use service::*;

mod service_error;
pub use service_error::*;

pub use warmstart_core::server::{BackgroundService, BackgroundServiceManager, ServiceContext};
pub use warmstart_core::signal::Signal;
pub use warmstart_core::{BoxedError, CancellationToken, Label, async_trait};
#[cfg(target_os = "linux")]
pub use sd_notify;
pub use {futures, tokio};
