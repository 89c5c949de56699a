use std::fmt;

use warmstart_core::server::ServiceContext;
use warmstart_core::{CancellationToken, Label, async_trait};

/// Lifecycle hooks invoked by the runner in a fixed order: `start`, then
/// `run`, then `stop` once the cancellation token has been triggered.
///
/// The same token is passed to every hook. Handlers only observe it; the
/// runner and the background services registered on the [`ServiceContext`]
/// are the ones that cancel it.
#[async_trait]
pub trait Handler: Sized + Send + Sync + 'static {
    type InputData: Clone + Send + Sync + 'static;
    type Error: fmt::Debug + fmt::Display + Send + Sync + 'static;

    async fn new(
        context: ServiceContext,
        input_data: Option<Self::InputData>,
    ) -> Result<Self, Self::Error>;

    fn label() -> Label;

    /// Must return promptly. The service is reported as started to the
    /// service manager as soon as this completes.
    async fn start(&mut self, cancellation_token: CancellationToken) -> Result<(), Self::Error>;

    async fn run(&mut self, _cancellation_token: CancellationToken) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn stop(&mut self, cancellation_token: CancellationToken) -> Result<(), Self::Error>;
}
