use std::time::Duration;

use super::ServiceContext;
use crate::BoxedError;

/// A task that runs alongside the main service handler for the lifetime of
/// the process and is expected to exit once the context is cancelled.
#[async_trait::async_trait]
pub trait BackgroundService: Send + 'static {
    fn name(&self) -> &str;

    fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(1)
    }

    async fn run(self, context: ServiceContext) -> Result<(), BoxedError>;
}
