use std::time::Duration;

use tracing::info;
use warmstart_core::CancellationToken;

use crate::InitializationError;

/// Slow startup work that runs in the background after the service has
/// reported itself started.
///
/// Implementations should watch the token and return
/// [`InitializationError::Cancelled`] when they give up early.
#[async_trait::async_trait]
pub trait DeferredInitializer: Send + Sync + 'static {
    async fn initialize(
        &self,
        cancellation_token: CancellationToken,
    ) -> Result<(), InitializationError>;
}

/// Stand-in for loading a large offline data set. Waits for the configured
/// delay unless shutdown is requested first.
#[derive(Clone, Debug)]
pub struct OfflineDataLoader {
    delay: Duration,
}

impl OfflineDataLoader {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for OfflineDataLoader {
    fn default() -> Self {
        Self::new(Duration::from_secs(8))
    }
}

#[async_trait::async_trait]
impl DeferredInitializer for OfflineDataLoader {
    async fn initialize(
        &self,
        cancellation_token: CancellationToken,
    ) -> Result<(), InitializationError> {
        info!("Loading offline data, expected to take {:?}", self.delay);
        tokio::select! {
            _ = cancellation_token.cancelled() => {
                info!("Offline data load interrupted by shutdown");
                Err(InitializationError::Cancelled)
            }
            _ = tokio::time::sleep(self.delay) => {
                info!("Offline data loaded");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "./initializer_test.rs"]
mod initializer_test;
