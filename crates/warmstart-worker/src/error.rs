use tokio::task::JoinError;
use warmstart_core::BoxedError;

/// Ways the deferred initializer can settle without succeeding.
#[derive(thiserror::Error, Debug)]
pub enum InitializationError {
    #[error("Initialization was cancelled before it completed")]
    Cancelled,
    #[error("Initialization failed: {0}")]
    Fault(#[source] BoxedError),
    #[error("Initialization panicked: {0}")]
    Panicked(#[from] JoinError),
}

impl InitializationError {
    pub fn fault(error: impl Into<BoxedError>) -> Self {
        Self::Fault(error.into())
    }
}
