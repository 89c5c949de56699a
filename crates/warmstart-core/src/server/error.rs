use std::fmt;

use tokio::task::JoinError;

use crate::BoxedError;

#[derive(thiserror::Error, Debug)]
pub enum BackgroundServiceError {
    #[error("Service {0} failed to shut down within the timeout")]
    TimedOut(String),
    #[error("Service {0} encountered an error: {1:?}")]
    ExecutionFailure(String, BoxedError),
    #[error("Service {0} panicked: {1}")]
    ExecutionPanic(String, JoinError),
}

#[derive(Debug)]
pub struct BackgroundServiceErrors(pub(crate) Vec<BackgroundServiceError>);

impl BackgroundServiceErrors {
    pub fn errors(&self) -> &[BackgroundServiceError] {
        &self.0
    }
}

impl fmt::Display for BackgroundServiceErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for BackgroundServiceErrors {}

#[derive(thiserror::Error, Debug)]
#[error("Unable to add service {0} because the service manager has already been stopped")]
pub struct ServiceAddError(pub String);
