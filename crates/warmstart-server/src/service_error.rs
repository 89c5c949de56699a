use std::fmt;

use warmstart_core::server::error::BackgroundServiceErrors;

#[derive(thiserror::Error, Debug)]
pub enum ServiceError<E: fmt::Debug + fmt::Display + Send + Sync + 'static> {
    #[error("Error executing service: {0}. Background service failures: {1:?}")]
    ExecutionFailure(E, Option<BackgroundServiceErrors>),
    #[error("{0}")]
    BackgroundServiceFailure(BackgroundServiceErrors),
}

impl<E: fmt::Debug + fmt::Display + Send + Sync> ServiceError<E> {
    pub(crate) fn from_service_result(
        service_result: Result<(), E>,
        background_service_errors: Result<(), BackgroundServiceErrors>,
    ) -> Result<(), Self> {
        match (service_result, background_service_errors) {
            (Ok(()), Ok(())) => Ok(()),
            (Ok(()), Err(service_errors)) => {
                Err(ServiceError::BackgroundServiceFailure(service_errors))
            }
            (Err(e), Ok(())) => Err(ServiceError::ExecutionFailure(e, None)),
            (Err(e), Err(service_errors)) => {
                Err(ServiceError::ExecutionFailure(e, Some(service_errors)))
            }
        }
    }
}
