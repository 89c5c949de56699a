use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};
use tracing::{debug, info};

use super::BackgroundService;
use super::error::{BackgroundServiceError, BackgroundServiceErrors, ServiceAddError};
use crate::BoxedError;

struct ServiceInfo {
    name: String,
    timeout: Duration,
    handle: JoinHandle<Result<(), BoxedError>>,
}

type ServiceList = Arc<RwLock<Option<Vec<ServiceInfo>>>>;

/// Owns every background service spawned for one run of the process.
pub struct BackgroundServiceManager {
    cancellation_token: CancellationToken,
    services: ServiceList,
}

impl BackgroundServiceManager {
    pub fn new(cancellation_token: CancellationToken) -> Self {
        Self {
            cancellation_token,
            services: Arc::new(RwLock::new(Some(vec![]))),
        }
    }

    pub fn get_context(&self) -> ServiceContext {
        ServiceContext {
            cancellation_token: self.cancellation_token.clone(),
            services: self.services.clone(),
        }
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Cancels the shared token and waits for each service to exit, giving
    /// every service its own shutdown timeout.
    pub async fn cancel(self) -> Result<(), BackgroundServiceErrors> {
        self.cancellation_token.cancel();
        let mut errors = vec![];
        if let Some(services) = self.services.write().await.take() {
            for service in services {
                match tokio::time::timeout(service.timeout, service.handle).await {
                    Ok(Ok(Ok(()))) => info!("Service {} shut down successfully", service.name),
                    Ok(Ok(Err(e))) => {
                        errors.push(BackgroundServiceError::ExecutionFailure(service.name, e))
                    }
                    Ok(Err(e)) => {
                        errors.push(BackgroundServiceError::ExecutionPanic(service.name, e))
                    }
                    Err(_) => errors.push(BackgroundServiceError::TimedOut(service.name)),
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(BackgroundServiceErrors(errors))
        }
    }
}

#[derive(Clone)]
pub struct ServiceContext {
    cancellation_token: CancellationToken,
    services: ServiceList,
}

impl ServiceContext {
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.cancellation_token.cancelled()
    }

    pub async fn add_service<S: BackgroundService>(
        &self,
        service: S,
    ) -> Result<(), ServiceAddError> {
        let mut guard = self.services.write().await;
        let Some(services) = guard.as_mut() else {
            return Err(ServiceAddError(service.name().to_owned()));
        };
        let name = service.name().to_owned();
        let timeout = service.shutdown_timeout();
        debug!("Spawning background service {name}");
        let context = self.clone();
        let handle = tokio::spawn(async move { service.run(context).await });
        services.push(ServiceInfo {
            name,
            timeout,
            handle,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "./service_context_test.rs"]
mod service_context_test;
