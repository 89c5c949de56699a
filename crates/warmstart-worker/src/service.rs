use tracing::{debug, info};
use warmstart_config::Configurable;
use warmstart_core::{BoxedError, CancellationToken, Label};
use warmstart_server::{Handler, ServiceContext};
use warmstart_signals::SignalListener;

use crate::{OfflineDataLoader, PeriodicLauncher, Worker, WorkerConfig};

/// The worker wired to the placeholder collaborators and to process signals.
pub struct WorkerService {
    worker: Worker<OfflineDataLoader, PeriodicLauncher>,
    heartbeat: PeriodicLauncher,
}

#[async_trait::async_trait]
impl Handler for WorkerService {
    type InputData = WorkerConfig;
    type Error = BoxedError;

    async fn new(
        context: ServiceContext,
        input_data: Option<Self::InputData>,
    ) -> Result<Self, Self::Error> {
        let config = input_data.unwrap_or_default();
        config.validate()?;
        context.add_service(SignalListener::new()).await?;

        let heartbeat = PeriodicLauncher::new(config.heartbeat_interval(), || {
            info!("Long-running operation heartbeat");
        });
        let worker = Worker::new(
            OfflineDataLoader::new(config.initialization_delay()),
            heartbeat.clone(),
        );
        Ok(Self { worker, heartbeat })
    }

    fn label() -> Label {
        Label {
            qualifier: "com".to_owned(),
            organization: "warmstart".to_owned(),
            application: "warmstart".to_owned(),
        }
    }

    async fn start(&mut self, cancellation_token: CancellationToken) -> Result<(), Self::Error> {
        self.worker.start(cancellation_token);
        Ok(())
    }

    async fn run(&mut self, cancellation_token: CancellationToken) -> Result<(), Self::Error> {
        self.worker.execute(cancellation_token).await
    }

    async fn stop(&mut self, cancellation_token: CancellationToken) -> Result<(), Self::Error> {
        self.worker.stop(cancellation_token).await;
        // The worker has settled, so nothing else can be launched.
        debug!(
            "Waiting for {} heartbeat task(s) to exit",
            self.heartbeat.running()
        );
        self.heartbeat.wait().await;
        Ok(())
    }
}

#[cfg(test)]
#[path = "./service_test.rs"]
mod service_test;
