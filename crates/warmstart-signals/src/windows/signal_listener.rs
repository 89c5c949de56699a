use tracing::info;
use warmstart_core::BoxedError;
use warmstart_core::server::{BackgroundService, ServiceContext};

/// Treats every console control event as a termination request.
#[derive(Default)]
pub struct SignalListener;

impl SignalListener {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl BackgroundService for SignalListener {
    fn name(&self) -> &str {
        "signal_listener_service"
    }

    async fn run(self, context: ServiceContext) -> Result<(), BoxedError> {
        let cancellation_token = context.cancellation_token();
        let mut ctrl_c_stream = tokio::signal::windows::ctrl_c()?;
        let mut ctrl_break_stream = tokio::signal::windows::ctrl_break()?;
        let mut ctrl_shutdown_stream = tokio::signal::windows::ctrl_shutdown()?;
        let mut ctrl_close_stream = tokio::signal::windows::ctrl_close()?;

        tokio::select! {
            _ = ctrl_c_stream.recv() => {}
            _ = ctrl_break_stream.recv() => {}
            _ = ctrl_shutdown_stream.recv() => {}
            _ = ctrl_close_stream.recv() => {}
            _ = cancellation_token.cancelled() => {
                info!("Shutdown requested. Stopping signal handler.");
                return Ok(());
            }
        }

        info!("Console control event received. Requesting shutdown.");
        cancellation_token.cancel();
        Ok(())
    }
}
