use warmstart_core::{BoxedError, CancellationToken};

/// Steady-state processing invoked from the host's run phase, right after
/// start returns and independently of whether initialization has finished.
#[async_trait::async_trait]
pub trait ExecuteHook: Send + Sync + 'static {
    async fn execute(&self, cancellation_token: CancellationToken) -> Result<(), BoxedError>;
}

#[async_trait::async_trait]
impl ExecuteHook for () {
    async fn execute(&self, _cancellation_token: CancellationToken) -> Result<(), BoxedError> {
        Ok(())
    }
}
