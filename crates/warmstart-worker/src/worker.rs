use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, info_span, warn};
use warmstart_core::{BoxedError, CancellationToken};

use crate::{
    DeferredInitializer, ExecuteHook, IdleReason, InitializationError, PostInitLauncher,
    WorkerState,
};

/// Lifecycle controller that lets a service report itself started while its
/// slow initialization is still running.
///
/// [`Worker::start`] hands the initializer to the runtime and returns
/// immediately. A watcher task waits for the initializer to settle and, only
/// if it succeeded and shutdown has not been requested, invokes the launcher.
/// [`Worker::stop`] waits for that whole chain to settle.
pub struct Worker<I, L, E = ()> {
    initializer: Arc<I>,
    launcher: Arc<L>,
    execute_hook: E,
    tracked_task: Option<JoinHandle<()>>,
    state_tx: Arc<watch::Sender<WorkerState>>,
}

impl<I, L> Worker<I, L>
where
    I: DeferredInitializer,
    L: PostInitLauncher,
{
    pub fn new(initializer: I, launcher: L) -> Self {
        let (state_tx, _) = watch::channel(WorkerState::NotStarted);
        Self {
            initializer: Arc::new(initializer),
            launcher: Arc::new(launcher),
            execute_hook: (),
            tracked_task: None,
            state_tx: Arc::new(state_tx),
        }
    }
}

impl<I, L, E> Worker<I, L, E>
where
    I: DeferredInitializer,
    L: PostInitLauncher,
    E: ExecuteHook,
{
    pub fn with_execute_hook<H: ExecuteHook>(self, execute_hook: H) -> Worker<I, L, H> {
        Worker {
            initializer: self.initializer,
            launcher: self.launcher,
            execute_hook,
            tracked_task: self.tracked_task,
            state_tx: self.state_tx,
        }
    }

    pub fn state(&self) -> WorkerState {
        *self.state_tx.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<WorkerState> {
        self.state_tx.subscribe()
    }

    /// Kicks off the deferred initializer without waiting for it. Only the
    /// first call per worker has any effect.
    pub fn start(&mut self, cancellation_token: CancellationToken) {
        let current = self.state();
        if current != WorkerState::NotStarted {
            warn!("Ignoring start request, worker is already {current}");
            return;
        }

        self.state_tx.send_replace(WorkerState::Initializing);
        info!("Starting deferred initialization");

        let initializer = self.initializer.clone();
        let init_token = cancellation_token.clone();
        let initialization =
            tokio::spawn(async move { initializer.initialize(init_token).await }.in_current_span());

        let chain = InitializationChain {
            launcher: self.launcher.clone(),
            cancellation_token,
            state_tx: self.state_tx.clone(),
        };
        self.tracked_task = Some(tokio::spawn(
            async move {
                let outcome = match initialization.await {
                    Ok(result) => result,
                    Err(e) => Err(InitializationError::from(e)),
                };
                chain.settle(outcome);
            }
            .instrument(info_span!("deferred_initialization")),
        ));
    }

    pub async fn execute(&self, cancellation_token: CancellationToken) -> Result<(), BoxedError> {
        debug!("Executing worker");
        self.execute_hook.execute(cancellation_token).await
    }

    /// Waits for the initialization chain to settle. A panic in the chain is
    /// logged and does not prevent the worker from stopping.
    pub async fn stop(&mut self, cancellation_token: CancellationToken) {
        info!(
            "Stopping worker, shutdown requested: {}",
            cancellation_token.is_cancelled()
        );
        self.state_tx.send_replace(WorkerState::Stopping);

        if let Some(tracked_task) = self.tracked_task.take() {
            debug!("Waiting for deferred initialization to settle");
            if let Err(e) = tracked_task.await {
                error!("Deferred initialization chain did not complete cleanly: {e}");
            }
        }

        self.state_tx.send_replace(WorkerState::Stopped);
        info!("Worker stopped");
    }
}

struct InitializationChain<L> {
    launcher: Arc<L>,
    cancellation_token: CancellationToken,
    state_tx: Arc<watch::Sender<WorkerState>>,
}

impl<L: PostInitLauncher> InitializationChain<L> {
    fn settle(self, outcome: Result<(), InitializationError>) {
        match outcome {
            Ok(()) => {
                info!("Deferred initialization completed");
                self.callback_operation();
            }
            Err(InitializationError::Cancelled) => {
                info!("Deferred initialization was cancelled, not launching long-running work");
                self.set_state(WorkerState::Idle(IdleReason::InitializationCancelled));
            }
            Err(e) => {
                // Most likely a configuration problem; an operator needs to look at it
                error!("{e}. Not launching long-running work.");
                self.set_state(WorkerState::Idle(IdleReason::InitializationFailed));
            }
        }
    }

    fn callback_operation(&self) {
        if self.cancellation_token.is_cancelled() {
            info!("Shutdown was requested during initialization, not launching long-running work");
            self.set_state(WorkerState::Idle(IdleReason::ShutdownRequested));
            return;
        }

        self.launcher.launch(self.cancellation_token.clone());
        self.set_state(WorkerState::Running);
    }

    fn set_state(&self, state: WorkerState) {
        // Stop may already be waiting on this chain; don't overwrite Stopping
        self.state_tx.send_if_modified(|current| {
            if *current == WorkerState::Initializing {
                *current = state;
                true
            } else {
                false
            }
        });
    }
}

#[cfg(test)]
#[path = "./worker_test.rs"]
mod worker_test;
