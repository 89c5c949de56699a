use std::io;

use futures::stream::StreamExt;
use signal_hook::consts::signal;
use signal_hook_tokio::Signals;
use tracing::info;
use warmstart_core::BoxedError;
use warmstart_core::server::{BackgroundService, ServiceContext};
use warmstart_core::signal::Signal;

/// Cancels the service context when a termination signal arrives. SIGHUP is
/// logged and otherwise ignored so losing the controlling terminal doesn't
/// kill the service.
///
/// Signal handlers are registered when the listener is constructed so no
/// signal is missed between construction and the first poll.
pub struct SignalListener {
    signals: io::Result<Signals>,
}

impl SignalListener {
    pub fn new() -> Self {
        Self {
            signals: Signals::new([
                signal::SIGTERM,
                signal::SIGINT,
                signal::SIGQUIT,
                signal::SIGHUP,
            ]),
        }
    }
}

impl Default for SignalListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl BackgroundService for SignalListener {
    fn name(&self) -> &str {
        "signal_listener_service"
    }

    async fn run(self, context: ServiceContext) -> Result<(), BoxedError> {
        let signals = self.signals?;
        let signals_handle = signals.handle();
        let cancellation_token = context.cancellation_token();

        let mut signals = signals.fuse();
        loop {
            tokio::select! {
                signal = signals.next() => {
                    let Some(signal) = signal else {
                        break;
                    };
                    let signal_name = signal_hook::low_level::signal_name(signal).unwrap_or("unknown");
                    let signal: Signal = signal_name.into();
                    if signal.is_termination() {
                        info!("Received {signal:?}. Requesting shutdown.");
                        cancellation_token.cancel();
                        break;
                    }
                    info!("Received {signal:?}. Ignoring.");
                }
                _ = cancellation_token.cancelled() => {
                    info!("Shutdown requested. Stopping signal handler.");
                    break;
                }
            }
        }

        signals_handle.close();
        Ok(())
    }
}

#[cfg(test)]
#[path = "./signal_listener_test.rs"]
mod signal_listener_test;
