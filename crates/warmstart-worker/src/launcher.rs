use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::task::TaskTracker;
use tracing::{debug, info};
use warmstart_core::CancellationToken;

/// Starts the long-running work of the service once initialization has
/// succeeded.
///
/// `launch` must not block. Anything it spawns is responsible for observing
/// the token and exiting once it is cancelled.
pub trait PostInitLauncher: Send + Sync + 'static {
    fn launch(&self, cancellation_token: CancellationToken);
}

/// Runs a callback on a fixed interval until shutdown. The first tick fires
/// one full interval after launch.
#[derive(Clone)]
pub struct PeriodicLauncher {
    interval: Duration,
    on_tick: Arc<dyn Fn() + Send + Sync>,
    tracker: TaskTracker,
}

impl PeriodicLauncher {
    pub fn new(interval: Duration, on_tick: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            interval,
            on_tick: Arc::new(on_tick),
            tracker: TaskTracker::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of launched timers that have not exited yet.
    pub fn running(&self) -> usize {
        self.tracker.len()
    }

    /// Waits for every launched timer to exit.
    pub async fn wait(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}

impl PostInitLauncher for PeriodicLauncher {
    fn launch(&self, cancellation_token: CancellationToken) {
        let interval = self.interval;
        let on_tick = self.on_tick.clone();
        info!("Launching periodic operation every {interval:?}");

        self.tracker.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancellation_token.cancelled() => break,
                    _ = ticker.tick() => {
                        debug!("Periodic operation tick");
                        on_tick();
                    }
                }
            }
            info!("Periodic operation stopped");
        });
    }
}

#[cfg(test)]
#[path = "./launcher_test.rs"]
mod launcher_test;
