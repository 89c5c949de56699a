use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleReason {
    InitializationFailed,
    InitializationCancelled,
    ShutdownRequested,
}

/// Lifecycle of a single worker run. `Idle` means initialization has settled
/// but no long-running operation was launched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    NotStarted,
    Initializing,
    Running,
    Idle(IdleReason),
    Stopping,
    Stopped,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerState::NotStarted => f.write_str("not started"),
            WorkerState::Initializing => f.write_str("initializing"),
            WorkerState::Running => f.write_str("running"),
            WorkerState::Idle(IdleReason::InitializationFailed) => {
                f.write_str("idle (initialization failed)")
            }
            WorkerState::Idle(IdleReason::InitializationCancelled) => {
                f.write_str("idle (initialization cancelled)")
            }
            WorkerState::Idle(IdleReason::ShutdownRequested) => {
                f.write_str("idle (shutdown requested)")
            }
            WorkerState::Stopping => f.write_str("stopping"),
            WorkerState::Stopped => f.write_str("stopped"),
        }
    }
}
