use tap::TapFallible;
use tracing::{error, info, warn};
use warmstart_core::CancellationToken;
use warmstart_core::server::BackgroundServiceManager;

use crate::{Handler, ServiceError};

/// Runs the handler under the OS service manager, reporting readiness as soon
/// as [`Handler::start`] returns.
pub async fn run_as_service<T: Handler>(
    input_data: Option<T::InputData>,
) -> Result<(), ServiceError<T::Error>> {
    run_with_cancellation::<T, _, _>(
        input_data,
        CancellationToken::new(),
        || {
            #[cfg(target_os = "linux")]
            sd_notify::notify(false, &[sd_notify::NotifyState::Ready])
                .tap_err(|e| error!("Error sending ready notification: {e:?}"))
                .ok();
        },
        || {
            #[cfg(target_os = "linux")]
            sd_notify::notify(false, &[sd_notify::NotifyState::Stopping])
                .tap_err(|e| warn!("Error sending stopping notification: {e:?}"))
                .ok();
        },
    )
    .await
}

/// Runs the handler in the foreground without talking to a service manager.
pub async fn run_directly<T: Handler>(
    input_data: Option<T::InputData>,
) -> Result<(), ServiceError<T::Error>> {
    run_with_cancellation::<T, _, _>(input_data, CancellationToken::new(), || {}, || {}).await
}

/// Drives one full service run on the given token.
///
/// `start` is awaited first and `on_started` fires immediately after it. `run`
/// follows; if it fails the token is cancelled. `stop` is only called once the
/// token has been cancelled, and background services are shut down last.
pub async fn run_with_cancellation<T, S, P>(
    input_data: Option<T::InputData>,
    cancellation_token: CancellationToken,
    on_started: S,
    on_stopping: P,
) -> Result<(), ServiceError<T::Error>>
where
    T: Handler,
    S: FnOnce() + Send,
    P: FnOnce() + Send,
{
    let label = T::label();
    let manager = BackgroundServiceManager::new(cancellation_token.clone());
    let mut handler = match T::new(manager.get_context(), input_data).await {
        Ok(handler) => handler,
        Err(e) => {
            let background_service_errors = manager.cancel().await;
            return ServiceError::from_service_result(Err(e), background_service_errors);
        }
    };

    let result = match handler.start(cancellation_token.clone()).await {
        Ok(()) => {
            info!("Service {label} started");
            on_started();

            let run_result = handler
                .run(cancellation_token.clone())
                .await
                .tap_err(|e| error!("Service {label} exited with error: {e}"));
            if run_result.is_err() {
                cancellation_token.cancel();
            }

            cancellation_token.cancelled().await;
            info!("Stopping service {label}");
            on_stopping();

            let stop_result = handler
                .stop(cancellation_token.clone())
                .await
                .tap_err(|e| error!("Error stopping service {label}: {e}"));
            run_result.and(stop_result)
        }
        Err(e) => {
            error!("Service {label} failed to start: {e}");
            Err(e)
        }
    };

    let background_service_errors = manager.cancel().await;
    info!("Service {label} stopped");
    ServiceError::from_service_result(result, background_service_errors)
}

#[cfg(test)]
#[path = "./service_test.rs"]
mod service_test;
