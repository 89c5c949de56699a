use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use warmstart_core::CancellationToken;
use warmstart_server::{BackgroundServiceManager, Handler, run_with_cancellation};

use super::WorkerService;
use crate::WorkerConfig;

fn config(initialization_delay_ms: u64) -> WorkerConfig {
    WorkerConfig {
        initialization_delay_ms,
        heartbeat_interval_secs: 1,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_started_before_initialization_completes() {
    let cancellation_token = CancellationToken::new();
    let started_at = Arc::new(Mutex::new(None));
    let started = started_at.clone();
    let canceller = cancellation_token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(3500)).await;
        canceller.cancel();
    });

    let begin = Instant::now();
    run_with_cancellation::<WorkerService, _, _>(
        Some(config(1000)),
        cancellation_token,
        move || *started.lock().unwrap() = Some(Instant::now()),
        || {},
    )
    .await
    .unwrap();

    let started_at = started_at.lock().unwrap().unwrap();
    assert!(started_at.duration_since(begin) < Duration::from_millis(1000));
    assert!(begin.elapsed() >= Duration::from_millis(3500));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_during_initialization() {
    let cancellation_token = CancellationToken::new();
    let canceller = cancellation_token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        canceller.cancel();
    });

    let begin = Instant::now();
    run_with_cancellation::<WorkerService, _, _>(
        Some(config(60_000)),
        cancellation_token,
        || {},
        || {},
    )
    .await
    .unwrap();

    let elapsed = begin.elapsed();
    assert!(elapsed >= Duration::from_millis(500));
    assert!(elapsed < Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn test_stop_waits_for_heartbeat_to_exit() {
    let cancellation_token = CancellationToken::new();
    let manager = BackgroundServiceManager::new(cancellation_token.clone());
    let mut service = WorkerService::new(manager.get_context(), Some(config(100)))
        .await
        .unwrap();

    service.start(cancellation_token.clone()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(1, service.heartbeat.running());

    cancellation_token.cancel();
    service.stop(cancellation_token.clone()).await.unwrap();
    assert_eq!(0, service.heartbeat.running());
    manager.cancel().await.unwrap();
}

#[tokio::test]
async fn test_zero_heartbeat_rejected() {
    let cancellation_token = CancellationToken::new();
    let result = run_with_cancellation::<WorkerService, _, _>(
        Some(WorkerConfig {
            heartbeat_interval_secs: 0,
            ..Default::default()
        }),
        cancellation_token,
        || panic!("service must not start"),
        || {},
    )
    .await;
    assert!(result.is_err());
}

#[test]
fn test_label() {
    assert_eq!("com.warmstart.warmstart", WorkerService::label().qualified_name());
}
