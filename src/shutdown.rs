use crate::storage::KvActorHandle;
use crate::tracker::TrackerHandle;
use tokio::sync::oneshot;
use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_break, ctrl_c};

/// Set up signal handlers for graceful shutdown
pub async fn handle_signals(
    shutdown_send: oneshot::Sender<()>,
    tracker: TrackerHandle,
    kv_handle: KvActorHandle,
) {
    // Wait for a termination signal
    wait_for_signal().await;

    // Shut down the tracker actor
    if let Err(e) = tracker.shutdown().await {
        error!("Error shutting down tracker: {:?}", e);
    } else {
        info!("Tracker shut down successfully");
    }

    // Shut down the key-value actor
    if let Err(e) = kv_handle.shutdown().await {
        error!("Error shutting down key-value actor: {:?}", e);
    } else {
        info!("Key-value actor shut down successfully");
    }

    // Send shutdown signal to main task
    let _ = shutdown_send.send(());
}

/// Platform-specific signal handling implementation
#[cfg(unix)]
async fn wait_for_signal() {
    let mut sigterm =
        signal(SignalKind::terminate()).expect("Failed to create SIGTERM signal handler");
    let mut sigint =
        signal(SignalKind::interrupt()).expect("Failed to create SIGINT signal handler");

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT signal, initiating graceful shutdown");
        }
    }
}

/// Platform-specific signal handling implementation
#[cfg(windows)]
async fn wait_for_signal() {
    let mut ctrlc = ctrl_c().expect("Failed to create Ctrl+C signal handler");
    let mut ctrlbreak = ctrl_break().expect("Failed to create Ctrl+Break signal handler");

    tokio::select! {
        _ = ctrlc.recv() => {
            info!("Received Ctrl+C signal, initiating graceful shutdown");
        }
        _ = ctrlbreak.recv() => {
            info!("Received Ctrl+Break signal, initiating graceful shutdown");
        }
    }
}
