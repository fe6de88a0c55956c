//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Cancels `shutdown` when the process receives Ctrl-C (SIGINT).
///
/// Servers watching the token stop accepting connections and drain
/// in-flight requests. Returns once the token is cancelled, either by the
/// signal or by another part of the program.
pub async fn shutdown_on_ctrl_c(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => {
                    log::info!("Shutdown signal received, draining connections");
                    shutdown.cancel();
                }
                Err(e) => {
                    log::error!("Failed to listen for shutdown signal: {}", e);
                    shutdown.cancelled().await;
                }
            }
        }
        _ = shutdown.cancelled() => {}
    }
}
