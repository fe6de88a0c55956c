//! HTTP status server for monitoring the gate.
//!
//! Provides two endpoints:
//! - `/metrics` - Prometheus-compatible metrics
//! - `/status` - JSON status endpoint with admission counters
//!
//! The server binds to loopback only and is not behind the geo-fence.

mod handlers;
mod types;

use axum::routing::get;
use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::config::STATUS_SERVER_HOST;
use handlers::{metrics_handler, status_handler};
pub use types::StatusState;

/// Builds the status router.
pub fn status_router(state: StatusState) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Creates and starts the status server
pub async fn start_status_server(
    port: u16,
    state: StatusState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    let app = status_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", STATUS_SERVER_HOST, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind status server to port {}: {}", port, e))?;

    log::info!("Status server listening on http://{}:{}/", STATUS_SERVER_HOST, port);
    log::info!("  - Metrics: http://{}:{}/metrics", STATUS_SERVER_HOST, port);
    log::info!("  - Status: http://{}:{}/status", STATUS_SERVER_HOST, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("Status server error: {}", e))?;

    Ok(())
}
