//! HTTP front end for the gated site.
//!
//! Every route sits behind the admission middleware, so the app shell, the
//! static assets and even 405 responses are only produced for admitted
//! clients.

mod assets;
mod client_addr;
mod middleware;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::error_handling::AdmissionStats;
use crate::geofence::Gateway;

pub use assets::{content_type_for, resolve_asset_path};
pub use client_addr::client_address;
pub use middleware::admit;

/// Shared state for the site router.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub stats: Arc<AdmissionStats>,
    /// Directory holding the static site
    pub root: Arc<PathBuf>,
    /// Read the client address from X-Forwarded-For
    pub trust_proxy: bool,
    /// Deadline for one location lookup
    pub resolver_timeout: Duration,
    /// Body of every 403 response
    pub deny_message: Arc<str>,
}

/// Builds the site router with admission in front of every route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(assets::serve_index))
        .route("/{*path}", get(assets::serve_asset))
        .layer(axum::middleware::from_fn_with_state(state.clone(), admit))
        .with_state(state)
}

/// Serves the site on `listener` until `shutdown` is cancelled.
///
/// Peer addresses are recorded per connection so the middleware can fall
/// back to them when no trusted forwarding header is present.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    let app = build_router(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { shutdown.cancelled().await })
    .await
    .map_err(|e| anyhow::anyhow!("Site server error: {}", e))
}
