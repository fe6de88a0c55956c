//! geo_gate library: geo-fenced admission for a static site
//!
//! This library decides, per request, whether a client's approximate location
//! lies within a radius of a reference point, and serves a static site only
//! to clients that pass.
//!
//! # Example
//!
//! ```no_run
//! use geo_gate::{run_server, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     center_lat: 51.5074,
//!     center_lon: -0.1278,
//!     radius_km: 50.0,
//!     geoip: Some(PathBuf::from("GeoLite2-City.mmdb")),
//!     root: PathBuf::from("./public"),
//!     ..Default::default()
//! };
//!
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The admission decision itself is available without any server:
//!
//! ```
//! use geo_gate::geofence::{evaluate, Coordinate, GeoFenceConfig, ReasonCode};
//! use geo_gate::geoip::StaticResolver;
//!
//! let fence = GeoFenceConfig::from_parts(51.5074, -0.1278, 50.0).unwrap();
//! let resolver = StaticResolver::new().with_entry(
//!     "203.0.113.7".parse().unwrap(),
//!     Coordinate::new(48.8566, 2.3522).unwrap(),
//! );
//!
//! let decision = evaluate("203.0.113.7, 10.0.0.1", &fence, &resolver);
//! assert!(!decision.allowed());
//! assert_eq!(decision.reason(), ReasonCode::OutOfRange);
//! ```
//!
//! # Requirements
//!
//! The server requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
pub mod error_handling;
pub mod geofence;
pub mod geoip;
pub mod initialization;
pub mod server;
pub mod status_server;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use error_handling::{AdmissionStats, ConfigError, InitializationError, ResolveError};
pub use geofence::{
    evaluate, AdmissionDecision, ClientLocation, Coordinate, Gateway, GeoFenceConfig,
    LocationResolver, ReasonCode,
};
pub use run::run_server;

// Internal run module (wires configuration, resolver and servers together)
mod run {
    use anyhow::{Context, Result};
    use log::{info, warn};
    use std::sync::Arc;
    use std::time::Instant;
    use tokio::net::TcpListener;
    use tokio_util::sync::CancellationToken;

    use crate::app::shutdown_on_ctrl_c;
    use crate::config::Config;
    use crate::error_handling::{AdmissionStats, InitializationError};
    use crate::geofence::Gateway;
    use crate::initialization::init_location_resolver;
    use crate::server::{serve, AppState};
    use crate::status_server::{start_status_server, StatusState};

    /// Runs the gated site with the provided configuration.
    ///
    /// Validates the fence and loads the location data before binding any
    /// socket, then serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the fence or the resolver timeout is invalid, no
    /// location source can be loaded, the static root is missing, or the
    /// listener cannot be bound.
    pub async fn run_server(config: Config) -> Result<()> {
        let fence = config
            .geofence()
            .map_err(InitializationError::from)
            .context("Refusing to start with an invalid geo-fence")?;
        let resolver_timeout = config
            .resolver_timeout()
            .map_err(InitializationError::from)
            .context("Refusing to start with an unusable resolver timeout")?;

        let root_metadata = tokio::fs::metadata(&config.root)
            .await
            .with_context(|| format!("Static root {} is not readable", config.root.display()))?;
        if !root_metadata.is_dir() {
            anyhow::bail!("Static root {} is not a directory", config.root.display());
        }

        let resolver = init_location_resolver(&config)
            .await
            .context("Failed to initialize location resolver")?;
        let gateway = Arc::new(Gateway::new(fence, resolver));

        info!(
            "Admitting clients within {} km of {}",
            fence.radius_km(),
            fence.center()
        );
        info!("Location source: {}", gateway.resolver_source());
        if config.trust_proxy {
            info!("Client address taken from X-Forwarded-For (trusted proxy mode)");
        }

        let stats = Arc::new(AdmissionStats::new());
        let shutdown = CancellationToken::new();

        let status_task = config.status_port.map(|port| {
            let state = StatusState {
                stats: Arc::clone(&stats),
                start_time: Arc::new(Instant::now()),
                fence,
                resolver_source: gateway.resolver_source(),
            };
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                if let Err(e) = start_status_server(port, state, shutdown).await {
                    warn!("Status server stopped: {}", e);
                }
            })
        });

        let listen_addr = config.listen_addr();
        let listener = TcpListener::bind(listen_addr)
            .await
            .with_context(|| format!("Failed to bind to {}", listen_addr))?;
        info!(
            "Serving {} on http://{}",
            config.root.display(),
            listener.local_addr()?
        );

        let state = AppState {
            gateway,
            stats: Arc::clone(&stats),
            root: Arc::new(config.root.clone()),
            trust_proxy: config.trust_proxy,
            resolver_timeout,
            deny_message: config.deny_message.as_str().into(),
        };

        tokio::spawn(shutdown_on_ctrl_c(shutdown.clone()));
        let result = serve(listener, state, shutdown.clone()).await;

        shutdown.cancel();
        if let Some(status_task) = status_task {
            let _ = status_task.await;
        }

        let counts = stats.snapshot();
        info!(
            "Server stopped: {} requests ({} admitted, {} denied)",
            counts.total(),
            counts.allowed(),
            counts.denied()
        );
        result
    }
}
