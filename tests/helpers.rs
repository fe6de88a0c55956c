// Shared test helpers: fake resolvers, a throwaway static site and a server spawner.
//
// Each integration test file pulls this in with `mod helpers;`, so not every
// helper is used by every file.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use geo_gate::server::{serve, AppState};
use geo_gate::{AdmissionStats, Coordinate, Gateway, GeoFenceConfig, LocationResolver, ResolveError};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const LONDON: (f64, f64) = (51.5074, -0.1278);
pub const PARIS: (f64, f64) = (48.8566, 2.3522);
pub const CROYDON: (f64, f64) = (51.3762, -0.0982);

pub const LONDON_IP: &str = "203.0.113.10";
pub const CROYDON_IP: &str = "203.0.113.11";
pub const PARIS_IP: &str = "198.51.100.20";
pub const UNKNOWN_IP: &str = "192.0.2.99";

pub const INDEX_BODY: &str = "<!doctype html><title>Wellness</title>";
pub const DENY_MESSAGE: &str = "This site is not available in your location.";

pub fn coord((lat, lon): (f64, f64)) -> Coordinate {
    Coordinate::new(lat, lon).expect("valid test coordinate")
}

pub fn london_fence() -> GeoFenceConfig {
    GeoFenceConfig::from_parts(LONDON.0, LONDON.1, 50.0).expect("valid test fence")
}

/// Resolver that knows nothing.
pub struct UnknownResolver;

impl LocationResolver for UnknownResolver {
    fn resolve(&self, _address: &str) -> Result<Option<Coordinate>, ResolveError> {
        Ok(None)
    }
}

/// Resolver that answers the same coordinate for every address and records
/// what it was asked.
pub struct FixedResolver {
    answer: Option<Coordinate>,
    pub seen: Mutex<Vec<String>>,
}

impl FixedResolver {
    pub fn new(answer: Option<Coordinate>) -> Self {
        Self {
            answer,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl LocationResolver for FixedResolver {
    fn resolve(&self, address: &str) -> Result<Option<Coordinate>, ResolveError> {
        self.seen.lock().unwrap().push(address.to_string());
        Ok(self.answer)
    }
}

/// Resolver that always reports an internal fault.
pub struct FailingResolver;

impl LocationResolver for FailingResolver {
    fn resolve(&self, _address: &str) -> Result<Option<Coordinate>, ResolveError> {
        Err(ResolveError::Lookup("backend offline".to_string()))
    }
}

/// Resolver that blocks for a while before answering "London".
pub struct SlowResolver(pub Duration);

impl LocationResolver for SlowResolver {
    fn resolve(&self, _address: &str) -> Result<Option<Coordinate>, ResolveError> {
        std::thread::sleep(self.0);
        Ok(Some(coord(LONDON)))
    }
}

/// Resolver that panics on every lookup.
pub struct PanickingResolver;

impl LocationResolver for PanickingResolver {
    fn resolve(&self, _address: &str) -> Result<Option<Coordinate>, ResolveError> {
        panic!("simulated resolver crash");
    }
}

/// Static table with a few well-known test addresses.
pub fn test_table() -> geo_gate::geoip::StaticResolver {
    geo_gate::geoip::StaticResolver::new()
        .with_entry(LONDON_IP.parse().unwrap(), coord(LONDON))
        .with_entry(CROYDON_IP.parse().unwrap(), coord(CROYDON))
        .with_entry(PARIS_IP.parse().unwrap(), coord(PARIS))
        .with_entry("127.0.0.1".parse().unwrap(), coord(PARIS))
}

/// Creates a small static site in a temporary directory.
pub fn create_site() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let root = dir.path();
    std::fs::write(root.join("index.html"), INDEX_BODY).unwrap();
    std::fs::write(root.join("style.css"), "body { margin: 0; }").unwrap();
    std::fs::create_dir_all(root.join("assets/images")).unwrap();
    std::fs::write(root.join("assets/images/My Photo.png"), [0x89, b'P', b'N', b'G']).unwrap();
    std::fs::create_dir_all(root.join("wishlist")).unwrap();
    std::fs::write(root.join("wishlist/index.html"), "<h1>Wishlist</h1>").unwrap();
    std::fs::write(root.join(".env"), "SECRET=1").unwrap();
    dir
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub stats: Arc<AdmissionStats>,
    pub shutdown: CancellationToken,
    pub handle: JoinHandle<Result<(), anyhow::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(self) {
        self.shutdown.cancel();
        let _ = self.handle.await;
    }
}

pub struct ServerOptions {
    pub trust_proxy: bool,
    pub resolver_timeout: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            trust_proxy: true,
            resolver_timeout: Duration::from_secs(2),
        }
    }
}

/// Starts the gated site on an ephemeral loopback port.
pub async fn spawn_site(
    resolver: Arc<dyn LocationResolver>,
    root: PathBuf,
    options: ServerOptions,
) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    let stats = Arc::new(AdmissionStats::new());
    let shutdown = CancellationToken::new();

    let state = AppState {
        gateway: Arc::new(Gateway::new(london_fence(), resolver)),
        stats: Arc::clone(&stats),
        root: Arc::new(root),
        trust_proxy: options.trust_proxy,
        resolver_timeout: options.resolver_timeout,
        deny_message: DENY_MESSAGE.into(),
    };
    let handle = tokio::spawn(serve(listener, state, shutdown.clone()));

    TestServer {
        addr,
        stats,
        shutdown,
        handle,
    }
}

/// HTTP client that talks to the test server directly, ignoring proxy env vars.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to build HTTP client")
}

/// GET `path` with an optional X-Forwarded-For header.
pub async fn get(server: &TestServer, path: &str, forwarded_for: Option<&str>) -> reqwest::Response {
    let mut request = client().get(server.url(path));
    if let Some(forwarded_for) = forwarded_for {
        request = request.header("X-Forwarded-For", forwarded_for);
    }
    request.send().await.expect("Request to test server failed")
}
