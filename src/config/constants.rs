//! Configuration constants.
//!
//! This module defines the defaults and limits used throughout the application.

/// Default HTTP port for the gated site
pub const DEFAULT_PORT: u16 = 3000;

/// Default time budget for one location lookup, in milliseconds
pub const DEFAULT_RESOLVER_TIMEOUT_MS: u64 = 250;

/// Body of every 403 response
pub const DEFAULT_DENY_MESSAGE: &str = "This site is not available in your location.";

/// Default static content directory
pub const DEFAULT_ROOT_DIR: &str = ".";

/// File served for `/`, directories and unmatched routes
pub const INDEX_FILE: &str = "index.html";

/// Header carrying the forwarding chain when behind a trusted proxy
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Largest GeoIP database accepted at startup (GeoLite2-City is ~70MB)
pub const MAX_GEOIP_DATABASE_SIZE: u64 = 256 * 1024 * 1024;

/// Status server bind address (loopback only)
pub const STATUS_SERVER_HOST: &str = "127.0.0.1";

/// Environment variable names
pub const ENV_CENTER_LAT: &str = "GEO_GATE_CENTER_LAT";
pub const ENV_CENTER_LON: &str = "GEO_GATE_CENTER_LON";
pub const ENV_RADIUS_KM: &str = "GEO_GATE_RADIUS_KM";
pub const ENV_GEOIP_DB: &str = "GEO_GATE_GEOIP_DB";
pub const ENV_LOCATIONS: &str = "GEO_GATE_LOCATIONS";
pub const ENV_ROOT: &str = "GEO_GATE_ROOT";
pub const ENV_TRUST_PROXY: &str = "GEO_GATE_TRUST_PROXY";
pub const ENV_PORT: &str = "PORT";
