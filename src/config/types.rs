//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::*;
use crate::error_handling::ConfigError;
use crate::geofence::GeoFenceConfig;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies. The fence
/// values are only checked when [`Config::geofence`] is called, which the
/// server does before binding any socket.
///
/// # Examples
///
/// ```no_run
/// use geo_gate::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     center_lat: 51.5074,
///     center_lon: -0.1278,
///     radius_km: 50.0,
///     geoip: Some(PathBuf::from("GeoLite2-City.mmdb")),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Fence center latitude in decimal degrees
    pub center_lat: f64,

    /// Fence center longitude in decimal degrees
    pub center_lon: f64,

    /// Allowed radius around the center in kilometers
    pub radius_km: f64,

    /// MaxMind GeoLite2-City database path
    pub geoip: Option<PathBuf>,

    /// JSON locations table path (used when no GeoIP database is given)
    pub locations: Option<PathBuf>,

    /// Directory holding the static site
    pub root: PathBuf,

    /// Address to bind the site listener to
    pub bind: IpAddr,

    /// Port for the site listener
    pub port: u16,

    /// Take the client address from X-Forwarded-For instead of the socket peer
    pub trust_proxy: bool,

    /// Time budget for one location lookup in milliseconds
    pub resolver_timeout_ms: u64,

    /// Body of every 403 response
    pub deny_message: String,

    /// Loopback status server port (optional, disabled by default)
    pub status_port: Option<u16>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Validates the fence settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the center is out of range or the radius is
    /// not greater than zero.
    pub fn geofence(&self) -> Result<GeoFenceConfig, ConfigError> {
        GeoFenceConfig::from_parts(self.center_lat, self.center_lon, self.radius_km)
    }

    /// Time budget for one location lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidResolverTimeout` for a zero budget.
    pub fn resolver_timeout(&self) -> Result<Duration, ConfigError> {
        if self.resolver_timeout_ms == 0 {
            return Err(ConfigError::InvalidResolverTimeout(self.resolver_timeout_ms));
        }
        Ok(Duration::from_millis(self.resolver_timeout_ms))
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            center_lat: 51.5074,
            center_lon: -0.1278,
            radius_km: 50.0,
            geoip: None,
            locations: None,
            root: PathBuf::from(DEFAULT_ROOT_DIR),
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            trust_proxy: false,
            resolver_timeout_ms: DEFAULT_RESOLVER_TIMEOUT_MS,
            deny_message: DEFAULT_DENY_MESSAGE.to_string(),
            status_port: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// Command-line options for the `geo_gate` binary.
///
/// Every fence and data-source option can also be supplied through the
/// environment (or a `.env` file), which is how the site is usually deployed.
///
/// # Examples
///
/// ```bash
/// # Serve ./public to clients within 50 km of London
/// geo_gate --center-lat 51.5074 --center-lon -0.1278 --radius-km 50 \
///     --geoip GeoLite2-City.mmdb --root ./public
///
/// # Behind a reverse proxy that sets X-Forwarded-For
/// GEO_GATE_TRUST_PROXY=true geo_gate ...
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "geo_gate",
    about = "Serves a static site only to clients located within a radius of a reference point."
)]
pub struct Opt {
    /// Fence center latitude in decimal degrees
    #[arg(long, env = ENV_CENTER_LAT, allow_negative_numbers = true)]
    pub center_lat: f64,

    /// Fence center longitude in decimal degrees
    #[arg(long, env = ENV_CENTER_LON, allow_negative_numbers = true)]
    pub center_lon: f64,

    /// Allowed radius in kilometers (must be greater than 0)
    #[arg(long, env = ENV_RADIUS_KM, allow_negative_numbers = true)]
    pub radius_km: f64,

    /// MaxMind GeoLite2-City database (.mmdb)
    #[arg(long, env = ENV_GEOIP_DB, value_parser)]
    pub geoip: Option<PathBuf>,

    /// JSON table of {"<ip>": [lat, lon]} entries, used when --geoip is absent
    #[arg(long, env = ENV_LOCATIONS, value_parser)]
    pub locations: Option<PathBuf>,

    /// Directory holding the static site
    #[arg(long, env = ENV_ROOT, value_parser, default_value = DEFAULT_ROOT_DIR)]
    pub root: PathBuf,

    /// Address to bind to
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(long, env = ENV_PORT, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Trust the X-Forwarded-For header (only enable behind a reverse proxy)
    #[arg(long, env = ENV_TRUST_PROXY)]
    pub trust_proxy: bool,

    /// Time budget for one location lookup in milliseconds (must be greater than 0)
    #[arg(long, default_value_t = DEFAULT_RESOLVER_TIMEOUT_MS)]
    pub resolver_timeout_ms: u64,

    /// Body of every 403 response
    #[arg(long, default_value = DEFAULT_DENY_MESSAGE)]
    pub deny_message: String,

    /// Serve /metrics and /status on 127.0.0.1:<port>
    #[arg(long)]
    pub status_port: Option<u16>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            center_lat: opt.center_lat,
            center_lon: opt.center_lon,
            radius_km: opt.radius_km,
            geoip: opt.geoip,
            locations: opt.locations,
            root: opt.root,
            bind: opt.bind,
            port: opt.port,
            trust_proxy: opt.trust_proxy,
            resolver_timeout_ms: opt.resolver_timeout_ms,
            deny_message: opt.deny_message,
            status_port: opt.status_port,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.resolver_timeout_ms, 250);
        assert!(!config.trust_proxy);
        assert_eq!(config.root, PathBuf::from("."));
        assert!(config.status_port.is_none());
        assert_eq!(config.deny_message, DEFAULT_DENY_MESSAGE);
        assert!(config.geofence().is_ok());
    }

    #[test]
    fn test_config_geofence_rejects_invalid_radius() {
        for radius_km in [0.0, -1.0, f64::NAN] {
            let config = Config {
                radius_km,
                ..Default::default()
            };
            assert!(matches!(
                config.geofence(),
                Err(ConfigError::InvalidRadius(_))
            ));
        }
    }

    #[test]
    fn test_config_geofence_rejects_invalid_center() {
        let config = Config {
            center_lat: -120.0,
            ..Default::default()
        };
        assert!(matches!(
            config.geofence(),
            Err(ConfigError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_config_derived_values() {
        let config = Config {
            port: 8080,
            resolver_timeout_ms: 40,
            ..Default::default()
        };
        assert_eq!(config.listen_addr().port(), 8080);
        assert_eq!(config.resolver_timeout(), Ok(Duration::from_millis(40)));
    }

    #[test]
    fn test_config_rejects_zero_resolver_timeout() {
        let config = Config {
            resolver_timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            config.resolver_timeout(),
            Err(ConfigError::InvalidResolverTimeout(0))
        );
    }

    #[test]
    fn test_opt_parses_negative_coordinates() {
        let opt = Opt::try_parse_from([
            "geo_gate",
            "--center-lat",
            "-33.8688",
            "--center-lon",
            "-151.2093",
            "--radius-km",
            "25",
        ])
        .expect("negative coordinates should parse");
        assert_eq!(opt.center_lat, -33.8688);
        assert_eq!(opt.center_lon, -151.2093);
        assert_eq!(opt.radius_km, 25.0);
    }

    #[test]
    fn test_opt_into_config() {
        let opt = Opt::try_parse_from([
            "geo_gate",
            "--center-lat",
            "51.5074",
            "--center-lon=-0.1278",
            "--radius-km",
            "50",
            "--geoip",
            "GeoLite2-City.mmdb",
            "--trust-proxy",
            "--status-port",
            "9100",
        ])
        .unwrap();
        let config = Config::from(opt);
        assert_eq!(config.geoip, Some(PathBuf::from("GeoLite2-City.mmdb")));
        assert!(config.trust_proxy);
        assert_eq!(config.status_port, Some(9100));
        assert!(config.geofence().is_ok());
    }
}
