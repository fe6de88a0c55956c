//! Error type definitions.
//!
//! This module defines the startup and resolution errors used throughout the
//! application. Per-request problems never escape as errors: they are folded
//! into a deny decision by the gateway.

use std::time::Duration;

use log::SetLoggerError;
use thiserror::Error;

/// Invalid fence or lookup configuration. Always fatal at startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Radius is zero, negative or not a finite number.
    #[error("Invalid radius {0} km: must be a finite number greater than 0")]
    InvalidRadius(f64),

    /// Latitude outside [-90, 90] or not finite.
    #[error("Invalid latitude {0}: must be within [-90, 90]")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not finite.
    #[error("Invalid longitude {0}: must be within [-180, 180]")]
    InvalidLongitude(f64),

    /// A zero lookup budget would deny every request.
    #[error("Invalid resolver timeout {0} ms: must be greater than 0")]
    InvalidResolverTimeout(u64),
}

/// Fault inside a location resolver.
///
/// Unknown addresses are not faults; resolvers report them as `Ok(None)`.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The backing database returned an error for this lookup.
    #[error("Location lookup failed: {0}")]
    Lookup(String),

    /// The resolver panicked during a lookup.
    #[error("Location resolver panicked: {0}")]
    Panicked(String),

    /// The lookup did not finish within the request's time budget.
    #[error("Location lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error loading the location data behind a resolver.
    #[error("Location resolver initialization error: {0}")]
    ResolverError(String),

    /// Neither a GeoIP database nor a locations table was supplied.
    #[error("No location source configured: pass --geoip <file.mmdb> or --locations <file.json>")]
    NoResolverConfigured,

    /// The geo-fence itself is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}
