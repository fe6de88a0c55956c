//! Geo-fence configuration.

use serde::Serialize;

use super::coordinate::Coordinate;
use crate::error_handling::ConfigError;

/// Reference point and allowed radius. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoFenceConfig {
    center: Coordinate,
    radius_km: f64,
}

impl GeoFenceConfig {
    /// Builds a fence around `center`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRadius` if `radius_km` is not a finite
    /// number greater than zero. The radius is never clamped.
    pub fn new(center: Coordinate, radius_km: f64) -> Result<Self, ConfigError> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(ConfigError::InvalidRadius(radius_km));
        }
        Ok(Self { center, radius_km })
    }

    /// Builds a fence from raw latitude, longitude and radius values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an invalid center or radius.
    pub fn from_parts(latitude: f64, longitude: f64, radius_km: f64) -> Result<Self, ConfigError> {
        Self::new(Coordinate::new(latitude, longitude)?, radius_km)
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }
}
