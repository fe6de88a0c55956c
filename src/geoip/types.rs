//! GeoIP data structures.
//!
//! This module defines the data structures used for GeoIP lookups and metadata.

/// Metadata about the GeoIP database
#[derive(Debug, Clone)]
pub struct GeoIpMetadata {
    /// Source path
    pub source: String,
    /// Database build date/version (extracted from database)
    pub version: String,
}

/// GeoIP lookup result
#[derive(Debug, Clone, Default)]
pub struct GeoIpResult {
    pub country_code: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeoIpResult {
    /// Human-readable place name for logs, e.g. "London, GB".
    pub fn place(&self) -> String {
        match (&self.city, &self.country_code) {
            (Some(city), Some(country)) => format!("{}, {}", city, country),
            (Some(city), None) => city.clone(),
            (None, Some(country)) => country.clone(),
            (None, None) => String::from("unknown place"),
        }
    }
}
