//! MaxMind-backed location resolver.
//!
//! Looks up client addresses in a GeoLite2-City database held in memory by
//! the resolver instance.

use anyhow::Result;
use maxminddb::Reader;
use std::path::Path;

use super::address::parse_client_ip;
use super::loader::{load_from_bytes, load_from_file};
use super::types::{GeoIpMetadata, GeoIpResult};
use crate::error_handling::ResolveError;
use crate::geofence::{Coordinate, LocationResolver};

/// Location resolver over a MaxMind GeoLite2-City database.
pub struct MaxMindResolver {
    reader: Reader<Vec<u8>>,
    metadata: GeoIpMetadata,
}

impl MaxMindResolver {
    /// Loads the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is too large, or is not a
    /// valid MaxMind database.
    pub async fn open(path: &Path) -> Result<Self> {
        let (reader, metadata) = load_from_file(path).await?;
        log::info!(
            "GeoIP database loaded: {} ({})",
            metadata.source,
            metadata.version
        );
        Ok(Self { reader, metadata })
    }

    /// Builds a resolver from database bytes already in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid MaxMind database.
    pub fn from_bytes(db_bytes: Vec<u8>, source: &str) -> Result<Self> {
        let (reader, metadata) = load_from_bytes(db_bytes, source)?;
        Ok(Self { reader, metadata })
    }

    pub fn metadata(&self) -> &GeoIpMetadata {
        &self.metadata
    }

    /// Looks up an address in the City database.
    ///
    /// Returns `Ok(None)` for unparseable addresses and addresses without a
    /// database record (private and reserved ranges included).
    pub fn lookup(&self, address: &str) -> Result<Option<GeoIpResult>, ResolveError> {
        let Some(ip_addr) = parse_client_ip(address) else {
            return Ok(None);
        };

        // maxminddb 0.27 API: lookup() returns Result<LookupResult, MaxMindDbError>
        // Use has_data() to check if data exists, then decode() to get the City struct
        let city_lookup = self
            .reader
            .lookup(ip_addr)
            .map_err(|e| ResolveError::Lookup(e.to_string()))?;

        if !city_lookup.has_data() {
            return Ok(None);
        }

        let city_result: maxminddb::geoip2::City = match city_lookup.decode() {
            Ok(Some(city)) => city,
            Ok(None) => return Ok(None),
            Err(e) => return Err(ResolveError::Lookup(e.to_string())),
        };

        Ok(Some(GeoIpResult {
            country_code: city_result.country.iso_code.map(|s| s.to_string()),
            city: city_result.city.names.english.map(|s| s.to_string()),
            latitude: city_result.location.latitude,
            longitude: city_result.location.longitude,
        }))
    }
}

impl LocationResolver for MaxMindResolver {
    fn resolve(&self, address: &str) -> Result<Option<Coordinate>, ResolveError> {
        Ok(self
            .lookup(address)?
            .and_then(|record| record_coordinate(address, &record)))
    }

    fn source(&self) -> String {
        format!(
            "MaxMind database {} ({})",
            self.metadata.source, self.metadata.version
        )
    }
}

/// Coordinate of a City record.
///
/// Country-level records carry no coordinates and give `None`, as do records
/// whose coordinates are out of range.
fn record_coordinate(address: &str, record: &GeoIpResult) -> Option<Coordinate> {
    let (Some(latitude), Some(longitude)) = (record.latitude, record.longitude) else {
        return None;
    };
    match Coordinate::new(latitude, longitude) {
        Ok(coordinate) => {
            log::debug!("Resolved {} to {} {}", address, record.place(), coordinate);
            Some(coordinate)
        }
        Err(e) => {
            log::warn!("GeoIP record for {} has unusable coordinates: {}", address, e);
            None
        }
    }
}
