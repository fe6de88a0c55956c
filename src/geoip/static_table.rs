//! Fixed address-to-coordinate table resolver.
//!
//! Useful for development, staging environments without a GeoIP license,
//! and tests. The table can be built in code or loaded from a JSON file of
//! the form `{"203.0.113.7": [51.5074, -0.1278]}`.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::net::IpAddr;
use std::path::Path;

use super::address::parse_client_ip;
use crate::error_handling::ResolveError;
use crate::geofence::{Coordinate, LocationResolver};

/// Resolver backed by an in-memory table of exact IP addresses.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    entries: HashMap<IpAddr, Coordinate>,
    source: String,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            source: String::from("in-memory table"),
        }
    }

    /// Adds an entry, replacing any previous coordinate for the same IP.
    pub fn with_entry(mut self, ip: IpAddr, coordinate: Coordinate) -> Self {
        self.entries.insert(ip, coordinate);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a JSON table.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a key is not an IP address,
    /// or a coordinate is out of range.
    pub fn from_json_str(json: &str, source: &str) -> Result<Self> {
        let raw: HashMap<String, (f64, f64)> = serde_json::from_str(json)
            .with_context(|| format!("Failed to parse locations table from {}", source))?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (address, (latitude, longitude)) in raw {
            let ip = parse_client_ip(&address).with_context(|| {
                format!("Invalid IP address {:?} in locations table {}", address, source)
            })?;
            let coordinate = Coordinate::new(latitude, longitude).with_context(|| {
                format!("Invalid coordinate for {} in locations table {}", address, source)
            })?;
            entries.insert(ip, coordinate);
        }

        Ok(Self {
            entries,
            source: source.to_string(),
        })
    }

    /// Loads a JSON table from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        log::info!("Loading locations table from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read locations table from {}", path.display()))?;
        let resolver = Self::from_json_str(&content, &path.display().to_string())?;
        log::info!("Loaded {} location entries", resolver.len());
        Ok(resolver)
    }
}

impl LocationResolver for StaticResolver {
    fn resolve(&self, address: &str) -> Result<Option<Coordinate>, ResolveError> {
        Ok(parse_client_ip(address).and_then(|ip| self.entries.get(&ip).copied()))
    }

    fn source(&self) -> String {
        format!("static table {} ({} entries)", self.source, self.entries.len())
    }
}
