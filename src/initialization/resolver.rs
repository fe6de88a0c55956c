//! Location resolver initialization.

use std::sync::Arc;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::geofence::LocationResolver;
use crate::geoip::{MaxMindResolver, StaticResolver};

/// Builds the location resolver selected by the configuration.
///
/// A GeoIP database takes precedence over a locations table. At least one
/// must be configured: running without a resolver would deny every request.
///
/// # Errors
///
/// Returns `InitializationError::NoResolverConfigured` when neither source is
/// set, or `InitializationError::ResolverError` when loading fails.
pub async fn init_location_resolver(
    config: &Config,
) -> Result<Arc<dyn LocationResolver>, InitializationError> {
    if let Some(path) = &config.geoip {
        if config.locations.is_some() {
            log::warn!("Both --geoip and --locations given; using the GeoIP database");
        }
        let resolver = MaxMindResolver::open(path)
            .await
            .map_err(|e| InitializationError::ResolverError(format!("{:#}", e)))?;
        return Ok(Arc::new(resolver));
    }

    if let Some(path) = &config.locations {
        let resolver = StaticResolver::load(path)
            .await
            .map_err(|e| InitializationError::ResolverError(format!("{:#}", e)))?;
        if resolver.is_empty() {
            log::warn!(
                "Locations table {} is empty; every request will be denied",
                path.display()
            );
        }
        return Ok(Arc::new(resolver));
    }

    Err(InitializationError::NoResolverConfigured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_location_resolver_requires_source() {
        let result = init_location_resolver(&Config::default()).await;
        assert!(matches!(
            result,
            Err(InitializationError::NoResolverConfigured)
        ));
    }

    #[tokio::test]
    async fn test_init_location_resolver_from_locations_table() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("locations.json");
        tokio::fs::write(&path, r#"{"198.51.100.1": [51.5, -0.12]}"#)
            .await
            .expect("Failed to write locations file");

        let config = Config {
            locations: Some(path),
            ..Default::default()
        };
        let resolver = init_location_resolver(&config).await.unwrap();
        assert!(resolver.resolve("198.51.100.1").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_init_location_resolver_bad_geoip_path() {
        let config = Config {
            geoip: Some(PathBuf::from("nonexistent/GeoLite2-City.mmdb")),
            ..Default::default()
        };
        let result = init_location_resolver(&config).await;
        match result {
            Err(InitializationError::ResolverError(message)) => {
                assert!(message.contains("nonexistent"), "got: {}", message)
            }
            other => panic!("Expected ResolverError, got {:?}", other.map(|_| ())),
        }
    }
}
