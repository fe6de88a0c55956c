//! GeoIP database loading from files.

use anyhow::{Context, Result};
use maxminddb::Reader;
use std::path::Path;

use crate::config::MAX_GEOIP_DATABASE_SIZE;
use crate::geoip::metadata::extract_metadata;
use crate::geoip::types::GeoIpMetadata;

/// Loads a GeoIP database from a local file path
pub(crate) async fn load_from_file(path: &Path) -> Result<(Reader<Vec<u8>>, GeoIpMetadata)> {
    log::info!("Loading GeoIP database from: {}", path.display());

    let size = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to read GeoIP database from {}", path.display()))?
        .len();
    if size > MAX_GEOIP_DATABASE_SIZE {
        anyhow::bail!(
            "GeoIP database {} is {} bytes, exceeds limit of {} bytes",
            path.display(),
            size,
            MAX_GEOIP_DATABASE_SIZE
        );
    }

    let db_bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read GeoIP database from {}", path.display()))?;

    load_from_bytes(db_bytes, &path.display().to_string())
}

/// Parses an in-memory GeoIP database
pub(crate) fn load_from_bytes(
    db_bytes: Vec<u8>,
    source: &str,
) -> Result<(Reader<Vec<u8>>, GeoIpMetadata)> {
    let reader = Reader::from_source(db_bytes)
        .with_context(|| format!("Failed to parse GeoIP database from {}", source))?;
    let metadata = extract_metadata(&reader, source);
    Ok((reader, metadata))
}
