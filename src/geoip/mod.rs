//! Location resolvers.
//!
//! This module provides the [`LocationResolver`](crate::geofence::LocationResolver)
//! implementations used by the gateway:
//! - [`MaxMindResolver`]: MaxMind GeoLite2-City database lookups
//! - [`StaticResolver`]: a fixed table of addresses, loadable from JSON

mod address;
mod loader;
mod lookup;
mod metadata;
mod static_table;
mod types;

// Re-export public API
pub use address::parse_client_ip;
pub use lookup::MaxMindResolver;
pub use static_table::StaticResolver;
pub use types::{GeoIpMetadata, GeoIpResult};
