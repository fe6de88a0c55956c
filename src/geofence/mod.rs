//! Geo-admission gateway.
//!
//! Decides, per request, whether a client's approximate location lies within
//! a radius of a configured reference point. Location lookup is delegated to
//! an injected [`LocationResolver`]; everything else is pure computation over
//! immutable configuration.

mod address;
mod coordinate;
mod decision;
mod distance;
mod fence;
mod gateway;
mod resolver;

// Re-export public API
pub use address::{candidate_address, ClientLocation};
pub use coordinate::Coordinate;
pub use decision::{AdmissionDecision, ReasonCode};
pub use distance::{haversine_km, EARTH_RADIUS_KM};
pub use fence::GeoFenceConfig;
pub use gateway::{decide, evaluate, locate, try_locate, Gateway};
pub use resolver::LocationResolver;
