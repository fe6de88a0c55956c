//! Status server data structures.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::error_handling::AdmissionStats;
use crate::geofence::GeoFenceConfig;

/// Shared state for the status server
#[derive(Clone)]
pub struct StatusState {
    pub stats: Arc<AdmissionStats>,
    pub start_time: Arc<Instant>,
    pub fence: GeoFenceConfig,
    pub resolver_source: String,
}

/// JSON response for `/status` endpoint
#[derive(Serialize)]
pub struct StatusResponse {
    pub uptime_seconds: f64,
    pub resolver: String,
    pub fence: GeoFenceConfig,
    pub requests: RequestCounts,
    pub resolver_health: ResolverHealth,
}

#[derive(Serialize)]
pub struct RequestCounts {
    pub total: usize,
    pub allowed: usize,
    pub denied: usize,
    pub within_range: usize,
    pub out_of_range: usize,
    pub unresolvable_location: usize,
}

#[derive(Serialize)]
pub struct ResolverHealth {
    pub timeouts: usize,
    pub faults: usize,
}
