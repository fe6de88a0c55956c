//! JSON status handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::super::types::{RequestCounts, ResolverHealth, StatusResponse, StatusState};

/// JSON status endpoint with admission counters
pub async fn status_handler(State(state): State<StatusState>) -> Response {
    let json = match serde_json::to_string_pretty(&build_status(&state)) {
        Ok(json) => json,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize status: {}", e),
            )
                .into_response();
        }
    };

    (StatusCode::OK, [("content-type", "application/json")], json).into_response()
}

pub(crate) fn build_status(state: &StatusState) -> StatusResponse {
    let stats = &state.stats;
    let counts = stats.snapshot();
    StatusResponse {
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        resolver: state.resolver_source.clone(),
        fence: state.fence,
        requests: RequestCounts {
            total: counts.total(),
            allowed: counts.allowed(),
            denied: counts.denied(),
            within_range: counts.within_range,
            out_of_range: counts.out_of_range,
            unresolvable_location: counts.unresolvable_location,
        },
        resolver_health: ResolverHealth {
            timeouts: stats.resolver_timeouts(),
            faults: stats.resolver_faults(),
        },
    }
}
