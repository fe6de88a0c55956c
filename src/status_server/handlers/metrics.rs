//! Prometheus metrics handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt::Write;
use strum::IntoEnumIterator;

use super::super::types::StatusState;
use crate::geofence::ReasonCode;

/// Prometheus-compatible metrics endpoint
pub async fn metrics_handler(State(state): State<StatusState>) -> Response {
    (StatusCode::OK, render_metrics(&state)).into_response()
}

pub(crate) fn render_metrics(state: &StatusState) -> String {
    let stats = &state.stats;
    let counts = stats.snapshot();
    let mut metrics = format!(
        r#"# HELP geo_gate_uptime_seconds Seconds since the server started
# TYPE geo_gate_uptime_seconds gauge
geo_gate_uptime_seconds {}

# HELP geo_gate_radius_km Configured admission radius in kilometers
# TYPE geo_gate_radius_km gauge
geo_gate_radius_km {}

# HELP geo_gate_requests_total Admission decisions made
# TYPE geo_gate_requests_total counter
geo_gate_requests_total {}

# HELP geo_gate_requests_allowed_total Requests admitted
# TYPE geo_gate_requests_allowed_total counter
geo_gate_requests_allowed_total {}

# HELP geo_gate_requests_denied_total Requests denied
# TYPE geo_gate_requests_denied_total counter
geo_gate_requests_denied_total {}

# HELP geo_gate_resolver_timeouts_total Lookups abandoned after exceeding the time budget
# TYPE geo_gate_resolver_timeouts_total counter
geo_gate_resolver_timeouts_total {}

# HELP geo_gate_resolver_faults_total Lookups that failed or panicked inside the resolver
# TYPE geo_gate_resolver_faults_total counter
geo_gate_resolver_faults_total {}

# HELP geo_gate_decisions_total Admission decisions by reason
# TYPE geo_gate_decisions_total counter
"#,
        state.start_time.elapsed().as_secs_f64(),
        state.fence.radius_km(),
        counts.total(),
        counts.allowed(),
        counts.denied(),
        stats.resolver_timeouts(),
        stats.resolver_faults(),
    );

    for reason in ReasonCode::iter() {
        // Writing to a String cannot fail
        let _ = writeln!(
            metrics,
            "geo_gate_decisions_total{{reason=\"{}\"}} {}",
            reason.metric_label(),
            counts.get(reason)
        );
    }

    metrics
}
