//! Admission middleware.
//!
//! Runs the gateway once per request, before any handler. Denied requests are
//! answered with a generic 403; the reason code and distance only reach the
//! server log and the statistics counters.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::client_addr::client_address;
use super::AppState;
use crate::error_handling::{AdmissionStats, ResolveError};
use crate::geofence::{candidate_address, decide, AdmissionDecision, Gateway};

/// Admits or rejects a request based on the client's location.
pub async fn admit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let raw_address = client_address(request.headers(), peer, state.trust_proxy);

    let (address, decision) = evaluate_within_budget(
        Arc::clone(&state.gateway),
        &state.stats,
        raw_address,
        state.resolver_timeout,
    )
    .await;
    state.stats.record(&decision);

    if decision.allowed() {
        log::debug!(
            "Admitted {} {} from {:?} ({:.1} km)",
            request.method(),
            request.uri().path(),
            address,
            decision.distance_km().unwrap_or_default()
        );
        return next.run(request).await;
    }

    match decision.distance_km() {
        Some(distance) => log::info!(
            "Denied {} {} from {:?}: {} ({:.1} km)",
            request.method(),
            request.uri().path(),
            address,
            decision.reason(),
            distance
        ),
        None => log::info!(
            "Denied {} {} from {:?}: {}",
            request.method(),
            request.uri().path(),
            address,
            decision.reason()
        ),
    }
    deny_response(&state.deny_message)
}

/// Runs the (possibly blocking) lookup on the blocking pool under a deadline.
///
/// Expiry, resolver errors and resolver panics all become
/// `UNRESOLVABLE_LOCATION`. On expiry the blocking task is left to finish in
/// the background; its result is dropped.
async fn evaluate_within_budget(
    gateway: Arc<Gateway>,
    stats: &AdmissionStats,
    raw_address: String,
    budget: Duration,
) -> (String, AdmissionDecision) {
    let fallback_address = candidate_address(&raw_address).to_string();
    let task = tokio::task::spawn_blocking(move || {
        gateway
            .try_locate(&raw_address)
            .map(|location| {
                let decision = decide(&location, gateway.config());
                (location.address, decision)
            })
    });

    match tokio::time::timeout(budget, task).await {
        Ok(Ok(Ok(evaluated))) => evaluated,
        Ok(Ok(Err(resolve_error))) => {
            log::warn!(
                "Location resolver failed for {:?}: {}",
                fallback_address,
                resolve_error
            );
            stats.record_fault();
            (fallback_address, AdmissionDecision::unresolvable())
        }
        Ok(Err(join_error)) => {
            log::warn!(
                "Location resolver crashed for {:?}: {}",
                fallback_address,
                join_error
            );
            stats.record_fault();
            (fallback_address, AdmissionDecision::unresolvable())
        }
        Err(_) => {
            log::warn!(
                "{} for {:?}",
                ResolveError::Timeout(budget),
                fallback_address
            );
            stats.record_timeout();
            (fallback_address, AdmissionDecision::unresolvable())
        }
    }
}

/// Uniform access-denied response.
fn deny_response(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8"),
            (CACHE_CONTROL, "no-store"),
        ],
        message.to_string(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geofence::{Coordinate, GeoFenceConfig, LocationResolver, ReasonCode};

    struct Fixed(Option<Coordinate>);

    impl LocationResolver for Fixed {
        fn resolve(&self, _address: &str) -> Result<Option<Coordinate>, ResolveError> {
            Ok(self.0)
        }
    }

    struct Sleepy;

    impl LocationResolver for Sleepy {
        fn resolve(&self, _address: &str) -> Result<Option<Coordinate>, ResolveError> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(Some(Coordinate::new(51.5074, -0.1278).unwrap()))
        }
    }

    struct Broken;

    impl LocationResolver for Broken {
        fn resolve(&self, _address: &str) -> Result<Option<Coordinate>, ResolveError> {
            Err(ResolveError::Lookup("corrupt record".to_string()))
        }
    }

    struct Panicky;

    impl LocationResolver for Panicky {
        fn resolve(&self, _address: &str) -> Result<Option<Coordinate>, ResolveError> {
            panic!("resolver blew up");
        }
    }

    fn gateway(resolver: impl LocationResolver + 'static) -> Arc<Gateway> {
        let fence = GeoFenceConfig::from_parts(51.5074, -0.1278, 50.0).unwrap();
        Arc::new(Gateway::new(fence, Arc::new(resolver)))
    }

    #[tokio::test]
    async fn test_evaluate_within_budget_admits() {
        let stats = AdmissionStats::new();
        let (address, decision) = evaluate_within_budget(
            gateway(Fixed(Some(Coordinate::new(51.5, -0.12).unwrap()))),
            &stats,
            "203.0.113.7, 10.0.0.1".to_string(),
            Duration::from_secs(1),
        )
        .await;
        assert_eq!(address, "203.0.113.7");
        assert!(decision.allowed());
        assert_eq!(stats.resolver_timeouts(), 0);
    }

    #[tokio::test]
    async fn test_evaluate_within_budget_times_out() {
        let stats = AdmissionStats::new();
        let (_, decision) = evaluate_within_budget(
            gateway(Sleepy),
            &stats,
            "203.0.113.7".to_string(),
            Duration::from_millis(20),
        )
        .await;
        assert!(!decision.allowed());
        assert_eq!(decision.reason(), ReasonCode::UnresolvableLocation);
        assert_eq!(stats.resolver_timeouts(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_within_budget_survives_panic() {
        let stats = AdmissionStats::new();
        let (_, decision) = evaluate_within_budget(
            gateway(Panicky),
            &stats,
            "203.0.113.7".to_string(),
            Duration::from_secs(1),
        )
        .await;
        assert_eq!(decision.reason(), ReasonCode::UnresolvableLocation);
        assert_eq!(stats.resolver_faults(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_within_budget_counts_resolver_error() {
        let stats = AdmissionStats::new();
        let (address, decision) = evaluate_within_budget(
            gateway(Broken),
            &stats,
            "203.0.113.7, 10.0.0.1".to_string(),
            Duration::from_secs(1),
        )
        .await;
        assert_eq!(address, "203.0.113.7");
        assert_eq!(decision.reason(), ReasonCode::UnresolvableLocation);
        assert_eq!(stats.resolver_faults(), 1);
        assert_eq!(stats.resolver_timeouts(), 0);
    }

    #[test]
    fn test_deny_response_is_generic() {
        let response = deny_response("Not here.");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            "no-store"
        );
    }
}
