//! Admission evaluation.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use super::address::{candidate_address, ClientLocation};
use super::decision::AdmissionDecision;
use super::distance::haversine_km;
use super::fence::GeoFenceConfig;
use super::resolver::LocationResolver;
use crate::error_handling::ResolveError;

/// Evaluates a raw client address against a fence.
///
/// Never panics on malformed input and never propagates resolver faults:
/// every failure to obtain a coordinate is an `UNRESOLVABLE_LOCATION` deny.
pub fn evaluate(
    raw_address: &str,
    config: &GeoFenceConfig,
    resolver: &dyn LocationResolver,
) -> AdmissionDecision {
    let location = locate(raw_address, resolver);
    decide(&location, config)
}

/// Resolves the candidate address of `raw_address` to a location.
///
/// Resolver errors and panics are logged at `warn` and leave the coordinate
/// empty.
pub fn locate(raw_address: &str, resolver: &dyn LocationResolver) -> ClientLocation {
    try_locate(raw_address, resolver).unwrap_or_else(|e| {
        let address = candidate_address(raw_address);
        log::warn!("Location resolver failed for {}: {}", address, e);
        ClientLocation {
            address: address.to_string(),
            coordinate: None,
        }
    })
}

/// Like [`locate`], but reports resolver faults instead of folding them.
///
/// A panic inside the resolver is caught and returned as
/// `ResolveError::Panicked`. An empty candidate never reaches the resolver.
///
/// # Errors
///
/// Returns the resolver's error, or `ResolveError::Panicked` if it panicked.
pub fn try_locate(
    raw_address: &str,
    resolver: &dyn LocationResolver,
) -> Result<ClientLocation, ResolveError> {
    let address = candidate_address(raw_address);
    let coordinate = if address.is_empty() {
        None
    } else {
        std::panic::catch_unwind(AssertUnwindSafe(|| resolver.resolve(address)))
            .map_err(|payload| ResolveError::Panicked(panic_message(payload.as_ref())))??
    };
    Ok(ClientLocation {
        address: address.to_string(),
        coordinate,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("non-string panic payload")
    }
}

/// Decides admission for an already resolved location.
pub fn decide(location: &ClientLocation, config: &GeoFenceConfig) -> AdmissionDecision {
    match location.coordinate {
        None => AdmissionDecision::unresolvable(),
        Some(coordinate) => {
            let distance = haversine_km(coordinate, config.center());
            AdmissionDecision::from_distance(distance, config.radius_km())
        }
    }
}

/// A fence paired with the resolver used to locate clients.
///
/// Cheap to clone and safe to share across request tasks; it holds no
/// mutable state.
#[derive(Clone)]
pub struct Gateway {
    config: GeoFenceConfig,
    resolver: Arc<dyn LocationResolver>,
}

impl Gateway {
    pub fn new(config: GeoFenceConfig, resolver: Arc<dyn LocationResolver>) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &GeoFenceConfig {
        &self.config
    }

    pub fn resolver_source(&self) -> String {
        self.resolver.source()
    }

    pub fn locate(&self, raw_address: &str) -> ClientLocation {
        locate(raw_address, self.resolver.as_ref())
    }

    pub fn try_locate(&self, raw_address: &str) -> Result<ClientLocation, ResolveError> {
        try_locate(raw_address, self.resolver.as_ref())
    }

    pub fn evaluate(&self, raw_address: &str) -> AdmissionDecision {
        evaluate(raw_address, &self.config, self.resolver.as_ref())
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("config", &self.config)
            .field("resolver", &self.resolver.source())
            .finish()
    }
}
