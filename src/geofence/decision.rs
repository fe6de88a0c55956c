//! Admission decision types.

use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;

/// Why a request was admitted or denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIterMacro)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// No coordinate could be resolved (empty or malformed address, unknown
    /// address, or resolver fault)
    UnresolvableLocation,
    /// Resolved coordinate lies beyond the allowed radius
    OutOfRange,
    /// Resolved coordinate lies within the allowed radius
    WithinRange,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::UnresolvableLocation => "UNRESOLVABLE_LOCATION",
            ReasonCode::OutOfRange => "OUT_OF_RANGE",
            ReasonCode::WithinRange => "WITHIN_RANGE",
        }
    }

    /// Lowercase label used for metric names.
    pub fn metric_label(&self) -> &'static str {
        match self {
            ReasonCode::UnresolvableLocation => "unresolvable_location",
            ReasonCode::OutOfRange => "out_of_range",
            ReasonCode::WithinRange => "within_range",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating one request against the geo-fence.
///
/// `allowed` is true exactly when the reason is `WithinRange`; the only way
/// to build a decision is through the constructors below, which keep the two
/// in step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdmissionDecision {
    allowed: bool,
    reason: ReasonCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_km: Option<f64>,
}

impl AdmissionDecision {
    /// Deny because no coordinate was available.
    pub fn unresolvable() -> Self {
        Self {
            allowed: false,
            reason: ReasonCode::UnresolvableLocation,
            distance_km: None,
        }
    }

    /// Decide from a computed distance. The boundary is inclusive.
    pub fn from_distance(distance_km: f64, radius_km: f64) -> Self {
        let reason = if distance_km <= radius_km {
            ReasonCode::WithinRange
        } else {
            ReasonCode::OutOfRange
        };
        Self {
            allowed: reason == ReasonCode::WithinRange,
            reason,
            distance_km: Some(distance_km),
        }
    }

    pub fn allowed(&self) -> bool {
        self.allowed
    }

    pub fn reason(&self) -> ReasonCode {
        self.reason
    }

    /// Distance to the fence center, present whenever a coordinate resolved.
    pub fn distance_km(&self) -> Option<f64> {
        self.distance_km
    }
}
