//! Client address extraction.

use serde::Serialize;

use super::coordinate::Coordinate;

/// Picks the candidate client address out of a raw address string.
///
/// The raw value may be a comma-separated forwarding chain, in which case the
/// leftmost non-empty entry is the original client. Whitespace around entries
/// is ignored. Empty input yields an empty candidate.
pub fn candidate_address(raw: &str) -> &str {
    raw.split(',')
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
}

/// Approximate location of a client, derived fresh for every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientLocation {
    /// Candidate address that was resolved (may be empty)
    pub address: String,
    /// Resolved coordinate, if any
    pub coordinate: Option<Coordinate>,
}
