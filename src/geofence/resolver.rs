//! Location resolution capability.

use super::coordinate::Coordinate;
use crate::error_handling::ResolveError;

/// Maps a client address to an approximate coordinate.
///
/// `Ok(None)` is the normal answer for unknown, private or malformed
/// addresses. `Err` is reserved for faults inside the resolver itself; the
/// gateway treats both the same way (deny).
pub trait LocationResolver: Send + Sync {
    fn resolve(&self, address: &str) -> Result<Option<Coordinate>, ResolveError>;

    /// Short description of the data source, used in startup logs.
    fn source(&self) -> String {
        String::from("unnamed resolver")
    }
}
