//! Great-circle distance.

use super::coordinate::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Computes the great-circle distance between two coordinates using the
/// haversine formula.
///
/// The result is in kilometers and always `>= 0`.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let d_lat = (to.latitude() - from.latitude()).to_radians();
    let d_lon = (to.longitude() - from.longitude()).to_radians();

    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();
    // Rounding can push `a` slightly past 1 for antipodal points
    let a = (half_lat * half_lat + lat1.cos() * lat2.cos() * half_lon * half_lon).clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
