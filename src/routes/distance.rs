//! Geodesic distance along a waypoint sequence.

use crate::routes::geometry::Waypoint;

/// Calculate the great-circle distance between two GPS points (Haversine formula).
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS: f64 = 6_371_000.0; // meters

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS * c
}

/// Total length of a waypoint sequence in meters.
///
/// Sums the haversine distance of consecutive pairs; sequences with fewer
/// than two points have length `0.0`.
pub fn path_length(points: &[Waypoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(pair[0].lat, pair[0].lng, pair[1].lat, pair[1].lng))
        .sum()
}
