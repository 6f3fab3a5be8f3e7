//! Great-circle distance.

use super::GeoPoint;

/// Equatorial earth radius used by the Google geometry library, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Haversine distance between two points on a sphere.
///
/// `radius` defaults to [`EARTH_RADIUS_METERS`]; the result is in the same
/// unit as the radius.
pub fn haversine_distance(from: GeoPoint, to: GeoPoint, radius: Option<f64>) -> f64 {
    let radius = radius.unwrap_or(EARTH_RADIUS_METERS);

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * radius * a.sqrt().asin()
}
