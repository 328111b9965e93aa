use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, the conventional Haversine constant.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two coordinates in meters.
///
/// Haversine formulation; accurate to roughly 0.5%, which is more than enough
/// for geofence radii in the tens of meters. Total over all float inputs:
/// NaN coordinates propagate as NaN rather than erroring, so callers must
/// guard nullable coordinates before calling.
pub fn distance_meters(from: GeoPoint, to: GeoPoint) -> f64 {
    let from_lat = from.lat.to_radians();
    let to_lat = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + from_lat.cos() * to_lat.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
