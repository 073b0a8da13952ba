//! Great-circle distance helpers for service-area matching and waitlist
//! proximity scoring.

use serde::{Deserialize, Serialize};

/// Earth radius in miles, matching the unit service-area radii are stored in.
pub const EARTH_RADIUS_MILES: f64 = 3_959.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Where a customer is, as far as area matching cares: an optional postal
/// code and an optional geocoded point. Either side may be absent; the
/// geocoding collaborator can fail, and zip codes are user-entered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerLocation {
    pub zip_code: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl CustomerLocation {
    pub fn point(&self) -> Option<GeoPoint> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }
}

/// Haversine great-circle distance in miles.
///
/// Accurate to within round-off for the sub-few-hundred-mile distances a
/// mobile grooming route covers. Symmetric in its arguments, and zero for
/// identical points.
pub fn haversine_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_MILES * c
}
