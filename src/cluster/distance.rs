use std::f64::consts::PI;

/// Coefficient to translate from degrees to radians
pub const DEGREE_RAD: f64 = PI / 180.0;

/// Earth radius in kilometers
pub const EARTH_R: f64 = 6371.0;

use super::point::LatLng;

/// Calculates spherical (equirectangular) distance between two points
///
/// Exact along a meridian and along a parallel, which is all the compass
/// ever measures.
///
/// # Returns
///
/// Distance in kilometers
pub fn distance_spherical(p1: &LatLng, p2: &LatLng) -> f64 {
    let v1 = (p1.lat - p2.lat) * DEGREE_RAD;
    let v1 = v1 * v1;

    let v2 = (p1.lng - p2.lng) * DEGREE_RAD * ((p1.lat + p2.lat) / 2.0 * DEGREE_RAD).cos();
    let v2 = v2 * v2;

    EARTH_R * (v1 + v2).sqrt()
}

/// Distance from `from` to `to` moving along the latitude axis only
///
/// Measured between `from` and the point sharing `from`'s longitude and
/// `to`'s latitude.
pub fn lat_leg(from: &LatLng, to: &LatLng) -> f64 {
    distance_spherical(from, &LatLng::new(to.lat, from.lng))
}

/// Distance from `from` to `to` moving along the longitude axis only
///
/// Measured between `from` and the point sharing `from`'s latitude and
/// `to`'s longitude.
pub fn lng_leg(from: &LatLng, to: &LatLng) -> f64 {
    distance_spherical(from, &LatLng::new(from.lat, to.lng))
}
