//! Geodesy on a sphere: distance, initial bearing and the direct problem.
//!
//! The maths is `geo`'s haversine measure, run on a sphere of radius
//! [`EARTH_RADIUS_NM`] so every distance in and out is in nautical miles. A
//! sphere is accurate to a fraction of a pixel at moving-map scales, which is
//! all the projector needs.

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use geo::algorithm::line_measures::metric_spaces::HaversineMeasure;
use geo::{Bearing, Destination, Distance, Point};
use serde::{Deserialize, Serialize};

use crate::consts::EARTH_RADIUS_NM;

/// A geodetic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(p: Point<f64>) -> Self {
        GeoPoint { lat: p.y(), lon: normalize_lon(p.x()) }
    }
}

fn sphere() -> HaversineMeasure {
    HaversineMeasure::new(EARTH_RADIUS_NM)
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Great-circle distance to `other` in nautical miles.
    #[must_use]
    pub fn distance_nm(&self, other: &GeoPoint) -> f64 {
        sphere().distance(Point::from(*self), Point::from(*other))
    }

    /// Initial great-circle bearing to `other` in degrees, `0..360`, clockwise from north.
    ///
    /// Coincident points yield `0.0`.
    #[must_use]
    pub fn initial_bearing_deg(&self, other: &GeoPoint) -> f64 {
        normalize_deg(sphere().bearing(Point::from(*self), Point::from(*other)))
    }

    /// Point reached by travelling `distance_nm` along the great circle that leaves
    /// `self` on `bearing_deg`.
    #[must_use]
    pub fn destination(&self, bearing_deg: f64, distance_nm: f64) -> GeoPoint {
        sphere().destination(Point::from(*self), bearing_deg, distance_nm).into()
    }
}

/// Convert a compass bearing (0° = north, clockwise) into a mathematical angle in
/// radians (0 = +x, counter-clockwise).
#[must_use]
pub fn bearing_to_rad(bearing_deg: f64) -> f64 {
    normalize_deg(450.0 - bearing_deg).to_radians()
}

/// Degrees to radians.
#[must_use]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn normalize_deg(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

fn normalize_lon(lon: f64) -> f64 {
    (lon + 540.0).rem_euclid(360.0) - 180.0
}
