#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::consts::{COINCIDENT_EPSILON_NM, DEFAULT_RANGE_NM};
use crate::geo::{GeoPoint, bearing_to_rad};

/// A point in layer pixel space, origin top-left, y down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The visible window onto the map.
///
/// `range` is in nautical miles and maps to a radius of `canvas_size / 2` pixels.
/// `rotation` is the map-to-screen rotation in degrees; layers are drawn in the
/// map frame and the host rotates the composited container, so projection ignores
/// it. Only route labels read it, to counter-rotate themselves.
/// `canvas_size` is the edge length of the square layers in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub center: GeoPoint,
    pub range: f64,
    pub rotation: f64,
    pub canvas_size: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self { center: GeoPoint::new(0.0, 0.0), range: DEFAULT_RANGE_NM, rotation: 0.0, canvas_size: 0.0 }
    }
}

impl ViewportState {
    /// Layer edge length for a host container of `width` x `height` pixels.
    ///
    /// The layers are as wide as the container diagonal so that rotating them by
    /// any angle still covers the container.
    #[must_use]
    pub fn fit_container(width: f64, height: f64) -> f64 {
        width.hypot(height)
    }

    /// Pixels per nautical mile at the current range and canvas size.
    #[must_use]
    pub fn pixels_per_nm(&self) -> f64 {
        if self.range <= 0.0 {
            return 0.0;
        }
        (self.canvas_size / 2.0) / self.range
    }

    /// Convert a distance in nautical miles to pixels.
    #[must_use]
    pub fn distance_to_px(&self, distance_nm: f64) -> f64 {
        distance_nm * self.pixels_per_nm()
    }

    /// The layer centre, where `self.center` projects to.
    #[must_use]
    pub fn canvas_center(&self) -> ScreenPoint {
        let half = self.canvas_size / 2.0;
        ScreenPoint::new(half, half)
    }

    /// Project a geodetic point into layer pixels.
    ///
    /// Coincident points have no bearing; they land exactly on the canvas centre,
    /// as do points with a non-finite coordinate.
    #[must_use]
    pub fn project(&self, point: GeoPoint) -> ScreenPoint {
        let center = self.canvas_center();
        if !(point.is_finite() && self.center.is_finite()) {
            return center;
        }
        let distance = self.center.distance_nm(&point);
        if !(distance.is_finite() && distance > COINCIDENT_EPSILON_NM) {
            return center;
        }

        let bearing = self.center.initial_bearing_deg(&point);
        let angle = if bearing.is_finite() { bearing_to_rad(bearing) } else { 0.0 };
        let offset = self.distance_to_px(distance);

        ScreenPoint { x: center.x + offset * angle.cos(), y: center.y - offset * angle.sin() }
    }
}
