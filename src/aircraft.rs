//! Ownship symbol driven by live telemetry.

#[cfg(test)]
#[path = "aircraft_test.rs"]
mod aircraft_test;

use tracing::debug;

use crate::config::IconConfig;
use crate::consts::{UNIT_DEGREES, VAR_PLANE_HEADING_TRUE, VAR_PLANE_LATITUDE, VAR_PLANE_LONGITUDE};
use crate::geo::GeoPoint;

/// Live simulation variables, sampled once per tick.
pub trait TelemetrySource {
    /// Latest value of `variable` in `unit`, if the bus has one.
    fn sample(&self, variable: &str, unit: &str) -> Option<f64>;
}

/// An icon whose position and heading follow the aircraft.
///
/// Always treated as moving. Until both latitude and longitude have been
/// received at least once, on the same tick or not, the tracker has no fix and
/// is not drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftTracker {
    icon: IconConfig,
    lat_seen: bool,
    lon_seen: bool,
}

impl AircraftTracker {
    /// Track with the given symbol. `position` and `rotation` are overwritten by telemetry.
    #[must_use]
    pub fn new(icon: IconConfig) -> Self {
        Self { icon: IconConfig { moving: true, ..icon }, lat_seen: false, lon_seen: false }
    }

    #[must_use]
    pub fn icon(&self) -> &IconConfig {
        &self.icon
    }

    #[must_use]
    pub fn has_fix(&self) -> bool {
        self.lat_seen && self.lon_seen
    }

    /// Pull heading, latitude and longitude from `source`.
    ///
    /// Missing samples keep their previous value. Returns `true` when the drawn
    /// symbol changed and the icon layer needs a repaint.
    pub fn tick(&mut self, source: &dyn TelemetrySource) -> bool {
        let lat = source.sample(VAR_PLANE_LATITUDE, UNIT_DEGREES).filter(|v| v.is_finite());
        let lon = source.sample(VAR_PLANE_LONGITUDE, UNIT_DEGREES).filter(|v| v.is_finite());
        let heading = source.sample(VAR_PLANE_HEADING_TRUE, UNIT_DEGREES).filter(|v| v.is_finite());

        let mut next = self.icon.clone();
        if let Some(lat) = lat {
            next.position.lat = lat;
        }
        if let Some(lon) = lon {
            next.position.lon = lon;
        }
        if let Some(heading) = heading {
            next.rotation = heading;
        }

        let had_fix = self.has_fix();
        self.lat_seen |= lat.is_some();
        self.lon_seen |= lon.is_some();
        let changed = if had_fix {
            self.icon.needs_repaint(&next)
        } else if self.has_fix() {
            debug!(lat = next.position.lat, lon = next.position.lon, "ownship fix acquired");
            true
        } else {
            false
        };
        self.icon = next;
        changed
    }

    /// Current ownship position, once a fix exists.
    #[must_use]
    pub fn position(&self) -> Option<GeoPoint> {
        self.has_fix().then_some(self.icon.position)
    }
}
