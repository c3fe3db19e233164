//! Shared numeric constants and defaults for the moving map.

// ── Geodesy ─────────────────────────────────────────────────────

/// Mean Earth radius in nautical miles, used for haversine distances.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Distances below this are treated as coincident points (about 2 mm).
pub const COINCIDENT_EPSILON_NM: f64 = 1e-9;

// ── Viewport ────────────────────────────────────────────────────

/// Range shown when the host does not supply one, in nautical miles.
pub const DEFAULT_RANGE_NM: f64 = 80.0;

// ── Text ────────────────────────────────────────────────────────

/// Font family for icon labels without an explicit family.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Font size in pixels for icon labels without an explicit size.
pub const DEFAULT_FONT_SIZE_PX: f64 = 12.0;

/// Fill colour for icon labels without an explicit fill.
pub const DEFAULT_TEXT_FILL: &str = "white";

// ── Telemetry ───────────────────────────────────────────────────

/// Simulation variable carrying the ownship latitude.
pub const VAR_PLANE_LATITUDE: &str = "A:PLANE LATITUDE";

/// Simulation variable carrying the ownship longitude.
pub const VAR_PLANE_LONGITUDE: &str = "A:PLANE LONGITUDE";

/// Simulation variable carrying the ownship true heading.
pub const VAR_PLANE_HEADING_TRUE: &str = "A:PLANE HEADING DEGREES TRUE";

/// Unit requested for every ownship variable.
pub const UNIT_DEGREES: &str = "Degrees";
