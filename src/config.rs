//! Host-facing configuration: the viewport inputs and the typed drawable list.
//!
//! The host replaces these values wholesale whenever upstream data (flight plan,
//! telemetry, styling) changes; the map never edits them in place. Everything is
//! validated when it is built, so renderers can assume well-formed input.
//! Route invariants are enforced by construction: a [`RouteDefinition`] can only
//! be created through [`RouteDefinition::new`] or deserialization, both of which
//! check the transition count.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PX, DEFAULT_RANGE_NM, DEFAULT_TEXT_FILL};
use crate::geo::GeoPoint;

/// Rejected configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `transitions.len()` must equal `legs.len() - 1` (zero for an empty route).
    #[error("route has {legs} legs but {transitions} transitions (expected {expected})")]
    TransitionCount { legs: usize, transitions: usize, expected: usize },
    #[error("range must be a positive number of nautical miles, got {0}")]
    InvalidRange(f64),
    #[error("non-finite coordinate in {0}")]
    NonFiniteCoordinate(&'static str),
    #[error("icon size must be positive, got {width}x{height}")]
    InvalidIconSize { width: f64, height: f64 },
    #[error("map rotation must be a finite number of degrees, got {0}")]
    InvalidRotation(f64),
    #[error("turn radius must be a non-negative number, got {0}")]
    InvalidRadius(f64),
    #[error("malformed map config: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================
// Routes
// =============================================================

/// A named route point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub ident: String,
    pub position: GeoPoint,
}

impl Waypoint {
    #[must_use]
    pub fn new(ident: impl Into<String>, position: GeoPoint) -> Self {
        Self { ident: ident.into(), position }
    }
}

/// One straight route leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub from: Waypoint,
    pub to: Waypoint,
}

impl Leg {
    #[must_use]
    pub fn new(from: Waypoint, to: Waypoint) -> Self {
        Self { from, to }
    }
}

/// Turn between two consecutive legs, flown on a circle of `radius` nautical miles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub radius: f64,
}

/// Validated legs and the transitions between them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawRouteDefinition")]
pub struct RouteDefinition {
    legs: Vec<Leg>,
    transitions: Vec<Transition>,
}

#[derive(Deserialize)]
struct RawRouteDefinition {
    #[serde(default)]
    legs: Vec<Leg>,
    #[serde(default)]
    transitions: Vec<Transition>,
}

impl TryFrom<RawRouteDefinition> for RouteDefinition {
    type Error = ConfigError;

    fn try_from(raw: RawRouteDefinition) -> Result<Self, Self::Error> {
        Self::new(raw.legs, raw.transitions)
    }
}

impl RouteDefinition {
    /// Build a route, rejecting a transition count other than `legs - 1`, negative
    /// radii and non-finite waypoint coordinates.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn new(legs: Vec<Leg>, transitions: Vec<Transition>) -> Result<Self, ConfigError> {
        let expected = legs.len().saturating_sub(1);
        if transitions.len() != expected {
            return Err(ConfigError::TransitionCount { legs: legs.len(), transitions: transitions.len(), expected });
        }
        if let Some(bad) = transitions.iter().find(|t| !(t.radius.is_finite() && t.radius >= 0.0)) {
            return Err(ConfigError::InvalidRadius(bad.radius));
        }
        if legs.iter().any(|leg| !(leg.from.position.is_finite() && leg.to.position.is_finite())) {
            return Err(ConfigError::NonFiniteCoordinate("route leg"));
        }
        Ok(Self { legs, transitions })
    }

    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}

/// Outlined line styling shared by routes and geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathStyle {
    pub stroke_width: f64,
    pub stroke_color: String,
    pub outline_width: f64,
    pub outline_color: String,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            stroke_color: "#ffffff".to_owned(),
            outline_width: 4.0,
            outline_color: "#000000".to_owned(),
        }
    }
}

/// Font for route waypoint labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelFont {
    pub font_family: String,
    pub font_size: f64,
    pub font_color: String,
}

impl Default for LabelFont {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size: DEFAULT_FONT_SIZE_PX,
            font_color: DEFAULT_TEXT_FILL.to_owned(),
        }
    }
}

impl LabelFont {
    /// CSS font shorthand, e.g. `"12px sans-serif"`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("{}px {}", self.font_size, self.font_family)
    }
}

/// A flight plan route drawn on the map layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(flatten)]
    pub route: RouteDefinition,
    #[serde(flatten)]
    pub style: PathStyle,
    #[serde(flatten)]
    pub font: LabelFont,
}

// =============================================================
// Geometry
// =============================================================

/// One piece of a free-standing overlay path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GeoPathSegment {
    Straight { start: GeoPoint, end: GeoPoint },
    /// Tangent arc of `radius` nautical miles through the corner at `control`.
    Arc { start: GeoPoint, control: GeoPoint, end: GeoPoint, radius: f64 },
}

impl GeoPathSegment {
    #[must_use]
    pub fn start(&self) -> GeoPoint {
        match self {
            Self::Straight { start, .. } | Self::Arc { start, .. } => *start,
        }
    }

    #[must_use]
    pub fn end(&self) -> GeoPoint {
        match self {
            Self::Straight { end, .. } | Self::Arc { end, .. } => *end,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Straight { start, end } => {
                if !(start.is_finite() && end.is_finite()) {
                    return Err(ConfigError::NonFiniteCoordinate("geometry segment"));
                }
            }
            Self::Arc { start, control, end, radius } => {
                if !(start.is_finite() && control.is_finite() && end.is_finite()) {
                    return Err(ConfigError::NonFiniteCoordinate("geometry arc"));
                }
                if !(radius.is_finite() && *radius >= 0.0) {
                    return Err(ConfigError::InvalidRadius(*radius));
                }
            }
        }
        Ok(())
    }
}

/// Overlay paths drawn on the geometry layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryConfig {
    #[serde(default)]
    pub paths: Vec<GeoPathSegment>,
    #[serde(flatten)]
    pub style: PathStyle,
}

// =============================================================
// Icons
// =============================================================

/// Side of the icon a label is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Top,
    Left,
    Bottom,
    #[default]
    Right,
}

/// A single rotatable icon with an optional label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconConfig {
    pub position: GeoPoint,
    pub icon_asset: String,
    pub width: f64,
    pub height: f64,
    /// Clockwise, degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Repaint on position changes too. Geostationary icons leave this off.
    #[serde(default)]
    pub moving: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_position: Option<TextAnchor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl IconConfig {
    #[must_use]
    pub fn new(position: GeoPoint, icon_asset: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            position,
            icon_asset: icon_asset.into(),
            width,
            height,
            rotation: 0.0,
            moving: false,
            text: None,
            text_fill: None,
            text_position: None,
            font_family: None,
            font_size: None,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>, anchor: TextAnchor) -> Self {
        self.text = Some(text.into());
        self.text_position = Some(anchor);
        self
    }

    #[must_use]
    pub fn anchor(&self) -> TextAnchor {
        self.text_position.unwrap_or_default()
    }

    /// CSS font shorthand for the label.
    #[must_use]
    pub fn font(&self) -> String {
        let size = self.font_size.unwrap_or(DEFAULT_FONT_SIZE_PX);
        let family = self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY);
        format!("{size}px {family}")
    }

    #[must_use]
    pub fn text_fill(&self) -> &str {
        self.text_fill.as_deref().unwrap_or(DEFAULT_TEXT_FILL)
    }

    /// Whether replacing `self` with `next` has to repaint the icon layer.
    ///
    /// Everything except `position` always counts; `position` only counts for
    /// moving icons.
    #[must_use]
    pub fn needs_repaint(&self, next: &IconConfig) -> bool {
        let same_style = self.icon_asset == next.icon_asset
            && self.width == next.width
            && self.height == next.height
            && self.rotation == next.rotation
            && self.moving == next.moving
            && self.text == next.text
            && self.text_fill == next.text_fill
            && self.text_position == next.text_position
            && self.font_family == next.font_family
            && self.font_size == next.font_size;
        !same_style || (next.moving && self.position != next.position)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.position.is_finite() {
            return Err(ConfigError::NonFiniteCoordinate("icon position"));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::InvalidIconSize { width: self.width, height: self.height });
        }
        Ok(())
    }
}

// =============================================================
// Map
// =============================================================

/// Anything the map can draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Drawable {
    Route(RouteConfig),
    Icon(IconConfig),
    Geometry(GeometryConfig),
}

impl Drawable {
    /// # Errors
    ///
    /// Returns the first invalid value found in the drawable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            // Routes are checked on construction.
            Self::Route(_) => Ok(()),
            Self::Icon(icon) => icon.validate(),
            Self::Geometry(geometry) => geometry.paths.iter().try_for_each(GeoPathSegment::validate),
        }
    }
}

/// Where the host's base-map provider reads its tiles from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseMapSource {
    pub config_folder: String,
    pub map_id: String,
}

/// Complete view configuration supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub center: GeoPoint,
    #[serde(default = "default_range")]
    pub range: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_map: Option<BaseMapSource>,
    #[serde(default)]
    pub drawables: Vec<Drawable>,
}

fn default_range() -> f64 {
    DEFAULT_RANGE_NM
}

impl MapConfig {
    #[must_use]
    pub fn new(center: GeoPoint) -> Self {
        Self { center, range: DEFAULT_RANGE_NM, rotation: 0.0, base_map: None, drawables: Vec::new() }
    }

    /// Parse and validate a JSON map configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON (including a route whose
    /// transition count is wrong) and the matching variant for invalid values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_range(self.range)?;
        validate_center(self.center)?;
        validate_rotation(self.rotation)?;
        self.drawables.iter().try_for_each(Drawable::validate)
    }
}

/// # Errors
///
/// Returns [`ConfigError::InvalidRange`] for zero, negative or non-finite ranges.
pub fn validate_range(range: f64) -> Result<(), ConfigError> {
    if range.is_finite() && range > 0.0 { Ok(()) } else { Err(ConfigError::InvalidRange(range)) }
}

/// # Errors
///
/// Returns [`ConfigError::NonFiniteCoordinate`] if either coordinate is NaN or infinite.
pub fn validate_center(center: GeoPoint) -> Result<(), ConfigError> {
    if center.is_finite() { Ok(()) } else { Err(ConfigError::NonFiniteCoordinate("map center")) }
}

/// # Errors
///
/// Returns [`ConfigError::InvalidRotation`] for NaN or infinite rotations.
pub fn validate_rotation(rotation: f64) -> Result<(), ConfigError> {
    if rotation.is_finite() { Ok(()) } else { Err(ConfigError::InvalidRotation(rotation)) }
}
