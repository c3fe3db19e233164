//! Rotating, range-scaled moving-map overlay.
//!
//! The crate turns geodetic positions into pixels on three stacked square
//! layers (routes, free-standing geometry, icons) and repaints each layer only
//! when something it depends on changed. It draws through the
//! [`surface::DrawingContext`] trait, so the same code paints a browser canvas
//! (feature `web`) or a headless [`record::RecordingContext`] op log. The base
//! map underneath, the telemetry bus and image decoding belong to the host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`map`] | Host-facing [`map::MovingMap`]: intake, dirty diffing, frame rendering |
//! | [`viewport`] | Viewport state and geodetic-to-screen projection |
//! | [`geo`] | Great-circle distance, bearing and angle helpers |
//! | [`scheduler`] | Per-layer dirty flags and frame-request coalescing |
//! | [`surface`] | Drawing context trait and layer surface lifecycle |
//! | [`route`] | Route legs with filleted turns and upright labels |
//! | [`geometry`] | Straight and arc overlay paths |
//! | [`icon`] | Rotated icons with anchored labels |
//! | [`aircraft`] | Ownship icon driven by telemetry |
//! | [`assets`] | Icon image load state |
//! | [`config`] | Host configuration types and validation |
//! | [`record`] | Recording backend for tests and previews |
//! | [`consts`] | Shared constants (earth radius, defaults, telemetry names) |
//! | `web` | Browser canvas backend (feature `web`) |

pub mod aircraft;
pub mod assets;
pub mod config;
pub mod consts;
pub mod geo;
pub mod geometry;
pub mod icon;
pub mod map;
pub mod record;
pub mod route;
pub mod scheduler;
pub mod surface;
pub mod viewport;
#[cfg(feature = "web")]
pub mod web;

pub use config::{ConfigError, Drawable, MapConfig};
pub use map::{BaseMapParams, MovingMap};
pub use scheduler::Layer;
