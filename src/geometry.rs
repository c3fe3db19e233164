//! Free-standing overlay paths (airspace edges, holding patterns, ...).

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::config::{GeoPathSegment, GeometryConfig};
use crate::route::stroke_outlined;
use crate::surface::{DrawingContext, SurfaceError};
use crate::viewport::ViewportState;

/// Draw every segment of `config` as one outlined path on the geometry layer.
///
/// Each segment starts a new sub-path at its own start point. No paths, no calls.
///
/// # Errors
///
/// Returns `Err` if the backend rejects a call.
pub fn draw_geometry<C: DrawingContext>(
    ctx: &mut C,
    config: &GeometryConfig,
    viewport: &ViewportState,
) -> Result<(), SurfaceError> {
    if config.paths.is_empty() {
        return Ok(());
    }

    ctx.begin_path();
    for segment in &config.paths {
        let start = viewport.project(segment.start());
        let end = viewport.project(segment.end());
        ctx.move_to(start.x, start.y);
        if let GeoPathSegment::Arc { control, radius, .. } = segment {
            let control = viewport.project(*control);
            ctx.arc_to(control.x, control.y, end.x, end.y, viewport.distance_to_px(*radius))?;
        }
        ctx.line_to(end.x, end.y);
    }

    stroke_outlined(ctx, &config.style);
    Ok(())
}
