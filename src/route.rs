//! Route rendering: legs joined by tangent turn fillets, with upright labels.
//!
//! The path starts at the first leg's origin. Every boundary between two legs is
//! drawn with a single `arc_to` through the shared waypoint, which emits the
//! straight run up to the tangent point followed by a circular fillet of the
//! transition radius that leaves along the next leg. The last leg ends with a
//! plain `line_to`. Labels are counter-rotated against the viewport so they read
//! upright once the host rotates the map container.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use crate::config::{LabelFont, PathStyle, RouteConfig};
use crate::geo::deg_to_rad;
use crate::surface::{DrawingContext, SurfaceError, TextAlign, TextBaseline, with_saved_state};
use crate::viewport::{ScreenPoint, ViewportState};

/// Draw one route onto the map layer.
///
/// An empty route issues no drawing calls at all.
///
/// # Errors
///
/// Returns `Err` if the backend rejects a call.
pub fn draw_route<C: DrawingContext>(
    ctx: &mut C,
    config: &RouteConfig,
    viewport: &ViewportState,
) -> Result<(), SurfaceError> {
    let legs = config.route.legs();
    let Some(first) = legs.first() else {
        return Ok(());
    };

    let origin = viewport.project(first.from.position);
    let ends: Vec<ScreenPoint> = legs.iter().map(|leg| viewport.project(leg.to.position)).collect();

    ctx.begin_path();
    ctx.move_to(origin.x, origin.y);
    for (i, transition) in config.route.transitions().iter().enumerate() {
        let corner = ends[i];
        let next = ends[i + 1];
        ctx.arc_to(corner.x, corner.y, next.x, next.y, viewport.distance_to_px(transition.radius))?;
    }
    if let Some(last) = ends.last() {
        ctx.line_to(last.x, last.y);
    }

    stroke_outlined(ctx, &config.style);

    for (leg, at) in legs.iter().zip(&ends) {
        draw_upright_label(ctx, &leg.to.ident, *at, viewport.rotation, &config.font)?;
    }

    Ok(())
}

/// Stroke the current path twice: the wide outline underneath, the line on top.
pub(crate) fn stroke_outlined<C: DrawingContext>(ctx: &mut C, style: &PathStyle) {
    ctx.set_line_width(style.outline_width);
    ctx.set_stroke_style(&style.outline_color);
    ctx.stroke();
    ctx.set_line_width(style.stroke_width);
    ctx.set_stroke_style(&style.stroke_color);
    ctx.stroke();
}

fn draw_upright_label<C: DrawingContext>(
    ctx: &mut C,
    text: &str,
    at: ScreenPoint,
    map_rotation_deg: f64,
    font: &LabelFont,
) -> Result<(), SurfaceError> {
    if text.is_empty() {
        return Ok(());
    }
    with_saved_state(ctx, |ctx| {
        ctx.translate(at.x, at.y)?;
        ctx.rotate(deg_to_rad(-map_rotation_deg))?;
        ctx.set_font(&font.css());
        ctx.set_fill_style(&font.font_color);
        ctx.set_text_align(TextAlign::Left);
        ctx.set_text_baseline(TextBaseline::Bottom);
        ctx.fill_text(text, 0.0, 0.0)
    })
}
