//! Icon rendering: a rotatable image centred on a projected position, with an
//! optional label attached to one of its sides.
//!
//! Unlike route labels, icon labels live in the icon's own rotated frame and turn
//! together with their symbol.

#[cfg(test)]
#[path = "icon_test.rs"]
mod icon_test;

use crate::config::{IconConfig, TextAnchor};
use crate::geo::deg_to_rad;
use crate::surface::{DrawingContext, SurfaceError, TextAlign, TextBaseline, with_saved_state};
use crate::viewport::ViewportState;

/// Where a label sits relative to the icon's top-left corner, in the icon frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Label placement for an icon of `width` x `height` pixels.
#[must_use]
pub fn label_placement(anchor: TextAnchor, width: f64, height: f64) -> LabelPlacement {
    match anchor {
        TextAnchor::Top => LabelPlacement {
            align: TextAlign::Center,
            baseline: TextBaseline::Bottom,
            offset_x: height / 2.0,
            offset_y: 0.0,
        },
        TextAnchor::Left => LabelPlacement {
            align: TextAlign::Right,
            baseline: TextBaseline::Middle,
            offset_x: -width / 4.0,
            offset_y: height / 2.0,
        },
        TextAnchor::Bottom => LabelPlacement {
            align: TextAlign::Center,
            baseline: TextBaseline::Top,
            offset_x: height / 2.0,
            offset_y: 0.75 * width,
        },
        TextAnchor::Right => LabelPlacement {
            align: TextAlign::Left,
            baseline: TextBaseline::Middle,
            offset_x: 1.25 * width,
            offset_y: height / 2.0,
        },
    }
}

/// Draw one icon onto the icon layer.
///
/// `image` is `None` until the asset has loaded (or for good, if loading failed);
/// the label is drawn either way.
///
/// # Errors
///
/// Returns `Err` if the backend rejects a call. The context state is restored
/// regardless.
pub fn draw_icon<C: DrawingContext>(
    ctx: &mut C,
    icon: &IconConfig,
    image: Option<&C::Image>,
    viewport: &ViewportState,
) -> Result<(), SurfaceError> {
    let at = viewport.project(icon.position);

    with_saved_state(ctx, |ctx| {
        ctx.translate(at.x, at.y)?;
        ctx.rotate(deg_to_rad(icon.rotation))?;
        ctx.translate(-icon.width / 2.0, -icon.height / 2.0)?;

        if let Some(image) = image {
            ctx.draw_image(image, 0.0, 0.0, icon.width, icon.height)?;
        }

        let Some(text) = icon.text.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(());
        };
        let placement = label_placement(icon.anchor(), icon.width, icon.height);
        ctx.set_font(&icon.font());
        ctx.set_fill_style(icon.text_fill());
        ctx.set_text_align(placement.align);
        ctx.set_text_baseline(placement.baseline);
        ctx.fill_text(text, placement.offset_x, placement.offset_y)
    })
}
