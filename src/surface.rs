//! Drawing surfaces: the 2D context abstraction and the layer that owns one.
//!
//! [`DrawingContext`] mirrors the subset of the HTML canvas 2D API the renderers
//! need. Backends implement it for a concrete raster ([`crate::record`] for
//! headless use, `crate::web` for the browser). [`LayerSurface`] owns at most one
//! context and only lends it out inside [`LayerSurface::with_context`], so a
//! renderer can never keep drawing into a surface that has been torn down.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use tracing::info;

use crate::scheduler::Layer;

/// Error raised by a backend drawing call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    /// The backend rejected the call (e.g. a detached canvas or a bad transform).
    #[error("drawing call failed: {0}")]
    Backend(String),
    /// The backend could not produce a 2D context for its raster.
    #[error("2d context unavailable")]
    ContextUnavailable,
}

/// Horizontal text alignment relative to the draw point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Canvas keyword for this alignment.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Vertical text alignment relative to the draw point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

impl TextBaseline {
    /// Canvas keyword for this baseline.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

/// The 2D drawing operations used by the renderers.
///
/// Angles are in radians, coordinates in layer pixels. Calls that a backend can
/// reject return [`SurfaceError`]; state setters are infallible.
pub trait DrawingContext {
    /// Decoded image type this backend can blit.
    type Image;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError>;
    fn rotate(&mut self, radians: f64) -> Result<(), SurfaceError>;
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Straight line from the current point towards `(x1, y1)`, then a circular arc
    /// of `radius` tangent to both `current → (x1, y1)` and `(x1, y1) → (x2, y2)`.
    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), SurfaceError>;
    fn stroke(&mut self);

    fn set_line_width(&mut self, width: f64);
    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError>;

    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64, width: f64, height: f64)
    -> Result<(), SurfaceError>;

    /// Match the backing raster to `size` x `size` pixels. Backends without a
    /// raster of their own ignore it.
    fn resize_raster(&mut self, _size: f64) {}
}

/// Run `f` between `save` and `restore`, restoring even when `f` fails.
///
/// # Errors
///
/// Returns whatever `f` returns.
pub fn with_saved_state<C: DrawingContext, R>(
    ctx: &mut C,
    f: impl FnOnce(&mut C) -> Result<R, SurfaceError>,
) -> Result<R, SurfaceError> {
    ctx.save();
    let result = f(ctx);
    ctx.restore();
    result
}

/// One independently clearable raster and its drawing context.
///
/// Starts uninitialized; [`attach`](Self::attach) binds a context and
/// [`detach`](Self::detach) releases it again on teardown.
pub struct LayerSurface<C> {
    layer: Layer,
    context: Option<C>,
    size: f64,
}

impl<C: DrawingContext> LayerSurface<C> {
    #[must_use]
    pub fn new(layer: Layer) -> Self {
        Self { layer, context: None, size: 0.0 }
    }

    #[must_use]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Edge length of the square raster in pixels.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.context.is_some()
    }

    /// Bind a context. Any previously bound context is dropped.
    pub fn attach(&mut self, mut context: C, size: f64) {
        info!(layer = ?self.layer, size, "layer surface attached");
        context.resize_raster(size);
        self.context = Some(context);
        self.size = size;
    }

    /// Release the context, returning the surface to the uninitialized state.
    pub fn detach(&mut self) -> Option<C> {
        if self.context.is_some() {
            info!(layer = ?self.layer, "layer surface detached");
        }
        self.context.take()
    }

    /// Update the raster edge length after a container resize.
    pub fn resize(&mut self, size: f64) {
        if let Some(ctx) = self.context.as_mut() {
            ctx.resize_raster(size);
        }
        self.size = size;
    }

    /// Borrow the context, if one is bound.
    pub fn acquire(&mut self) -> Option<&mut C> {
        self.context.as_mut()
    }

    /// Run `f` against the bound context and raster size.
    ///
    /// Silent no-op returning `None` while the surface is uninitialized.
    pub fn with_context<R>(&mut self, f: impl FnOnce(&mut C, f64) -> R) -> Option<R> {
        let size = self.size;
        self.context.as_mut().map(|ctx| f(ctx, size))
    }
}
