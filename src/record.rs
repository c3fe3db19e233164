//! Headless backend that records every drawing call.
//!
//! `RecordingContext` keeps a canvas-style state stack (transform, styles, font)
//! and appends a [`DrawOp`] per visible call with coordinates already mapped to
//! layer pixels. Two identical op logs rasterize identically, which makes the log
//! a faithful stand-in for pixels in tests and in server-side previews.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use crate::surface::{DrawingContext, SurfaceError, TextAlign, TextBaseline};

/// 2D affine transform in canvas `(a, b, c, d, e, f)` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    #[must_use]
    pub fn translated(self, x: f64, y: f64) -> Self {
        Self { e: self.e + self.a * x + self.c * y, f: self.f + self.b * x + self.d * y, ..self }
    }

    #[must_use]
    pub fn rotated(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: self.a * cos + self.c * sin,
            b: self.b * cos + self.d * sin,
            c: self.c * cos - self.a * sin,
            d: self.d * cos - self.b * sin,
            ..self
        }
    }

    /// Map a local point into layer pixels.
    #[must_use]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }

    /// Net rotation in degrees, `(-180, 180]`.
    #[must_use]
    pub fn rotation_deg(&self) -> f64 {
        self.b.atan2(self.a).to_degrees()
    }
}

/// One recorded drawing call, in layer pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ArcTo { x1: f64, y1: f64, x2: f64, y2: f64, radius: f64 },
    Stroke { width: f64, color: String },
    FillText {
        text: String,
        x: f64,
        y: f64,
        rotation_deg: f64,
        font: String,
        fill: String,
        align: TextAlign,
        baseline: TextBaseline,
    },
    DrawImage { image: String, x: f64, y: f64, width: f64, height: f64, rotation_deg: f64 },
}

#[derive(Debug, Clone)]
struct State {
    transform: Transform,
    line_width: f64,
    stroke_style: String,
    fill_style: String,
    font: String,
    align: TextAlign,
    baseline: TextBaseline,
}

impl Default for State {
    fn default() -> Self {
        // Canvas 2D defaults.
        Self {
            transform: Transform::IDENTITY,
            line_width: 1.0,
            stroke_style: "#000000".to_owned(),
            fill_style: "#000000".to_owned(),
            font: "10px sans-serif".to_owned(),
            align: TextAlign::Left,
            baseline: TextBaseline::Bottom,
        }
    }
}

/// Recording [`DrawingContext`]. Images are identified by name.
#[derive(Debug, Default)]
pub struct RecordingContext {
    ops: Vec<DrawOp>,
    state: State,
    stack: Vec<State>,
    failing: bool,
}

impl RecordingContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose fallible calls all return [`SurfaceError::Backend`].
    #[must_use]
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    /// Every op recorded so far.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the op log.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// The current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    /// Depth of the save/restore stack.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// Recorded text draws, in call order.
    pub fn texts(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::FillText { .. }))
    }

    fn check(&self, call: &str) -> Result<(), SurfaceError> {
        if self.failing { Err(SurfaceError::Backend(format!("{call} rejected"))) } else { Ok(()) }
    }

    fn point(&self, x: f64, y: f64) -> (f64, f64) {
        self.state.transform.apply(x, y)
    }
}

impl DrawingContext for RecordingContext {
    type Image = String;

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.check("translate")?;
        self.state.transform = self.state.transform.translated(x, y);
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> Result<(), SurfaceError> {
        self.check("rotate")?;
        self.state.transform = self.state.transform.rotated(radians);
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::Clear { x, y, width, height });
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let (x, y) = self.point(x, y);
        self.ops.push(DrawOp::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let (x, y) = self.point(x, y);
        self.ops.push(DrawOp::LineTo { x, y });
    }

    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), SurfaceError> {
        self.check("arc_to")?;
        if radius < 0.0 {
            return Err(SurfaceError::Backend(format!("negative arc radius {radius}")));
        }
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        self.ops.push(DrawOp::ArcTo { x1, y1, x2, y2, radius });
        Ok(())
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke { width: self.state.line_width, color: self.state.stroke_style.clone() });
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_stroke_style(&mut self, color: &str) {
        color.clone_into(&mut self.state.stroke_style);
    }

    fn set_fill_style(&mut self, color: &str) {
        color.clone_into(&mut self.state.fill_style);
    }

    fn set_font(&mut self, font: &str) {
        font.clone_into(&mut self.state.font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.check("fill_text")?;
        let (px, py) = self.point(x, y);
        self.ops.push(DrawOp::FillText {
            text: text.to_owned(),
            x: px,
            y: py,
            rotation_deg: self.state.transform.rotation_deg(),
            font: self.state.font.clone(),
            fill: self.state.fill_style.clone(),
            align: self.state.align,
            baseline: self.state.baseline,
        });
        Ok(())
    }

    fn draw_image(&mut self, image: &String, x: f64, y: f64, width: f64, height: f64) -> Result<(), SurfaceError> {
        self.check("draw_image")?;
        let (px, py) = self.point(x, y);
        self.ops.push(DrawOp::DrawImage {
            image: image.clone(),
            x: px,
            y: py,
            width,
            height,
            rotation_deg: self.state.transform.rotation_deg(),
        });
        Ok(())
    }
}
