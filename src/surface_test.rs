#![allow(clippy::float_cmp)]

use super::*;
use crate::record::{DrawOp, RecordingContext};

#[test]
fn new_surface_is_uninitialized() {
    let mut surface: LayerSurface<RecordingContext> = LayerSurface::new(Layer::Map);
    assert!(!surface.is_ready());
    assert!(surface.acquire().is_none());
    assert_eq!(surface.layer(), Layer::Map);
}

#[test]
fn with_context_is_noop_without_context() {
    let mut surface: LayerSurface<RecordingContext> = LayerSurface::new(Layer::Icons);
    let mut called = false;
    let result = surface.with_context(|_, _| called = true);
    assert!(result.is_none());
    assert!(!called);
}

#[test]
fn with_context_runs_once_when_ready() {
    let mut surface = LayerSurface::new(Layer::Icons);
    surface.attach(RecordingContext::new(), 640.0);
    let mut calls = 0;
    let size = surface.with_context(|ctx, size| {
        calls += 1;
        ctx.begin_path();
        size
    });
    assert_eq!(calls, 1);
    assert_eq!(size, Some(640.0));
    assert_eq!(surface.acquire().map(|c| c.ops().to_vec()), Some(vec![DrawOp::BeginPath]));
}

#[test]
fn detach_returns_context_and_resets_state() {
    let mut surface = LayerSurface::new(Layer::Geometry);
    surface.attach(RecordingContext::new(), 100.0);
    assert!(surface.is_ready());
    assert!(surface.detach().is_some());
    assert!(!surface.is_ready());
    assert!(surface.detach().is_none());
}

#[test]
fn resize_updates_size_seen_by_closure() {
    let mut surface = LayerSurface::new(Layer::Map);
    surface.attach(RecordingContext::new(), 100.0);
    surface.resize(250.0);
    assert_eq!(surface.size(), 250.0);
    assert_eq!(surface.with_context(|_, size| size), Some(250.0));
}

#[test]
fn text_keywords_match_canvas_names() {
    assert_eq!(TextAlign::Right.as_str(), "right");
    assert_eq!(TextBaseline::Middle.as_str(), "middle");
}
