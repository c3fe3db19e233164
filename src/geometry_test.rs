#![allow(clippy::float_cmp)]

use super::*;
use crate::config::PathStyle;
use crate::geo::GeoPoint;
use crate::record::{DrawOp, RecordingContext};

const CENTER: GeoPoint = GeoPoint { lat: -33.95, lon: 151.18 };

fn viewport() -> ViewportState {
    ViewportState { center: CENTER, range: 10.0, rotation: 0.0, canvas_size: 400.0 }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn empty_paths_draw_nothing() {
    let mut ctx = RecordingContext::new();
    draw_geometry(&mut ctx, &GeometryConfig::default(), &viewport()).unwrap();
    assert!(ctx.ops().is_empty());
}

#[test]
fn straight_segment_is_move_then_line() {
    let config = GeometryConfig {
        paths: vec![GeoPathSegment::Straight { start: CENTER, end: CENTER.destination(270.0, 5.0) }],
        style: PathStyle::default(),
    };
    let mut ctx = RecordingContext::new();
    draw_geometry(&mut ctx, &config, &viewport()).unwrap();

    let ops = ctx.ops();
    assert_eq!(ops[0], DrawOp::BeginPath);
    assert_eq!(ops[1], DrawOp::MoveTo { x: 200.0, y: 200.0 });
    match &ops[2] {
        // 5 nm at 20 px/nm, due west.
        DrawOp::LineTo { x, y } => assert!(close(*x, 100.0) && close(*y, 200.0)),
        other => panic!("expected line_to, got {other:?}"),
    }
    assert_eq!(ops.iter().filter(|op| matches!(op, DrawOp::Stroke { .. })).count(), 2);
}

#[test]
fn arc_segment_fillets_through_control_point() {
    let control = CENTER.destination(0.0, 4.0);
    let config = GeometryConfig {
        paths: vec![GeoPathSegment::Arc {
            start: CENTER,
            control,
            end: control.destination(90.0, 4.0),
            radius: 1.5,
        }],
        style: PathStyle::default(),
    };
    let mut ctx = RecordingContext::new();
    draw_geometry(&mut ctx, &config, &viewport()).unwrap();

    match &ctx.ops()[2] {
        DrawOp::ArcTo { x1, y1, radius, .. } => {
            assert!(close(*x1, 200.0) && close(*y1, 120.0));
            assert_eq!(*radius, 30.0);
        }
        other => panic!("expected arc_to, got {other:?}"),
    }
    assert!(matches!(ctx.ops()[3], DrawOp::LineTo { .. }));
}

#[test]
fn each_segment_starts_its_own_sub_path() {
    let a = CENTER.destination(45.0, 2.0);
    let b = CENTER.destination(135.0, 2.0);
    let config = GeometryConfig {
        paths: vec![
            GeoPathSegment::Straight { start: CENTER, end: a },
            GeoPathSegment::Straight { start: CENTER, end: b },
        ],
        style: PathStyle::default(),
    };
    let mut ctx = RecordingContext::new();
    draw_geometry(&mut ctx, &config, &viewport()).unwrap();
    assert_eq!(ctx.ops().iter().filter(|op| matches!(op, DrawOp::MoveTo { .. })).count(), 2);
    assert_eq!(ctx.ops().iter().filter(|op| matches!(op, DrawOp::BeginPath)).count(), 1);
}
