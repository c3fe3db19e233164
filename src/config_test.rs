#![allow(clippy::float_cmp)]

use super::*;

fn wp(ident: &str, lat: f64, lon: f64) -> Waypoint {
    Waypoint::new(ident, GeoPoint::new(lat, lon))
}

fn three_legs() -> Vec<Leg> {
    vec![
        Leg::new(wp("LSZH", 47.46, 8.55), wp("KLO", 47.46, 8.75)),
        Leg::new(wp("KLO", 47.46, 8.75), wp("TRA", 47.69, 8.44)),
        Leg::new(wp("TRA", 47.69, 8.44), wp("ZUE", 47.59, 8.82)),
    ]
}

// --- RouteDefinition ---

#[test]
fn route_accepts_one_transition_per_boundary() {
    let route = RouteDefinition::new(three_legs(), vec![Transition { radius: 1.0 }, Transition { radius: 2.0 }]).unwrap();
    assert_eq!(route.legs().len(), 3);
    assert_eq!(route.transitions().len(), 2);
    assert!(!route.is_empty());
}

#[test]
fn route_rejects_too_many_transitions() {
    let err = RouteDefinition::new(three_legs(), vec![Transition { radius: 1.0 }; 3]).unwrap_err();
    assert!(matches!(err, ConfigError::TransitionCount { legs: 3, transitions: 3, expected: 2 }));
}

#[test]
fn route_rejects_too_few_transitions() {
    let err = RouteDefinition::new(three_legs(), vec![]).unwrap_err();
    assert!(matches!(err, ConfigError::TransitionCount { expected: 2, .. }));
}

#[test]
fn empty_route_needs_no_transitions() {
    let route = RouteDefinition::new(vec![], vec![]).unwrap();
    assert!(route.is_empty());
    assert!(RouteDefinition::new(vec![], vec![Transition { radius: 1.0 }]).is_err());
}

#[test]
fn route_rejects_negative_radius() {
    let err = RouteDefinition::new(three_legs(), vec![Transition { radius: 1.0 }, Transition { radius: -0.5 }])
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRadius(r) if r == -0.5));
}

#[test]
fn route_rejects_non_finite_waypoint() {
    let legs = vec![Leg::new(wp("A", f64::NAN, 0.0), wp("B", 1.0, 1.0))];
    assert!(matches!(RouteDefinition::new(legs, vec![]), Err(ConfigError::NonFiniteCoordinate(_))));
}

// --- IconConfig ---

#[test]
fn icon_defaults() {
    let icon = IconConfig::new(GeoPoint::new(1.0, 2.0), "ownship.png", 32.0, 32.0);
    assert_eq!(icon.anchor(), TextAnchor::Right);
    assert_eq!(icon.font(), "12px sans-serif");
    assert_eq!(icon.text_fill(), "white");
    assert!(!icon.moving);
}

#[test]
fn rotation_change_needs_repaint() {
    let icon = IconConfig::new(GeoPoint::new(1.0, 2.0), "a.png", 32.0, 32.0);
    let next = IconConfig { rotation: 45.0, ..icon.clone() };
    assert!(icon.needs_repaint(&next));
}

#[test]
fn static_icon_ignores_position_change() {
    let icon = IconConfig::new(GeoPoint::new(1.0, 2.0), "a.png", 32.0, 32.0);
    let next = IconConfig { position: GeoPoint::new(1.1, 2.0), ..icon.clone() };
    assert!(!icon.needs_repaint(&next));
}

#[test]
fn moving_icon_repaints_on_position_change() {
    let icon = IconConfig { moving: true, ..IconConfig::new(GeoPoint::new(1.0, 2.0), "a.png", 32.0, 32.0) };
    let next = IconConfig { position: GeoPoint::new(1.1, 2.0), ..icon.clone() };
    assert!(icon.needs_repaint(&next));
    assert!(!icon.needs_repaint(&icon.clone()));
}

#[test]
fn label_change_needs_repaint() {
    let icon = IconConfig::new(GeoPoint::new(1.0, 2.0), "a.png", 32.0, 32.0);
    let next = icon.clone().with_text("N123", TextAnchor::Top);
    assert!(icon.needs_repaint(&next));
}

#[test]
fn icon_with_zero_size_is_invalid() {
    let icon = Drawable::Icon(IconConfig::new(GeoPoint::new(1.0, 2.0), "a.png", 0.0, 32.0));
    assert!(matches!(icon.validate(), Err(ConfigError::InvalidIconSize { .. })));
}

// --- Geometry ---

#[test]
fn geometry_rejects_negative_arc_radius() {
    let p = GeoPoint::new(0.0, 0.0);
    let geometry =
        Drawable::Geometry(GeometryConfig { paths: vec![GeoPathSegment::Arc { start: p, control: p, end: p, radius: -1.0 }], ..Default::default() });
    assert!(matches!(geometry.validate(), Err(ConfigError::InvalidRadius(_))));
}

#[test]
fn segment_endpoints() {
    let a = GeoPoint::new(0.0, 0.0);
    let b = GeoPoint::new(1.0, 1.0);
    let seg = GeoPathSegment::Arc { start: a, control: b, end: b, radius: 1.0 };
    assert_eq!(seg.start(), a);
    assert_eq!(seg.end(), b);
}

// --- MapConfig ---

#[test]
fn map_config_parses_every_drawable_kind() {
    let json = r##"{
        "center": { "lat": 47.36, "lon": 8.55 },
        "range": 40,
        "rotation": 90,
        "baseMap": { "configFolder": "bing", "mapId": "nd-left" },
        "drawables": [
            {
                "kind": "route",
                "legs": [
                    { "from": { "ident": "A", "position": { "lat": 47.0, "lon": 8.0 } },
                      "to":   { "ident": "B", "position": { "lat": 47.5, "lon": 8.5 } } },
                    { "from": { "ident": "B", "position": { "lat": 47.5, "lon": 8.5 } },
                      "to":   { "ident": "C", "position": { "lat": 47.5, "lon": 9.0 } } }
                ],
                "transitions": [ { "radius": 1.5 } ],
                "strokeWidth": 3,
                "strokeColor": "#ff00ff",
                "fontSize": 14
            },
            {
                "kind": "icon",
                "position": { "lat": 47.4, "lon": 8.6 },
                "iconAsset": "vor.png",
                "width": 24,
                "height": 24,
                "text": "KLO",
                "textPosition": "bottom"
            },
            {
                "kind": "geometry",
                "paths": [
                    { "type": "straight", "start": { "lat": 47.0, "lon": 8.0 }, "end": { "lat": 47.1, "lon": 8.1 } }
                ],
                "outlineColor": "#111111"
            }
        ]
    }"##;

    let config = MapConfig::from_json(json).unwrap();
    assert_eq!(config.range, 40.0);
    assert_eq!(config.rotation, 90.0);
    assert_eq!(config.base_map.as_ref().map(|b| b.map_id.as_str()), Some("nd-left"));
    assert_eq!(config.drawables.len(), 3);

    let Drawable::Route(route) = &config.drawables[0] else { panic!("expected route") };
    assert_eq!(route.route.legs().len(), 2);
    assert_eq!(route.route.transitions()[0].radius, 1.5);
    assert_eq!(route.style.stroke_width, 3.0);
    assert_eq!(route.style.stroke_color, "#ff00ff");
    assert_eq!(route.style.outline_width, PathStyle::default().outline_width);
    assert_eq!(route.font.css(), "14px sans-serif");

    let Drawable::Icon(icon) = &config.drawables[1] else { panic!("expected icon") };
    assert_eq!(icon.anchor(), TextAnchor::Bottom);
    assert_eq!(icon.text.as_deref(), Some("KLO"));

    let Drawable::Geometry(geometry) = &config.drawables[2] else { panic!("expected geometry") };
    assert_eq!(geometry.paths.len(), 1);
    assert_eq!(geometry.style.outline_color, "#111111");
}

#[test]
fn map_config_rejects_bad_transition_count_at_parse_time() {
    let json = r#"{
        "center": { "lat": 0, "lon": 0 },
        "drawables": [
            { "kind": "route",
              "legs": [ { "from": { "ident": "A", "position": { "lat": 0, "lon": 0 } },
                          "to":   { "ident": "B", "position": { "lat": 1, "lon": 1 } } } ],
              "transitions": [ { "radius": 1 } ] }
        ]
    }"#;
    let err = MapConfig::from_json(json).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().contains("transitions"));
}

#[test]
fn map_config_defaults_range() {
    let config = MapConfig::from_json(r#"{ "center": { "lat": 1, "lon": 2 } }"#).unwrap();
    assert_eq!(config.range, DEFAULT_RANGE_NM);
    assert!(config.drawables.is_empty());
}

#[test]
fn map_config_rejects_non_positive_range() {
    let err = MapConfig::from_json(r#"{ "center": { "lat": 1, "lon": 2 }, "range": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRange(_)));
    assert!(validate_range(-1.0).is_err());
    assert!(validate_range(f64::INFINITY).is_err());
}

#[test]
fn map_config_reports_rotation_and_center_separately() {
    let mut config = MapConfig::new(GeoPoint::new(1.0, 2.0));
    config.rotation = f64::NAN;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRotation(_))));

    config.rotation = 0.0;
    config.center.lon = f64::INFINITY;
    assert!(matches!(config.validate(), Err(ConfigError::NonFiniteCoordinate("map center"))));
}
