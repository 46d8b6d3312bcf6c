use xray_viewer::{
    Geometry, GestureEvent, Point, Size, Viewport, ViewerConfig, ViewportState, ZoomLimits,
};

const EPSILON: f32 = 1e-3;

fn assert_within_pan_bound(state: &ViewportState, geometry: &Geometry) {
    let max = geometry.max_pan(state.scale);
    assert!(
        state.offset.x.abs() <= max.x + EPSILON && state.offset.y.abs() <= max.y + EPSILON,
        "offset {:?} exceeds bound {:?} at scale {}",
        state.offset,
        max,
        state.scale
    );
}

fn assert_scale_in_limits(state: &ViewportState, limits: ZoomLimits) {
    assert!(state.scale >= limits.min() && state.scale <= limits.max());
    assert!(state.scale.is_finite() && state.offset.is_finite());
}

/// A fixed gesture script mixing wheel zoom at many cursor positions with drags.
fn gesture_script() -> Vec<GestureEvent> {
    let mut events = Vec::new();
    for i in 0..40 {
        let t = i as f32;
        events.push(GestureEvent::Wheel {
            position: Point::new((t * 37.0) % 320.0, (t * 53.0) % 240.0),
            delta: if i % 3 == 0 { -1.0 } else { 1.0 },
        });
        if i % 5 == 0 {
            events.push(GestureEvent::DragStart {
                position: Point::new(100.0, 100.0),
            });
            events.push(GestureEvent::DragMove {
                position: Point::new(100.0 + t * 15.0, 100.0 - t * 9.0),
            });
            events.push(GestureEvent::DragMove {
                position: Point::new(100.0 - t * 21.0, 100.0 + t * 4.0),
            });
            events.push(GestureEvent::DragEnd);
        }
        if i % 7 == 0 {
            events.push(GestureEvent::ZoomOut);
        }
        if i % 11 == 0 {
            events.push(GestureEvent::ZoomIn);
        }
    }
    events
}

#[test]
fn invariants_hold_after_every_gesture() {
    let geometries = [
        Geometry::new(Size::new(320.0, 240.0), Size::new(800.0, 600.0)),
        Geometry::new(Size::new(320.0, 240.0), Size::new(100.0, 900.0)),
        Geometry::new(Size::new(320.0, 240.0), Size::new(50.0, 40.0)),
    ];

    for geometry in geometries {
        let mut viewport = Viewport::default();
        let limits = viewport.config().limits();
        for event in gesture_script() {
            let state = viewport.handle(event, &geometry);
            assert_scale_in_limits(&state, limits);
            assert_within_pan_bound(&state, &geometry);
        }
    }
}

#[test]
fn wheel_zoom_keeps_point_under_cursor() {
    let geometry = Geometry::new(Size::new(200.0, 200.0), Size::new(200.0, 200.0));
    let anchor = Point::new(50.0, 50.0);
    let before = ViewportState::default();
    let image_point = before.container_to_image(anchor, &geometry).unwrap();

    let after = before.zoom_by(0.5, Some(anchor), &geometry, ZoomLimits::default());
    let mapped = after.image_to_container(image_point, &geometry).unwrap();

    assert!((mapped.x - anchor.x).abs() < EPSILON);
    assert!((mapped.y - anchor.y).abs() < EPSILON);
}

#[test]
fn drag_on_zoomed_image_stays_within_bound() {
    let geometry = Geometry::new(Size::new(150.0, 150.0), Size::new(300.0, 300.0));
    let zoomed = ViewportState {
        scale: 2.0,
        ..Default::default()
    };
    // (300 * 2 - 150) / 2
    assert_eq!(geometry.max_pan(2.0), Point::new(225.0, 225.0));

    let state = zoomed
        .begin_drag(Point::new(100.0, 100.0), &geometry)
        .continue_drag(Point::new(120.0, 90.0), &geometry);
    assert_within_pan_bound(&state, &geometry);
    assert_eq!(state.offset, Point::new(20.0, -10.0));

    let state = state.continue_drag(Point::new(900.0, -900.0), &geometry);
    assert_eq!(state.offset, Point::new(225.0, -225.0));

    let state = state.end_drag().continue_drag(Point::new(0.0, 0.0), &geometry);
    assert_eq!(state.offset, Point::new(225.0, -225.0));
}

#[test]
fn reset_from_any_state_is_identity() {
    let geometry = Geometry::new(Size::new(320.0, 240.0), Size::new(800.0, 600.0));
    let mut viewport = Viewport::default();
    for event in gesture_script() {
        viewport.handle(event, &geometry);
        let reset = viewport.state().reset();
        assert_eq!(reset.scale, 1.0);
        assert_eq!(reset.offset, Point::ZERO);
        assert!(!reset.is_dragging);
    }
}

#[test]
fn gestures_before_image_loads_are_ignored() {
    let unloaded = Geometry::new(Size::new(320.0, 240.0), Size::default());
    let mut viewport = Viewport::default();
    let state = viewport.replay(&gesture_script(), &unloaded);
    assert_eq!(state, ViewportState::default());
}

#[test]
fn events_deserialize_from_tagged_json() {
    let json = r#"[
        {"type": "zoomIn"},
        {"type": "wheel", "payload": {"position": {"x": 10.0, "y": 20.0}, "delta": -3.0}},
        {"type": "dragStart", "payload": {"position": {"x": 1.0, "y": 2.0}}},
        {"type": "dragMove", "payload": {"position": {"x": 4.0, "y": 6.0}}},
        {"type": "dragEnd"},
        {"type": "reset"}
    ]"#;

    let events: Vec<GestureEvent> = serde_json::from_str(json).unwrap();
    assert_eq!(events.len(), 6);
    assert_eq!(events[0], GestureEvent::ZoomIn);
    assert_eq!(
        events[1],
        GestureEvent::Wheel {
            position: Point::new(10.0, 20.0),
            delta: -3.0
        }
    );

    let geometry = Geometry::new(Size::new(100.0, 100.0), Size::new(400.0, 400.0));
    let mut viewport = Viewport::new(ViewerConfig::default());
    let state = viewport.replay(&events, &geometry);
    assert_eq!(state, ViewportState::default());
}

#[test]
fn window_resize_keeps_pan_bound() {
    let narrow = Geometry::new(Size::new(150.0, 150.0), Size::new(300.0, 300.0));
    let wide = Geometry::new(Size::new(1000.0, 1000.0), Size::new(300.0, 300.0));

    let mut viewport = Viewport::default();
    let script = [
        GestureEvent::ZoomIn,
        GestureEvent::ZoomIn,
        GestureEvent::ZoomIn,
        GestureEvent::ZoomIn,
        GestureEvent::ZoomIn,
        GestureEvent::ZoomIn,
        GestureEvent::ZoomIn,
        GestureEvent::ZoomIn,
        GestureEvent::DragStart {
            position: Point::new(0.0, 0.0),
        },
        GestureEvent::DragMove {
            position: Point::new(2000.0, 2000.0),
        },
        GestureEvent::DragEnd,
    ];
    let state = viewport.replay(&script, &narrow);
    assert_eq!(state.scale, 3.0);
    assert_eq!(state.offset, Point::new(375.0, 375.0));

    // Zooming at the limit after the container grows must still honor the new bound
    let state = viewport.handle(GestureEvent::ZoomIn, &wide);
    assert_within_pan_bound(&state, &wide);

    let rect = state.image_rect(&wide).unwrap();
    assert_eq!(rect.min, Point::new(50.0, 50.0));
    assert_eq!(rect.max, Point::new(950.0, 950.0));
}
