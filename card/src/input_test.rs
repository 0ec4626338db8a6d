use super::*;

// =============================================================
// InputMode
// =============================================================

#[test]
fn input_mode_default_is_surface() {
    assert_eq!(InputMode::default(), InputMode::Surface);
}

// =============================================================
// TouchEvent
// =============================================================

#[test]
fn touch_active_count() {
    let two = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
    assert_eq!(TouchEvent::Start { touches: two.clone() }.active_count(), 2);
    assert_eq!(TouchEvent::Move { touches: two }.active_count(), 2);
    assert_eq!(TouchEvent::End { remaining: 1 }.active_count(), 1);
}

#[test]
fn pinch_distance_needs_two_touches() {
    assert_eq!(pinch_distance(&[]), None);
    assert_eq!(pinch_distance(&[Point::new(1.0, 1.0)]), None);
}

#[test]
fn pinch_distance_uses_first_two_touches() {
    let touches = [Point::new(0.0, 0.0), Point::new(30.0, 40.0), Point::new(500.0, 500.0)];
    assert_eq!(pinch_distance(&touches), Some(50.0));
}

// =============================================================
// InputEvent
// =============================================================

#[test]
fn from_impls_wrap_variants() {
    assert_eq!(InputEvent::from(PointerEvent::Click), InputEvent::Pointer(PointerEvent::Click));
    assert_eq!(
        InputEvent::from(TouchEvent::End { remaining: 0 }),
        InputEvent::Touch(TouchEvent::End { remaining: 0 })
    );
    assert_eq!(
        InputEvent::from(ControllerEvent::SelectEnd { controller: 3 }),
        InputEvent::Controller(ControllerEvent::SelectEnd { controller: 3 })
    );
}

// =============================================================
// Session / Hold
// =============================================================

#[test]
fn session_default_is_idle() {
    assert_eq!(Session::default(), Session::Idle);
}

#[test]
fn hold_default_is_free() {
    let hold = Hold::default();
    assert!(!hold.is_held());
    assert_eq!(hold.holder(), None);
}

#[test]
fn held_by_reports_holder() {
    let hold = Hold::HeldBy {
        controller: 7,
        offset: Vec3::default(),
        start_grip: Vec3::default(),
        grip: Vec3::default(),
        since_ms: 0.0,
    };
    assert!(hold.is_held());
    assert_eq!(hold.holder(), Some(7));
}
