use std::thread::sleep;
use std::time::Duration;

use super::*;

fn immersive_handle() -> CardHandle {
    let mut handle = CardHandle::new();
    handle.set_immersive(true);
    handle
}

fn position(handle: &CardHandle) -> Vec3 {
    Vec3::new(handle.position_x(), handle.position_y(), handle.position_z())
}

/// Grab with the target ray starting 1m in front of the card and the grip
/// 5cm below the ray origin, hold still, release.
fn stationary_grab(handle: &mut CardHandle) {
    assert!(handle.controller_select_start(1, 0.0, 1.0, -1.0, 0.0, 0.0, -1.0, 0.0, 0.95, -1.0));
    handle.controller_move(1, 0.0, 0.95, -1.0);
    handle.controller_select_end(1);
}

// =============================================================
// CardHandle: controller grabs
// =============================================================

#[test]
fn stationary_grab_leaves_card_in_place() {
    let mut handle = immersive_handle();
    let before = position(&handle);
    stationary_grab(&mut handle);
    assert!(position(&handle).sub(before).length() < 1e-9);
}

#[test]
fn two_quick_grabs_toggle_once() {
    let mut handle = immersive_handle();
    stationary_grab(&mut handle);
    assert!(!handle.is_open());

    sleep(Duration::from_millis(80));
    stationary_grab(&mut handle);
    assert!(handle.is_open());
}

#[test]
fn grab_follows_grip_not_ray_origin() {
    let mut handle = immersive_handle();
    handle.controller_select_start(1, 0.0, 1.0, -1.0, 0.0, 0.0, -1.0, 0.0, 0.95, -1.0);
    handle.controller_move(1, 0.2, 0.95, -1.0);
    let p = position(&handle);
    assert!((p.x - 0.2).abs() < 1e-9);
    assert!((p.y - 1.0).abs() < 1e-9);
    assert!((p.z + 2.0).abs() < 1e-9);
}

#[test]
fn surface_mode_ignores_controller_select() {
    let mut handle = CardHandle::new();
    assert!(!handle.controller_select_start(1, 0.0, 1.0, -1.0, 0.0, 0.0, -1.0, 0.0, 0.95, -1.0));
}
