mod common;

use common::*;
use glam::{Quat, Vec2, Vec3};
use place_core::*;

fn dragging_controller() -> DragController {
    let mut d = DragController::new(FOLLOW_BLEND);
    d.press();
    d
}

#[test]
fn press_and_release_drive_the_two_states() {
    assert_eq!(DragState::Idle.on_event(DragEvent::Press), DragState::Dragging);
    assert_eq!(DragState::Dragging.on_event(DragEvent::Press), DragState::Dragging);
    assert_eq!(DragState::Dragging.on_event(DragEvent::Release), DragState::Idle);
    assert_eq!(DragState::Idle.on_event(DragEvent::Release), DragState::Idle);
}

#[test]
fn idle_drag_writes_nothing() {
    let drag = DragController::new(FOLLOW_BLEND);
    let mut handle = placeholder_handle();
    let target = DragTarget {
        position: Vec3::new(1.0, 0.0, -2.0),
        orientation: Some(Quat::from_rotation_y(1.0)),
    };
    assert!(!drag.apply(&mut handle, Some(target)));
    assert_eq!(handle.position(), Vec3::ZERO);
    assert_eq!(handle.transform.rotation, Quat::IDENTITY);
}

#[test]
fn position_is_copied_and_orientation_blended() {
    let drag = dragging_controller();
    let mut handle = placeholder_handle();
    let target_rot = Quat::from_rotation_y(1.0);
    let target = DragTarget {
        position: Vec3::new(1.0, 0.0, -2.0),
        orientation: Some(target_rot),
    };
    assert!(drag.apply(&mut handle, Some(target)));
    assert_eq!(handle.position(), Vec3::new(1.0, 0.0, -2.0));
    // 80% of the way there, 20% of the angle left
    let remaining = handle.transform.rotation.angle_between(target_rot);
    assert!(approx(remaining, 0.2, 1e-4), "remaining {}", remaining);
}

#[test]
fn orientation_converges_geometrically() {
    let drag = dragging_controller();
    let mut handle = placeholder_handle();
    let target_rot = Quat::from_rotation_y(1.5);
    let target = DragTarget {
        position: Vec3::ZERO,
        orientation: Some(target_rot),
    };
    for _ in 0..5 {
        drag.apply(&mut handle, Some(target));
    }
    let remaining = handle.transform.rotation.angle_between(target_rot);
    assert!(approx(remaining, 1.5 * 0.2_f32.powi(5), 1e-3));
}

#[test]
fn locked_handle_never_moves_while_dragging() {
    let drag = dragging_controller();
    let mut handle = placeholder_handle();
    handle.transform.position = Vec3::new(0.2, 0.0, -0.7);
    handle.placement_locked = true;
    let before = handle.transform;
    for i in 0..50 {
        let target = DragTarget {
            position: Vec3::new(i as f32, 0.0, -2.0),
            orientation: Some(Quat::from_rotation_y(i as f32 * 0.1)),
        };
        assert!(!drag.apply(&mut handle, Some(target)));
    }
    assert_eq!(handle.transform, before);
}

#[test]
fn missing_target_leaves_handle_alone() {
    let drag = dragging_controller();
    let mut handle = placeholder_handle();
    handle.transform.position = Vec3::new(0.5, 0.0, 0.5);
    assert!(!drag.apply(&mut handle, None));
    assert_eq!(handle.position(), Vec3::new(0.5, 0.0, 0.5));
}

#[test]
fn floor_ray_hits_in_front_and_misses_when_parallel_or_behind() {
    let floor = FloorPlane::new(0.0);
    let down = Ray::new(Vec3::new(1.0, 2.0, 0.0), Vec3::new(0.0, -1.0, -1.0));
    let hit = floor.intersect(&down).unwrap();
    assert!(approx(hit.x, 1.0, 1e-5) && approx(hit.y, 0.0, 1e-5) && approx(hit.z, -2.0, 1e-5));

    let parallel = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(floor.intersect(&parallel), None);

    let up = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, -1.0));
    assert_eq!(floor.intersect(&up), None);
}

#[test]
fn floor_ray_target_has_no_orientation() {
    let floor = FloorPlane::new(0.0);
    let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
    let t = DragTarget::from_floor_ray(&floor, &ray).unwrap();
    assert_eq!(t.orientation, None);
    assert!(approx(t.position.y, 0.0, 1e-6));
}

#[test]
fn controller_pointing_down_and_forward_lands_on_floor() {
    // controller at head height tilted 45 degrees down
    let pose = Pose::new(
        Vec3::new(0.0, 1.0, 0.0),
        Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4),
    );
    let target = DragTarget::from_floor_ray(&FloorPlane::new(0.0), &pose.forward_ray()).unwrap();
    assert!(approx(target.position.x, 0.0, 1e-5));
    assert!(approx(target.position.z, -1.0, 1e-4));
}

#[test]
fn cursor_at_screen_centre_hits_floor_below_camera_target_line() {
    let camera = Camera::desktop_default(16.0 / 9.0);
    let target = DragTarget::from_cursor(&FloorPlane::new(0.0), &camera, Vec2::ZERO).unwrap();
    // Centre ray follows eye -> target, which descends from y=1.6 to y=1.0
    // over 2.28 m, so it reaches the floor further along the same line.
    let dir = (camera.target - camera.eye).normalize();
    let t = -camera.eye.y / dir.y;
    let expected = camera.eye + dir * t;
    assert!((target.position - expected).length() < 1e-2);
}

#[test]
fn cursor_above_horizon_finds_no_floor() {
    let camera = Camera::desktop_default(1.0);
    assert_eq!(
        DragTarget::from_cursor(&FloorPlane::new(0.0), &camera, Vec2::new(0.0, 1.0)),
        None
    );
}
