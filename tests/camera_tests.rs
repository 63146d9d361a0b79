// Host-side tests for screen projection helpers.

#![allow(dead_code)]
mod camera {
    include!("../src/camera.rs");
}

use camera::*;
use glam::{Mat4, Vec3};

fn view_proj(eye: Vec3) -> (Mat4, Mat4) {
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 2.0, 0.01, 100.0);
    (proj * view, view)
}

#[test]
fn globe_centre_projects_to_canvas_centre() {
    let (vp, _) = view_proj(Vec3::new(0.0, 0.0, 3.0));
    let p = project_to_screen(vp, Vec3::ZERO, 800.0, 400.0).expect("in front");
    assert!((p.x - 400.0).abs() < 1e-3);
    assert!((p.y - 200.0).abs() < 1e-3);
}

#[test]
fn screen_y_grows_downwards() {
    let (vp, _) = view_proj(Vec3::new(0.0, 0.0, 3.0));
    let above = project_to_screen(vp, Vec3::new(0.0, 0.5, 0.0), 800.0, 400.0).expect("visible");
    let right = project_to_screen(vp, Vec3::new(0.5, 0.0, 0.0), 800.0, 400.0).expect("visible");
    assert!(above.y < 200.0);
    assert!(right.x > 400.0);
}

#[test]
fn points_behind_the_camera_are_not_projected() {
    let (vp, _) = view_proj(Vec3::new(0.0, 0.0, 3.0));
    assert!(project_to_screen(vp, Vec3::new(0.0, 0.0, 5.0), 800.0, 400.0).is_none());
}

#[test]
fn far_side_of_the_globe_does_not_face_the_camera() {
    let eye = Vec3::new(0.0, 0.0, 2.5);
    assert!(faces_camera(Vec3::Z, eye));
    assert!(!faces_camera(-Vec3::Z, eye));
    assert!(faces_camera(Vec3::new(0.6, 0.0, 0.8), eye));
    assert!(!faces_camera(Vec3::X, eye));
}

#[test]
fn billboard_axes_match_screen_axes() {
    let (_, view) = view_proj(Vec3::new(0.0, 0.0, 3.0));
    let (right, up) = billboard_axes(view);
    assert!((right - Vec3::X).length() < 1e-5);
    assert!((up - Vec3::Y).length() < 1e-5);

    let (_, side) = view_proj(Vec3::new(3.0, 0.0, 0.0));
    let (right, _) = billboard_axes(side);
    assert!((right - -Vec3::Z).length() < 1e-5);
}

#[test]
fn full_view_height_fills_the_viewport() {
    let fovy = std::f32::consts::FRAC_PI_4;
    let distance = 2.5;
    let extent = 2.0 * distance * (fovy * 0.5).tan();
    let px = world_size_to_px(extent, distance, 900.0, fovy);
    assert!((px - 900.0).abs() < 1e-2, "{px}");
    assert!((world_size_to_px(extent, 2.0 * distance, 900.0, fovy) - 450.0).abs() < 1e-2);
}

#[test]
fn label_size_follows_population_at_follow_view() {
    use globe_core::camera::FOVY_RADIANS;
    use globe_core::cities::label_size;
    use globe_core::constants::{FOLLOW_ALTITUDE, GLOBE_RADIUS, LABEL_ALTITUDE};

    let distance = (FOLLOW_ALTITUDE - LABEL_ALTITUDE) as f32 * GLOBE_RADIUS;
    let px = |pop: f64| angular_size_px(label_size(pop), GLOBE_RADIUS, distance, 1000.0, FOVY_RADIANS);
    let town = px(20_000.0);
    let megacity = px(20_000_000.0);
    assert!(town < megacity);
    assert!(((megacity / town) - 1000f32.sqrt()).abs() < 0.05, "{town} vs {megacity}");
    assert!(megacity > 20.0 && megacity < 160.0, "{megacity}");
}
