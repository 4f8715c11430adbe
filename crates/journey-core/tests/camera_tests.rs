// Host-side tests for the camera model and the zoom camera setup.

use glam::{Quat, Vec3};
use journey_core::*;

#[test]
fn look_at_points_forward_at_focus() {
    let mut camera = Camera {
        position: Vec3::new(3.0, 4.0, 5.0),
        ..Camera::default()
    };
    camera.look_at(Vec3::ZERO);
    let expected = (Vec3::ZERO - camera.position).normalize();
    assert!(camera.forward().abs_diff_eq(expected, 1e-5));
}

#[test]
fn look_at_straight_down_is_finite() {
    let q = look_at_rotation(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
    assert!(q.is_finite());
    assert!((q * Vec3::NEG_Z).abs_diff_eq(Vec3::NEG_Y, 1e-5));
    assert_eq!(look_at_rotation(Vec3::ONE, Vec3::ONE), Quat::IDENTITY);
}

#[test]
fn view_matrix_maps_camera_to_origin() {
    let mut camera = Camera {
        position: Vec3::new(0.0, 2.0, 10.0),
        ..Camera::default()
    };
    camera.look_at(Vec3::ZERO);
    let p = camera.view_matrix().transform_point3(camera.position);
    assert!(p.abs_diff_eq(Vec3::ZERO, 1e-4));
    let proj = camera.projection_matrix();
    assert!(proj.is_finite());
}

#[test]
fn forward_setup_stores_exact_pose() {
    let mut state = NavigationState::new();
    let mut camera = Camera::default();
    camera.set_pose(&CameraPose::looking_at(Vec3::new(1.25, -3.5, 7.0), Vec3::ZERO, 62.5));
    let fallback = CameraPose::new(Vec3::ZERO, Quat::IDENTITY, 75.0);

    let start = setup_zoom_camera(&camera, SceneId::Earth, false, &mut state, fallback);
    assert_eq!(start, camera.pose());
    let stored = state.zoom_out_camera_data(SceneId::Earth).unwrap();
    assert_eq!(stored.pose, camera.pose());
    assert!(stored.zoomed_in);
}

#[test]
fn backward_setup_reads_stored_pose() {
    let mut state = NavigationState::new();
    let recorded = CameraPose::new(Vec3::new(9.0, 8.0, 7.0), Quat::from_rotation_y(0.3), 40.0);
    state.set_zoom_out_camera_data(
        SceneId::City,
        ZoomOutCameraData {
            pose: recorded,
            zoomed_in: true,
        },
    );
    let camera = Camera::default();
    let fallback = CameraPose::new(Vec3::ZERO, Quat::IDENTITY, 75.0);
    let start = setup_zoom_camera(&camera, SceneId::City, true, &mut state, fallback);
    assert_eq!(start, recorded);
}

#[test]
fn backward_setup_without_record_uses_default() {
    let mut state = NavigationState::new();
    let camera = Camera::default();
    let fallback = CameraPose::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY, 75.0);
    let start = setup_zoom_camera(&camera, SceneId::District, true, &mut state, fallback);
    assert_eq!(start, fallback);
    // a miss is not recorded
    assert!(state.zoom_out_camera_data(SceneId::District).is_none());
}

#[test]
fn anchors_resolve_by_name() {
    let mut anchors = NamedAnchors::default();
    assert!(anchors.is_empty());
    anchors.insert(DESK_ANCHOR, Vec3::new(1.0, 0.0, -2.0));
    assert_eq!(anchors.world_position("DeskTop"), Some(Vec3::new(1.0, 0.0, -2.0)));
    assert_eq!(anchors.world_position("Chair"), None);
    assert_eq!(anchors.len(), 1);
}

#[test]
fn texture_defaults_show_the_whole_image() {
    let stage = Stage::default();
    let t = stage.texture(SceneId::Continent);
    assert_eq!(t.offset, glam::Vec2::ZERO);
    assert_eq!(t.repeat, glam::Vec2::ONE);
}
