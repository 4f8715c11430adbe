//! Camera, texture and scene-graph types the zoom timelines write into, and
//! the zoom camera setup that keeps scene boundaries visually continuous.
//!
//! These types avoid platform-specific APIs. The external renderer copies
//! them into its own scene graph every frame.

use crate::state::{NavigationState, ZoomOutCameraData};
use crate::scene::SceneId;
use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Position, orientation and vertical field of view (degrees).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub orientation: Quat,
    pub fov: f32,
}

impl CameraPose {
    pub fn new(position: Vec3, orientation: Quat, fov: f32) -> Self {
        Self {
            position,
            orientation,
            fov,
        }
    }

    /// Pose at `position` facing `focus`.
    pub fn looking_at(position: Vec3, focus: Vec3, fov: f32) -> Self {
        Self::new(position, look_at_rotation(position, focus), fov)
    }

    /// Component-wise closeness, orientation compared up to sign.
    pub fn approx_eq(&self, other: &CameraPose, eps: f32) -> bool {
        self.position.abs_diff_eq(other.position, eps)
            && self.orientation.dot(other.orientation).abs() >= 1.0 - eps
            && (self.fov - other.fov).abs() <= eps
    }
}

/// Perspective camera driven by the zoom timelines. Like three.js cameras it
/// looks down its local -Z axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Quat,
    pub fov: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            fov: crate::config::DESKTOP_FOV,
            aspect: 16.0 / 9.0,
            znear: 0.01,
            zfar: 5000.0,
        }
    }
}

impl Camera {
    #[inline]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.orientation, self.fov)
    }

    #[inline]
    pub fn set_pose(&mut self, pose: &CameraPose) {
        self.position = pose.position;
        self.orientation = pose.orientation;
        self.fov = pose.fov;
    }

    /// Rotate in place so the camera faces `focus`.
    pub fn look_at(&mut self, focus: Vec3) {
        self.orientation = look_at_rotation(self.position, focus);
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }
}

/// World rotation of a camera at `eye` looking at `focus` with +Y up.
/// Falls back to +Z up when looking straight up or down, and to identity when
/// `eye` and `focus` coincide.
pub fn look_at_rotation(eye: Vec3, focus: Vec3) -> Quat {
    let dir = focus - eye;
    if dir.length_squared() <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    let dir = dir.normalize();
    let up = if dir.y.abs() > 0.999 { Vec3::Z } else { Vec3::Y };
    let view = Mat4::look_at_rh(eye, focus, up);
    Quat::from_mat4(&view).inverse().normalize()
}

/// Offset/repeat of an image texture. Shrinking `repeat` while moving
/// `offset` reads as pushing into a detail of the picture.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureTransform {
    pub offset: Vec2,
    pub repeat: Vec2,
}

impl Default for TextureTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            repeat: Vec2::ONE,
        }
    }
}

/// Lookup of named objects in the externally rendered scene graph.
pub trait SceneGraph {
    fn world_position(&self, name: &str) -> Option<Vec3>;
}

/// Named anchor positions reported by the renderer once models are loaded.
#[derive(Clone, Debug, Default)]
pub struct NamedAnchors {
    anchors: FnvHashMap<String, Vec3>,
}

impl NamedAnchors {
    pub fn insert(&mut self, name: impl Into<String>, position: Vec3) {
        self.anchors.insert(name.into(), position);
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl SceneGraph for NamedAnchors {
    fn world_position(&self, name: &str) -> Option<Vec3> {
        self.anchors.get(name).copied()
    }
}

/// Everything a zoom timeline may write to: the single camera plus the
/// textures of the image scenes.
#[derive(Clone, Debug, Default)]
pub struct Stage {
    pub camera: Camera,
    pub textures: FnvHashMap<SceneId, TextureTransform>,
    pub anchors: NamedAnchors,
}

impl Stage {
    pub fn texture_mut(&mut self, scene: SceneId) -> &mut TextureTransform {
        self.textures.entry(scene).or_default()
    }

    pub fn texture(&self, scene: SceneId) -> TextureTransform {
        self.textures.get(&scene).copied().unwrap_or_default()
    }
}

/// Resolve the zoomed-out end of a zoom on `scene`.
///
/// Forward: the camera's exact current pose is stored under `scene` and
/// returned. Backward: the stored pose is returned, or `default_pose` when the
/// scene was never zoomed into.
pub fn setup_zoom_camera(
    camera: &Camera,
    scene: SceneId,
    backwards: bool,
    state: &mut NavigationState,
    default_pose: CameraPose,
) -> CameraPose {
    if backwards {
        match state.zoom_out_camera_data(scene) {
            Some(data) => data.pose,
            None => {
                log::debug!("[camera] no stored pose for {scene}, using default");
                default_pose
            }
        }
    } else {
        let pose = camera.pose();
        state.set_zoom_out_camera_data(
            scene,
            ZoomOutCameraData {
                pose,
                zoomed_in: true,
            },
        );
        pose
    }
}
