//! Per-scene zoom animations.
//!
//! Every scene owns exactly one [`ZoomAnimation`], looked up statically by
//! [`SceneId`] through a [`ZoomTable`]. Building an animation yields a
//! [`Timeline`] whose position 0 is the scene's zoomed-out pose and whose
//! position 1 is the zoomed-in target that hands off to the next scene.

use crate::camera::{CameraPose, SceneGraph};
use crate::config::*;
use crate::scene::{SceneId, SCENE_ORDER};
use crate::timeline::{Ease, Facing, OrbitPath, Timeline, Track};
use glam::{Vec2, Vec3};

/// Inputs an animation needs besides the start pose.
#[derive(Clone, Copy)]
pub struct ZoomContext<'a> {
    pub device: DeviceProfile,
    pub scene_graph: &'a dyn SceneGraph,
}

/// Where a camera-only zoom ends up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraTarget {
    /// Fixed world position, facing `focus`.
    Point { position: Vec3, focus: Vec3 },
    /// The monitor (desktop) or phone (mobile) on the desk.
    DeskDevice,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraZoom {
    pub target: CameraTarget,
    /// Field of view at the end of the zoom; `None` keeps the start fov.
    pub fov: Option<f32>,
    /// Pause before the camera starts moving.
    pub lead_in: f32,
    pub duration: f32,
    pub ease: Ease,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageZoom {
    pub scene: SceneId,
    pub image: ImageTarget,
    pub duration: f32,
    pub ease: Ease,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitZoom {
    pub center: Vec3,
    pub to_angle: f32,
    pub to_radius: f32,
    pub to_height: f32,
    pub focus: Vec3,
    pub duration: f32,
    pub ease: Ease,
}

impl OrbitZoom {
    /// Where the orbit ends, independent of where it starts.
    pub fn end_position(&self) -> Vec3 {
        self.center
            + Vec3::new(
                self.to_radius * self.to_angle.cos(),
                self.to_height,
                self.to_radius * self.to_angle.sin(),
            )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomAnimation {
    CameraOnly(CameraZoom),
    CameraPlusTextureUv(ImageZoom),
    OrbitalCamera(OrbitZoom),
}

impl ZoomAnimation {
    /// Timeline from `start` (the zoomed-out pose) to the zoomed-in target.
    /// A backwards timeline starts at position 1 and completes at 0.
    pub fn build(&self, start: &CameraPose, backwards: bool, ctx: &ZoomContext<'_>) -> Timeline {
        match self {
            ZoomAnimation::CameraOnly(zoom) => {
                let (to, focus) = match zoom.target {
                    CameraTarget::Point { position, focus } => (position, focus),
                    CameraTarget::DeskDevice => desk_device_target(ctx),
                };
                let mut tl = Timeline::new(backwards);
                if zoom.lead_in > 0.0 {
                    tl = tl.delay(zoom.lead_in);
                }
                tl.to(
                    Track::Move {
                        from: start.position,
                        to,
                        facing: Facing::Towards {
                            from: start.orientation,
                            focus,
                        },
                    },
                    zoom.duration,
                    zoom.ease,
                )
                .with_previous(
                    Track::Fov {
                        from: start.fov,
                        to: zoom.fov.unwrap_or(start.fov),
                    },
                    zoom.duration,
                    zoom.ease,
                )
            }
            ZoomAnimation::CameraPlusTextureUv(zoom) => {
                // the camera holds its framing while the picture moves
                Timeline::new(backwards)
                    .to(
                        Track::Move {
                            from: start.position,
                            to: start.position,
                            facing: Facing::Slerp {
                                from: start.orientation,
                                to: start.orientation,
                            },
                        },
                        zoom.duration,
                        Ease::Linear,
                    )
                    .with_previous(
                        Track::Fov {
                            from: start.fov,
                            to: start.fov,
                        },
                        zoom.duration,
                        Ease::Linear,
                    )
                    .with_previous(
                        Track::TextureOffset {
                            scene: zoom.scene,
                            from: Vec2::ZERO,
                            to: zoom.image.target_uv(),
                        },
                        zoom.duration,
                        zoom.ease,
                    )
                    .with_previous(
                        Track::TextureRepeat {
                            scene: zoom.scene,
                            from: Vec2::ONE,
                            to: zoom.image.target_repeat,
                        },
                        zoom.duration,
                        zoom.ease,
                    )
            }
            ZoomAnimation::OrbitalCamera(zoom) => {
                let path = OrbitPath::from_origin(
                    zoom.center,
                    start.position,
                    zoom.to_angle,
                    zoom.to_radius,
                    zoom.to_height,
                );
                Timeline::new(backwards)
                    .to(
                        Track::Orbit {
                            path,
                            facing: Facing::Towards {
                                from: start.orientation,
                                focus: zoom.focus,
                            },
                        },
                        zoom.duration,
                        zoom.ease,
                    )
                    .with_previous(
                        Track::Fov {
                            from: start.fov,
                            to: start.fov,
                        },
                        zoom.duration,
                        zoom.ease,
                    )
            }
        }
    }
}

/// Earth is parked on its orbit; orbital motion is not simulated.
pub fn earth_position() -> Vec3 {
    SUN_POSITION
        + Vec3::new(
            EARTH_ORBIT_RADIUS * EARTH_ORBIT_ANGLE.cos(),
            0.0,
            EARTH_ORBIT_RADIUS * EARTH_ORBIT_ANGLE.sin(),
        )
}

fn rotation_zoom() -> OrbitZoom {
    OrbitZoom {
        center: SUN_POSITION,
        to_angle: EARTH_ORBIT_ANGLE,
        to_radius: ROTATION_END_RADIUS,
        to_height: ROTATION_END_HEIGHT,
        focus: SUN_POSITION,
        duration: 4.0,
        ease: Ease::Power1InOut,
    }
}

/// Camera target and look-at point for the device on the desk.
/// A missing desk anchor falls back to the origin.
pub fn desk_device_target(ctx: &ZoomContext<'_>) -> (Vec3, Vec3) {
    let screen = desk_device_screen(ctx);
    match ctx.device {
        DeviceProfile::Desktop => (screen + MONITOR_CAMERA_OFFSET, screen),
        // the phone lies flat, look down at it from above
        DeviceProfile::Mobile => (
            screen + PHONE_CAMERA_OFFSET,
            Vec3::new(screen.x, 0.0, screen.z),
        ),
    }
}

/// World position of the device screen, relative to the desk anchor.
pub fn desk_device_screen(ctx: &ZoomContext<'_>) -> Vec3 {
    let desk = match ctx.scene_graph.world_position(DESK_ANCHOR) {
        Some(p) => p,
        None => {
            log::warn!("[room] scene graph has no '{DESK_ANCHOR}' anchor, using origin");
            Vec3::ZERO
        }
    };
    match ctx.device {
        DeviceProfile::Desktop => Vec3::new(
            desk.x + MONITOR_POSITION_OFFSET.x,
            MONITOR_POSITION_OFFSET.y + MONITOR_SCREEN_LIFT,
            desk.z + MONITOR_POSITION_OFFSET.z,
        ),
        DeviceProfile::Mobile => Vec3::new(
            desk.x + PHONE_POSITION_OFFSET.x,
            PHONE_POSITION_OFFSET.y,
            desk.z + PHONE_POSITION_OFFSET.z,
        ),
    }
}

/// Camera framing of the image plane shared by the image scenes.
pub fn image_framing_position() -> Vec3 {
    IMAGE_PLANE_POSITION + Vec3::new(0.0, 0.0, IMAGE_CAMERA_DISTANCE)
}

/// Configured zoomed-out pose of `scene`: where the camera rests when the
/// scene becomes current, and the fallback when no pose was recorded.
pub fn default_pose(scene: SceneId, ctx: &ZoomContext<'_>) -> CameraPose {
    let fov = ctx.device.default_fov();
    match scene {
        SceneId::Galaxy => {
            CameraPose::looking_at(ctx.device.initial_camera_position(), Vec3::ZERO, fov)
        }
        SceneId::SolarSystemApproach => {
            CameraPose::looking_at(SOLAR_SYSTEM_ZOOMED_OUT_POS, SUN_POSITION, fov)
        }
        SceneId::SolarSystemRotation => {
            CameraPose::looking_at(SOLAR_SYSTEM_ZOOMED_IN_POS, SUN_POSITION, fov)
        }
        SceneId::EarthApproach => {
            CameraPose::looking_at(rotation_zoom().end_position(), earth_position(), fov)
        }
        SceneId::Earth => {
            let earth = earth_position();
            CameraPose::looking_at(earth + EARTH_APPROACH_OFFSET, earth, fov)
        }
        SceneId::Continent | SceneId::City | SceneId::District => {
            CameraPose::looking_at(image_framing_position(), IMAGE_PLANE_POSITION, fov)
        }
        SceneId::Room => {
            CameraPose::looking_at(ROOM_ZOOMED_OUT_POS, desk_device_screen(ctx), fov)
        }
    }
}

fn image_zoom(scene: SceneId, image: ImageTarget) -> ZoomAnimation {
    ZoomAnimation::CameraPlusTextureUv(ImageZoom {
        scene,
        image,
        duration: 2.0,
        ease: Ease::Power1Out,
    })
}

/// The animation `scene` uses, with image targets taken from `config`.
pub fn zoom_animation(scene: SceneId, config: &JourneyConfig) -> ZoomAnimation {
    match scene {
        SceneId::Galaxy => ZoomAnimation::CameraOnly(CameraZoom {
            target: CameraTarget::Point {
                position: SOLAR_SYSTEM_STAR_POS + SOLAR_SYSTEM_STAR_CAMERA_OFFSET,
                focus: SOLAR_SYSTEM_STAR_POS,
            },
            fov: Some(SOLAR_SYSTEM_STAR_ZOOMED_IN_FOV),
            lead_in: 0.0,
            duration: 3.0,
            ease: Ease::Power1InOut,
        }),
        SceneId::SolarSystemApproach => ZoomAnimation::CameraOnly(CameraZoom {
            target: CameraTarget::Point {
                position: SOLAR_SYSTEM_ZOOMED_IN_POS,
                focus: SUN_POSITION,
            },
            fov: None,
            lead_in: 0.0,
            duration: 3.0,
            ease: Ease::Power2InOut,
        }),
        SceneId::SolarSystemRotation => ZoomAnimation::OrbitalCamera(rotation_zoom()),
        SceneId::EarthApproach => {
            let earth = earth_position();
            ZoomAnimation::CameraOnly(CameraZoom {
                target: CameraTarget::Point {
                    position: earth + EARTH_APPROACH_OFFSET,
                    focus: earth,
                },
                fov: None,
                lead_in: 0.0,
                duration: 3.0,
                ease: Ease::Power1InOut,
            })
        }
        SceneId::Earth => {
            let earth = earth_position();
            ZoomAnimation::CameraOnly(CameraZoom {
                target: CameraTarget::Point {
                    position: earth + EARTH_ZOOMED_IN_OFFSET,
                    focus: earth,
                },
                fov: Some(EARTH_ZOOMED_IN_FOV),
                lead_in: 0.0,
                duration: 2.0,
                ease: Ease::Power1Out,
            })
        }
        SceneId::Continent => image_zoom(scene, config.image_for(scene, CONTINENT_IMAGE)),
        SceneId::City => image_zoom(scene, config.image_for(scene, CITY_IMAGE)),
        SceneId::District => image_zoom(scene, config.image_for(scene, DISTRICT_IMAGE)),
        SceneId::Room => ZoomAnimation::CameraOnly(CameraZoom {
            target: CameraTarget::DeskDevice,
            fov: None,
            lead_in: 0.1,
            duration: 3.0,
            ease: Ease::Power1Out,
        }),
    }
}

/// Static scene → animation lookup.
#[derive(Clone, Debug)]
pub struct ZoomTable {
    entries: Vec<ZoomAnimation>,
}

impl ZoomTable {
    pub fn new(config: &JourneyConfig) -> Self {
        Self {
            entries: SCENE_ORDER
                .iter()
                .map(|scene| zoom_animation(*scene, config))
                .collect(),
        }
    }

    #[inline]
    pub fn get(&self, scene: SceneId) -> &ZoomAnimation {
        &self.entries[scene.index()]
    }
}
