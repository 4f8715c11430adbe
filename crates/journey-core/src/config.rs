//! Tuning constants for the journey and the runtime configuration surface
//! assembled from them.
//!
//! Constants express intended behaviour and keep magic numbers out of the
//! navigation code. [`JourneyConfig`] bundles the parts that a deployment may
//! override from JSON; everything it leaves out falls back to these values.

use crate::error::ConfigError;
use crate::scene::SceneId;
use fnv::FnvHashMap;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

// Navigation physics
pub const DEFAULT_FRICTION: f32 = 0.6; // 0 = no damping, 1 = instant stop
pub const DEFAULT_ACCELERATION: f32 = 0.04; // impulse to velocity scale
pub const DEFAULT_WHEEL_SENSITIVITY: f32 = 1.0;
pub const DEFAULT_TOUCH_SENSITIVITY: f32 = 0.3;
pub const VELOCITY_THRESHOLD: f32 = 0.000_001; // below this velocity counts as settled

// Commit thresholds
pub const COMPLETION_SENSITIVITY: f32 = 0.01; // rest-local progress needed to commit a zoom
pub const ZOOMED_IN_SENSITIVITY_MULTIPLIER: f32 = 10.0; // leaving a zoomed-in scene is this much easier

// Camera defaults
pub const DESKTOP_FOV: f32 = 75.0;
pub const MOBILE_FOV: f32 = 100.0;
pub const INITIAL_CAMERA_DESKTOP_POS: Vec3 = Vec3::new(0.0, -10.0, 4.5);
pub const INITIAL_CAMERA_MOBILE_POS: Vec3 = Vec3::new(0.0, -12.0, 5.5);

// Galaxy
pub const SOLAR_SYSTEM_STAR_POS: Vec3 =
    Vec3::new(0.038_105_392, -2.745_814_7, 0.717_229_96); // hand-picked star in the galaxy disc
pub const SOLAR_SYSTEM_STAR_CAMERA_OFFSET: Vec3 = Vec3::new(0.0, -0.185, 0.185 / 2.0);
pub const SOLAR_SYSTEM_STAR_ZOOMED_IN_FOV: f32 = 25.0;

// Solar system
pub const SUN_POSITION: Vec3 = Vec3::ZERO;
pub const SOLAR_SYSTEM_ZOOMED_OUT_POS: Vec3 = Vec3::new(400.0, 400.0, 400.0);
pub const SOLAR_SYSTEM_ZOOMED_IN_POS: Vec3 = Vec3::new(30.0, 30.0, 30.0);
pub const EARTH_ORBIT_RADIUS: f32 = 16.0;
pub const EARTH_ORBIT_ANGLE: f32 = 0.6; // radians around +Y, Earth is parked here
pub const ROTATION_END_RADIUS: f32 = 20.0; // orbit radius the rotation settles on, just outside Earth's orbit
pub const ROTATION_END_HEIGHT: f32 = 2.0;

// Earth
pub const EARTH_APPROACH_OFFSET: Vec3 = Vec3::new(0.5, 0.5, 0.5);
pub const EARTH_ZOOMED_IN_OFFSET: Vec3 = Vec3::new(0.5, 0.3, 0.3);
pub const EARTH_ZOOMED_IN_FOV: f32 = 20.0;

// Image scenes
pub const IMAGE_PLANE_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const IMAGE_CAMERA_DISTANCE: f32 = 10.0; // camera sits this far in front of the plane

// Room
pub const ROOM_ZOOMED_OUT_POS: Vec3 = Vec3::new(6.92, 4.5, 6.5);
pub const DESK_ANCHOR: &str = "DeskTop"; // scene-graph node the devices are placed relative to
pub const MONITOR_POSITION_OFFSET: Vec3 = Vec3::new(-1.0, 2.588, -0.1);
pub const MONITOR_SCREEN_LIFT: f32 = 0.5; // look at the screen, not the whole monitor
pub const MONITOR_CAMERA_OFFSET: Vec3 = Vec3::new(1.5, 0.0, 0.0);
pub const PHONE_POSITION_OFFSET: Vec3 = Vec3::new(0.2, 2.61, 1.8);
pub const PHONE_CAMERA_OFFSET: Vec3 = Vec3::new(0.05, -0.6, 0.0);

// Device overlay hints (seconds after the room is zoomed in)
pub const SCROLL_HINT_TIMEOUT_SEC: f64 = 15.0;
pub const FULLSCREEN_HINT_TIMEOUT_SEC: f64 = 20.0;

/// Which device layout the journey is tuned for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceProfile {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceProfile {
    /// Viewport width below which the mobile layout is used.
    pub const MOBILE_MAX_WIDTH: f64 = 768.0;

    pub fn detect(viewport_width: f64, has_touch: bool) -> Self {
        if viewport_width < Self::MOBILE_MAX_WIDTH || (has_touch && viewport_width < 1024.0) {
            DeviceProfile::Mobile
        } else {
            DeviceProfile::Desktop
        }
    }

    #[inline]
    pub fn default_fov(self) -> f32 {
        match self {
            DeviceProfile::Desktop => DESKTOP_FOV,
            DeviceProfile::Mobile => MOBILE_FOV,
        }
    }

    #[inline]
    pub fn initial_camera_position(self) -> Vec3 {
        match self {
            DeviceProfile::Desktop => INITIAL_CAMERA_DESKTOP_POS,
            DeviceProfile::Mobile => INITIAL_CAMERA_MOBILE_POS,
        }
    }
}

/// Friction, acceleration and input sensitivities for the physics engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsTuning {
    pub friction: f32,
    pub acceleration: f32,
    pub wheel_sensitivity: f32,
    pub touch_sensitivity: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            acceleration: DEFAULT_ACCELERATION,
            wheel_sensitivity: DEFAULT_WHEEL_SENSITIVITY,
            touch_sensitivity: DEFAULT_TOUCH_SENSITIVITY,
        }
    }
}

impl PhysicsTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(ConfigError::Friction(self.friction));
        }
        positive("acceleration", self.acceleration)?;
        positive("wheelSensitivity", self.wheel_sensitivity)?;
        positive("touchSensitivity", self.touch_sensitivity)
    }
}

/// Commit thresholds shared by every scene controller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThresholdTuning {
    pub completion_sensitivity: f32,
    pub zoomed_in_sensitivity_multiplier: f32,
    pub velocity_threshold: f32,
}

impl Default for ThresholdTuning {
    fn default() -> Self {
        Self {
            completion_sensitivity: COMPLETION_SENSITIVITY,
            zoomed_in_sensitivity_multiplier: ZOOMED_IN_SENSITIVITY_MULTIPLIER,
            velocity_threshold: VELOCITY_THRESHOLD,
        }
    }
}

impl ThresholdTuning {
    /// Rest-local progress needed to commit a zoom-in.
    #[inline]
    pub fn forward_threshold(&self) -> f32 {
        self.completion_sensitivity
    }

    /// Rest-local progress magnitude needed to commit a zoom-out.
    #[inline]
    pub fn backward_threshold(&self, zoomed_in: bool) -> f32 {
        if zoomed_in {
            self.completion_sensitivity / self.zoomed_in_sensitivity_multiplier
        } else {
            self.completion_sensitivity
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("completionSensitivity", self.completion_sensitivity)?;
        positive(
            "zoomedInSensitivityMultiplier",
            self.zoomed_in_sensitivity_multiplier,
        )?;
        positive("velocityThreshold", self.velocity_threshold)
    }
}

/// Pixel target an image scene pushes into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTarget {
    pub width: u32,
    pub height: u32,
    pub target_coords: Vec2,
    pub target_repeat: Vec2,
}

impl ImageTarget {
    /// Target pixel in normalized texture space.
    #[inline]
    pub fn target_uv(&self) -> Vec2 {
        Vec2::new(
            self.target_coords.x / self.width as f32,
            self.target_coords.y / self.height as f32,
        )
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    fn validate(&self, scene: SceneId) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyImage {
                scene,
                width: self.width,
                height: self.height,
            });
        }
        let c = self.target_coords;
        if c.x < 0.0 || c.y < 0.0 || c.x > self.width as f32 || c.y > self.height as f32 {
            return Err(ConfigError::TargetOutsideImage {
                scene,
                x: c.x,
                y: c.y,
                width: self.width,
                height: self.height,
            });
        }
        positive("targetRepeat.x", self.target_repeat.x)?;
        positive("targetRepeat.y", self.target_repeat.y)
    }
}

pub const CONTINENT_IMAGE: ImageTarget = ImageTarget {
    width: 600,
    height: 600,
    target_coords: Vec2::new(380.0, 280.0),
    target_repeat: Vec2::splat(0.15),
};

pub const CITY_IMAGE: ImageTarget = ImageTarget {
    width: 1280,
    height: 854,
    target_coords: Vec2::new(640.0, 427.0),
    target_repeat: Vec2::splat(0.1),
};

pub const DISTRICT_IMAGE: ImageTarget = ImageTarget {
    width: 1280,
    height: 854,
    target_coords: Vec2::new(650.0, 20.0),
    target_repeat: Vec2::splat(0.25),
};

pub fn default_image_targets() -> FnvHashMap<SceneId, ImageTarget> {
    let mut images = FnvHashMap::default();
    images.insert(SceneId::Continent, CONTINENT_IMAGE);
    images.insert(SceneId::City, CITY_IMAGE);
    images.insert(SceneId::District, DISTRICT_IMAGE);
    images
}

/// Everything the navigator needs that a deployment may override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JourneyConfig {
    pub physics: PhysicsTuning,
    /// Per-scene physics, replacing `physics` while that scene is current.
    pub scene_physics: FnvHashMap<SceneId, PhysicsTuning>,
    pub thresholds: ThresholdTuning,
    pub images: FnvHashMap<SceneId, ImageTarget>,
    pub device: DeviceProfile,
    pub base_url: String,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsTuning::default(),
            scene_physics: FnvHashMap::default(),
            thresholds: ThresholdTuning::default(),
            images: default_image_targets(),
            device: DeviceProfile::default(),
            base_url: "/".to_string(),
        }
    }
}

impl JourneyConfig {
    /// Parse and validate a JSON document. Missing fields keep their defaults;
    /// image targets given in the document replace the defaults per scene.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut parsed: JourneyConfig = serde_json::from_str(json)?;
        for (scene, target) in default_image_targets() {
            parsed.images.entry(scene).or_insert(target);
        }
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;
        for tuning in self.scene_physics.values() {
            tuning.validate()?;
        }
        self.thresholds.validate()?;
        for (scene, target) in &self.images {
            if !matches!(scene, SceneId::Continent | SceneId::City | SceneId::District) {
                return Err(ConfigError::NotAnImageScene { scene: *scene });
            }
            target.validate(*scene)?;
        }
        Ok(())
    }

    /// Physics in effect while `scene` is current.
    pub fn physics_for(&self, scene: SceneId) -> PhysicsTuning {
        self.scene_physics
            .get(&scene)
            .copied()
            .unwrap_or(self.physics)
    }

    /// Image target for `scene`, falling back to the built-in one.
    pub fn image_for(&self, scene: SceneId, fallback: ImageTarget) -> ImageTarget {
        self.images.get(&scene).copied().unwrap_or(fallback)
    }

    pub fn with_device(mut self, device: DeviceProfile) -> Self {
        self.device = device;
        self
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
