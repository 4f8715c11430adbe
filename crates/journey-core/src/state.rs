//! Navigation state shared by the controllers and read by the overlays.
//!
//! One value lives for the whole session. Only the navigator mutates it;
//! everything else receives a shared reference.

use crate::camera::CameraPose;
use crate::scene::SceneId;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

/// Direction of an active zoom. "No active transition" is `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            ZoomDirection::In => ZoomDirection::Out,
            ZoomDirection::Out => ZoomDirection::In,
        }
    }

    #[inline]
    pub fn is_backwards(self) -> bool {
        self == ZoomDirection::Out
    }

    /// Direction matching the sign of a progress delta.
    #[inline]
    pub fn from_delta(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(ZoomDirection::In)
        } else if delta < 0.0 {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }
}

/// Where the current scene's camera rests or is heading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZoomStatus {
    In,
    #[default]
    Out,
    Mid,
}

/// Pose recorded when a scene was last zoomed into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomOutCameraData {
    pub pose: CameraPose,
    pub zoomed_in: bool,
}

/// The zoom currently in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveTransition {
    pub scene: SceneId,
    pub direction: ZoomDirection,
}

/// Result of a committed transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub scene: SceneId,
    pub direction: ZoomDirection,
    pub from: SceneId,
    pub to: SceneId,
}

#[derive(Clone, Debug)]
pub struct NavigationState {
    current_scene: SceneId,
    zoom_direction: Option<ZoomDirection>,
    scene_zoomed: ZoomStatus,
    fullscreen_active: bool,
    zoom_out_camera_data: FnvHashMap<SceneId, ZoomOutCameraData>,
    /// Scene whose zoom-in was the last committed transition.
    zoomed_into: Option<SceneId>,
    active: Option<ActiveTransition>,
    /// Status and zoomed-into scene before the active transition began.
    resting: (ZoomStatus, Option<SceneId>),
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    /// Fresh session state: first scene, zoomed out, nothing recorded.
    pub fn new() -> Self {
        Self {
            current_scene: SceneId::FIRST,
            zoom_direction: None,
            scene_zoomed: ZoomStatus::Out,
            fullscreen_active: false,
            zoom_out_camera_data: FnvHashMap::default(),
            zoomed_into: None,
            active: None,
            resting: (ZoomStatus::Out, None),
        }
    }

    #[inline]
    pub fn current_scene(&self) -> SceneId {
        self.current_scene
    }

    #[inline]
    pub fn zoom_direction(&self) -> Option<ZoomDirection> {
        self.zoom_direction
    }

    #[inline]
    pub fn scene_zoomed(&self) -> ZoomStatus {
        self.scene_zoomed
    }

    #[inline]
    pub fn fullscreen_active(&self) -> bool {
        self.fullscreen_active
    }

    #[inline]
    pub fn active_transition(&self) -> Option<ActiveTransition> {
        self.active
    }

    /// Scene whose zoom-in was committed last, while that still holds.
    #[inline]
    pub fn zoomed_into(&self) -> Option<SceneId> {
        self.zoomed_into
    }

    /// The last scene is current and its own zoom onto the device completed.
    /// Arriving in the last scene from the one before it does not count.
    #[inline]
    pub fn terminal_zoomed_in(&self) -> bool {
        self.current_scene.is_last()
            && self.scene_zoomed == ZoomStatus::In
            && self.zoomed_into == Some(self.current_scene)
    }

    pub fn set_current_scene(&mut self, scene: SceneId) {
        self.current_scene = scene;
    }

    pub fn set_zoom_direction(&mut self, direction: Option<ZoomDirection>) {
        self.zoom_direction = direction;
    }

    pub fn set_scene_zoomed(&mut self, status: ZoomStatus) {
        self.scene_zoomed = status;
    }

    pub fn set_fullscreen_active(&mut self, active: bool) {
        self.fullscreen_active = active;
    }

    pub fn zoom_out_camera_data(&self, scene: SceneId) -> Option<&ZoomOutCameraData> {
        self.zoom_out_camera_data.get(&scene)
    }

    pub fn set_zoom_out_camera_data(&mut self, scene: SceneId, data: ZoomOutCameraData) {
        self.zoom_out_camera_data.insert(scene, data);
    }

    /// Mark `scene` as zooming in `direction`. Replaces any active transition.
    pub fn begin_transition(&mut self, scene: SceneId, direction: ZoomDirection) {
        if self.active.is_none() {
            self.resting = (self.scene_zoomed, self.zoomed_into);
        }
        self.active = Some(ActiveTransition { scene, direction });
        self.zoom_direction = Some(direction);
        self.scene_zoomed = ZoomStatus::Mid;
        self.fullscreen_active = false;
    }

    /// Commit the active transition and set `scene_zoomed` to the direction
    /// just completed. Returns `None`, changing nothing, when no transition is
    /// active, so duplicate completions are harmless.
    pub fn end_transition(&mut self) -> Option<TransitionOutcome> {
        let ActiveTransition { scene, direction } = self.active.take()?;
        let from = self.current_scene;
        self.zoom_direction = None;
        match direction {
            ZoomDirection::In => {
                self.current_scene = scene.next().unwrap_or(scene);
                self.scene_zoomed = ZoomStatus::In;
                self.zoomed_into = Some(scene);
            }
            ZoomDirection::Out => {
                self.current_scene = scene;
                self.scene_zoomed = ZoomStatus::Out;
                self.zoomed_into = None;
                if let Some(data) = self.zoom_out_camera_data.get_mut(&scene) {
                    data.zoomed_in = false;
                }
            }
        }
        if !self.terminal_zoomed_in() {
            self.fullscreen_active = false;
        }
        Some(TransitionOutcome {
            scene,
            direction,
            from,
            to: self.current_scene,
        })
    }

    /// Drop the active transition without committing it. The current scene
    /// rests exactly as it was before the transition began.
    pub fn abort_transition(&mut self) -> Option<ActiveTransition> {
        let active = self.active.take()?;
        self.zoom_direction = None;
        (self.scene_zoomed, self.zoomed_into) = self.resting;
        if active.direction == ZoomDirection::In && self.zoomed_into != Some(active.scene) {
            if let Some(data) = self.zoom_out_camera_data.get_mut(&active.scene) {
                data.zoomed_in = false;
            }
        }
        Some(active)
    }
}
