//! Per-scene zoom controller.
//!
//! Each scene has one controller wrapping its [`ZoomAnimation`]. The
//! controller owns the scene's in-flight timeline, so a scene can never have
//! two timelines writing to the camera at once.

use crate::animation::{default_pose, ZoomAnimation, ZoomContext};
use crate::camera::{setup_zoom_camera, CameraPose, Stage};
use crate::scene::SceneId;
use crate::state::{NavigationState, TransitionOutcome, ZoomDirection, ZoomOutCameraData};
use crate::timeline::{CancelHandle, Timeline, TimelineStatus};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerPhase {
    #[default]
    IdleOut,
    TransitioningIn,
    IdleIn,
    TransitioningOut,
}

impl ControllerPhase {
    #[inline]
    pub fn is_transitioning(self) -> bool {
        matches!(
            self,
            ControllerPhase::TransitioningIn | ControllerPhase::TransitioningOut
        )
    }

    fn transitioning(direction: ZoomDirection) -> Self {
        match direction {
            ZoomDirection::In => ControllerPhase::TransitioningIn,
            ZoomDirection::Out => ControllerPhase::TransitioningOut,
        }
    }

    fn settled(direction: ZoomDirection) -> Self {
        match direction {
            ZoomDirection::In => ControllerPhase::IdleIn,
            ZoomDirection::Out => ControllerPhase::IdleOut,
        }
    }
}

#[derive(Clone, Debug)]
struct ActiveZoom {
    timeline: Timeline,
    direction: ZoomDirection,
    /// Zoomed-out end of the timeline, reused when the zoom is reversed.
    start_pose: CameraPose,
}

#[derive(Clone, Debug)]
pub struct SceneController {
    scene: SceneId,
    animation: ZoomAnimation,
    phase: ControllerPhase,
    active: Option<ActiveZoom>,
}

impl SceneController {
    pub fn new(scene: SceneId, animation: ZoomAnimation) -> Self {
        Self {
            scene,
            animation,
            phase: ControllerPhase::IdleOut,
            active: None,
        }
    }

    #[inline]
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    #[inline]
    pub fn animation(&self) -> &ZoomAnimation {
        &self.animation
    }

    #[inline]
    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn direction(&self) -> Option<ZoomDirection> {
        self.active.as_ref().map(|a| a.direction)
    }

    /// Position of the in-flight timeline, if any.
    pub fn position(&self) -> Option<f32> {
        self.active.as_ref().map(|a| a.timeline.position())
    }

    pub fn handle(&self) -> Option<CancelHandle> {
        self.active.as_ref().map(|a| a.timeline.handle())
    }

    /// Start zooming this scene in, or out when `backwards`. Any timeline
    /// already in flight is cleaned up first.
    pub fn zoom(
        &mut self,
        backwards: bool,
        stage: &Stage,
        state: &mut NavigationState,
        ctx: &ZoomContext<'_>,
    ) -> CancelHandle {
        self.cleanup();
        let fallback = default_pose(self.scene, ctx);
        let start_pose = setup_zoom_camera(&stage.camera, self.scene, backwards, state, fallback);
        let timeline = self.animation.build(&start_pose, backwards, ctx);
        let direction = if backwards {
            ZoomDirection::Out
        } else {
            ZoomDirection::In
        };
        log::debug!("[nav] zoom {} {:?}", self.scene, direction);
        state.begin_transition(self.scene, direction);
        self.start(timeline, direction, start_pose)
    }

    /// Turn the in-flight zoom around at its current position. The replacement
    /// shares the original endpoints so the camera does not jump.
    pub fn reverse(
        &mut self,
        state: &mut NavigationState,
        ctx: &ZoomContext<'_>,
    ) -> Option<CancelHandle> {
        let active = self.active.take()?;
        active.timeline.handle().cleanup();
        let direction = active.direction.reversed();
        let mut timeline = self
            .animation
            .build(&active.start_pose, direction.is_backwards(), ctx);
        timeline.seek(active.timeline.position());
        if direction == ZoomDirection::In {
            // heading back in: the pose to return to is still the start pose
            state.set_zoom_out_camera_data(
                self.scene,
                ZoomOutCameraData {
                    pose: active.start_pose,
                    zoomed_in: true,
                },
            );
        }
        log::debug!(
            "[nav] reverse {} to {:?} at {:.3}",
            self.scene,
            direction,
            timeline.position()
        );
        state.begin_transition(self.scene, direction);
        Some(self.start(timeline, direction, active.start_pose))
    }

    fn start(
        &mut self,
        timeline: Timeline,
        direction: ZoomDirection,
        start_pose: CameraPose,
    ) -> CancelHandle {
        let handle = timeline.handle();
        self.phase = ControllerPhase::transitioning(direction);
        self.active = Some(ActiveZoom {
            timeline,
            direction,
            start_pose,
        });
        handle
    }

    /// Move the in-flight timeline by `delta`, write it to `stage` and commit
    /// the transition once every track has reached its target.
    pub fn advance(
        &mut self,
        delta: f32,
        stage: &mut Stage,
        state: &mut NavigationState,
    ) -> Option<TransitionOutcome> {
        let active = self.active.as_mut()?;
        match active.timeline.advance(delta) {
            TimelineStatus::Running => {
                active.timeline.apply(stage);
                None
            }
            TimelineStatus::Completed => {
                active.timeline.apply(stage);
                let direction = active.direction;
                self.active = None;
                self.phase = ControllerPhase::settled(direction);
                state.end_transition()
            }
            TimelineStatus::Cancelled => {
                // cancelled from outside, fall back to where the zoom started
                let direction = active.direction;
                self.active = None;
                self.phase = ControllerPhase::settled(direction.reversed());
                None
            }
        }
    }

    /// Stop any in-flight timeline. The phase returns to where the zoom began.
    pub fn cleanup(&mut self) {
        if let Some(active) = self.active.take() {
            active.timeline.handle().cleanup();
            self.phase = ControllerPhase::settled(active.direction.reversed());
        }
    }
}
