//! Top-level navigation controller.
//!
//! The [`Navigator`] owns the physics engine, the navigation state, the stage
//! the timelines write to and one [`SceneController`] per scene. Calling
//! [`Navigator::tick`] once per animation frame runs, in order: input, physics,
//! threshold checks, timeline start/reversal, timeline advance, and finally
//! event delivery.

use crate::animation::{default_pose, ZoomContext, ZoomTable};
use crate::camera::{CameraPose, Stage, TextureTransform};
use crate::config::{ImageTarget, JourneyConfig, ThresholdTuning};
use crate::controller::SceneController;
use crate::events::{EventBus, NavigationEvent, ProgressUpdate, SubscriptionId};
use crate::physics::{InputSample, PhysicsEngine, PhysicsFrame};
use crate::scene::{scene_assets, ResolvedAssets, SceneId, SCENE_ORDER};
use crate::state::{NavigationState, TransitionOutcome, ZoomDirection, ZoomStatus};
use glam::Vec3;

/// What the thresholds make of the progress accumulated since the last rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdDecision {
    /// Not enough progress in either direction.
    Hold,
    /// Zoom into this scene.
    Forward(SceneId),
    /// Replay this scene's zoom backwards.
    Backward(SceneId),
    /// Enough progress, but the journey ends in that direction.
    Blocked(ZoomDirection),
}

/// Decide whether rest-local progress `local` commits a transition.
/// Boundaries are inclusive.
pub fn threshold_decision(
    local: f32,
    thresholds: &ThresholdTuning,
    state: &NavigationState,
) -> ThresholdDecision {
    let zoomed_in = state.scene_zoomed() == ZoomStatus::In;
    if local >= thresholds.forward_threshold() {
        if state.terminal_zoomed_in() {
            ThresholdDecision::Blocked(ZoomDirection::In)
        } else {
            ThresholdDecision::Forward(state.current_scene())
        }
    } else if local <= -thresholds.backward_threshold(zoomed_in) {
        let target = if state.terminal_zoomed_in() {
            Some(state.current_scene())
        } else {
            state.current_scene().prev()
        };
        match target {
            Some(scene) => ThresholdDecision::Backward(scene),
            None => ThresholdDecision::Blocked(ZoomDirection::Out),
        }
    } else {
        ThresholdDecision::Hold
    }
}

/// Summary of one [`Navigator::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub physics: PhysicsFrame,
    pub progress: Option<ProgressUpdate>,
    pub completed: Option<TransitionOutcome>,
}

pub struct Navigator {
    config: JourneyConfig,
    state: NavigationState,
    physics: PhysicsEngine,
    stage: Stage,
    controllers: Vec<SceneController>,
    bus: EventBus<NavigationEvent>,
    rest_anchor: f32,
    pending: Vec<NavigationEvent>,
}

impl Navigator {
    pub fn new(config: JourneyConfig) -> Self {
        let table = ZoomTable::new(&config);
        let controllers = SCENE_ORDER
            .iter()
            .map(|scene| SceneController::new(*scene, *table.get(*scene)))
            .collect();
        let physics = PhysicsEngine::new(config.physics_for(SceneId::FIRST))
            .with_velocity_threshold(config.thresholds.velocity_threshold);
        let mut nav = Self {
            config,
            state: NavigationState::new(),
            physics,
            stage: Stage::default(),
            controllers,
            bus: EventBus::new(),
            rest_anchor: 0.0,
            pending: Vec::new(),
        };
        nav.enter_scene(SceneId::FIRST);
        log::info!(
            "[nav] ready: {} scenes, device={:?}",
            SCENE_ORDER.len(),
            nav.config.device
        );
        nav
    }

    #[inline]
    pub fn config(&self) -> &JourneyConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    #[inline]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    #[inline]
    pub fn physics(&self) -> &PhysicsEngine {
        &self.physics
    }

    pub fn controller(&self, scene: SceneId) -> &SceneController {
        &self.controllers[scene.index()]
    }

    /// Progress accumulated since the last rest.
    pub fn rest_local_progress(&self) -> f32 {
        self.physics.progress() - self.rest_anchor
    }

    /// Position of the in-flight zoom in `[0, 1]`.
    pub fn transition_progress(&self) -> Option<f32> {
        let active = self.state.active_transition()?;
        self.controller(active.scene).position()
    }

    pub fn image_target(&self, scene: SceneId) -> Option<ImageTarget> {
        self.config.images.get(&scene).copied()
    }

    /// Asset manifest of `scene` joined to the configured base URL.
    pub fn scene_assets(&self, scene: SceneId) -> ResolvedAssets {
        scene_assets(scene).resolve(scene, &self.config.base_url)
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&NavigationEvent) + 'static) -> SubscriptionId {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Viewport aspect ratio, forwarded to the camera.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect > 0.0 && aspect.is_finite() {
            self.stage.camera.aspect = aspect;
        }
    }

    /// Record a named scene-graph position reported by the renderer.
    pub fn register_anchor(&mut self, name: &str, position: Vec3) {
        log::debug!("[nav] anchor {name} at {position}");
        self.stage.anchors.insert(name, position);
        // the room rests facing its device, so refresh it while idle there
        let resting_in_room = self.state.current_scene().is_last()
            && self.state.active_transition().is_none()
            && !self.state.terminal_zoomed_in();
        if resting_in_room {
            let pose = self.entry_pose(SceneId::LAST);
            self.stage.camera.set_pose(&pose);
        }
    }

    /// Fullscreen is only available while the last scene is zoomed in.
    /// Returns whether the flag now matches `active`.
    pub fn set_fullscreen(&mut self, active: bool) -> bool {
        if active && !self.state.terminal_zoomed_in() {
            log::debug!("[nav] fullscreen refused outside the zoomed-in device");
            return false;
        }
        self.state.set_fullscreen_active(active);
        true
    }

    /// Advance one animation frame.
    pub fn tick(&mut self, input: &InputSample, now_sec: f64) -> TickReport {
        let input = if self.state.fullscreen_active() {
            InputSample::default()
        } else {
            *input
        };
        let frame = self.physics.step(&input, now_sec);

        if self.state.active_transition().is_none() {
            self.check_thresholds(frame.progress);
        }

        let mut report = TickReport {
            physics: frame,
            progress: None,
            completed: None,
        };
        if let Some(active) = self.state.active_transition() {
            self.drive(active.scene, active.direction, frame.delta, &mut report);
        }

        for event in std::mem::take(&mut self.pending) {
            self.bus.publish(&event);
        }
        report
    }

    fn check_thresholds(&mut self, progress: f32) {
        let local = progress - self.rest_anchor;
        match threshold_decision(local, &self.config.thresholds, &self.state) {
            ThresholdDecision::Hold => {}
            ThresholdDecision::Blocked(direction) => {
                log::debug!("[nav] {direction:?} blocked at {}", self.state.current_scene());
                self.rest_anchor = progress;
            }
            ThresholdDecision::Forward(scene) => self.start(scene, false),
            ThresholdDecision::Backward(scene) => self.start(scene, true),
        }
    }

    fn start(&mut self, scene: SceneId, backwards: bool) {
        let ctx = ZoomContext {
            device: self.config.device,
            scene_graph: &self.stage.anchors,
        };
        let controller = &mut self.controllers[scene.index()];
        controller.zoom(backwards, &self.stage, &mut self.state, &ctx);
        let direction = if backwards {
            ZoomDirection::Out
        } else {
            ZoomDirection::In
        };
        self.pending
            .push(NavigationEvent::TransitionStarted { scene, direction });
    }

    fn drive(
        &mut self,
        scene: SceneId,
        direction: ZoomDirection,
        delta: f32,
        report: &mut TickReport,
    ) {
        let mut direction = direction;
        if ZoomDirection::from_delta(delta) == Some(direction.reversed()) {
            let ctx = ZoomContext {
                device: self.config.device,
                scene_graph: &self.stage.anchors,
            };
            let controller = &mut self.controllers[scene.index()];
            if controller.reverse(&mut self.state, &ctx).is_some() {
                direction = direction.reversed();
                self.pending
                    .push(NavigationEvent::TransitionReversed { scene, direction });
            }
        }

        let controller = &mut self.controllers[scene.index()];
        let outcome = controller.advance(delta, &mut self.stage, &mut self.state);
        let position = match controller.position() {
            Some(position) => position,
            None if outcome.is_some() => match direction {
                ZoomDirection::In => 1.0,
                ZoomDirection::Out => 0.0,
            },
            None => {
                // cancelled underneath us
                self.state.abort_transition();
                self.rest_anchor = self.physics.progress();
                return;
            }
        };
        let update = ProgressUpdate {
            scene,
            direction,
            progress: position,
        };
        report.progress = Some(update);
        self.pending.push(NavigationEvent::Progress(update));

        if let Some(outcome) = outcome {
            self.complete(outcome);
            report.completed = Some(outcome);
            self.pending
                .push(NavigationEvent::TransitionCompleted(outcome));
        }
    }

    fn complete(&mut self, outcome: TransitionOutcome) {
        log::info!(
            "[nav] {:?} {} complete: {} -> {}",
            outcome.direction,
            outcome.scene,
            outcome.from,
            outcome.to
        );
        self.physics.halt();
        self.rest_anchor = self.physics.progress();
        self.physics.set_tuning(self.config.physics_for(outcome.to));
        if outcome.direction == ZoomDirection::In && outcome.to != outcome.scene {
            self.enter_scene(outcome.to);
        }
    }

    /// Put the camera at the resting pose of a scene reached going forward.
    fn enter_scene(&mut self, scene: SceneId) {
        let pose = self.entry_pose(scene);
        self.stage.camera.set_pose(&pose);
        if self.config.images.contains_key(&scene) {
            *self.stage.texture_mut(scene) = TextureTransform::default();
        }
    }

    fn entry_pose(&self, scene: SceneId) -> CameraPose {
        let ctx = ZoomContext {
            device: self.config.device,
            scene_graph: &self.stage.anchors,
        };
        default_pose(scene, &ctx)
    }

    /// Stop every timeline and drop all subscribers.
    pub fn teardown(&mut self) {
        for controller in self.controllers.iter_mut() {
            controller.cleanup();
        }
        self.state.abort_transition();
        self.pending.clear();
        self.bus.clear();
        self.physics.halt();
        self.rest_anchor = self.physics.progress();
    }
}
