// Per-frame view of the navigator handed to the renderer and the DOM
// overlays. Plain data, serialized into the `navigation-frame` event detail.

use glam::Vec2;
use journey_core::{
    indicator_view, visible_scene_text, Camera, DeviceHints, IndicatorView, NavigationEvent,
    Navigator, ProgressUpdate, SceneId, SceneText, ZoomDirection, ZoomStatus, SCENE_ORDER,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneTexture {
    pub scene: SceneId,
    pub offset: Vec2,
    pub repeat: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HintView {
    pub device_active: bool,
    pub scroll: bool,
    pub fullscreen: bool,
}

impl HintView {
    pub fn from_hints(hints: &DeviceHints, now_sec: f64) -> Self {
        Self {
            device_active: hints.device_active(),
            scroll: hints.show_scroll_hint(now_sec),
            fullscreen: hints.show_fullscreen_hint(now_sec),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub scene: SceneId,
    pub scene_zoomed: ZoomStatus,
    pub zoom_direction: Option<ZoomDirection>,
    pub transition: Option<ProgressUpdate>,
    pub camera: Camera,
    pub textures: Vec<SceneTexture>,
    pub scene_text: Option<SceneText>,
    pub indicator: IndicatorView,
    pub hints: HintView,
    pub fullscreen: bool,
    pub velocity: f32,
}

pub fn frame_snapshot(nav: &Navigator, hints: &DeviceHints, now_sec: f64) -> FrameSnapshot {
    let state = nav.state();
    let transition_progress = nav.transition_progress();
    let transition = state
        .active_transition()
        .zip(transition_progress)
        .map(|(active, progress)| ProgressUpdate {
            scene: active.scene,
            direction: active.direction,
            progress,
        });
    let textures = SCENE_ORDER
        .iter()
        .filter(|scene| nav.image_target(**scene).is_some())
        .map(|scene| {
            let t = nav.stage().texture(*scene);
            SceneTexture {
                scene: *scene,
                offset: t.offset,
                repeat: t.repeat,
            }
        })
        .collect();
    FrameSnapshot {
        scene: state.current_scene(),
        scene_zoomed: state.scene_zoomed(),
        zoom_direction: state.zoom_direction(),
        transition,
        camera: nav.stage().camera.clone(),
        textures,
        scene_text: visible_scene_text(state),
        indicator: indicator_view(state, transition_progress, &nav.config().base_url),
        hints: HintView::from_hints(hints, now_sec),
        fullscreen: state.fullscreen_active(),
        velocity: nav.physics().velocity(),
    }
}

/// Page-facing form of a transition event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionDetail {
    pub kind: &'static str,
    pub scene: SceneId,
    pub direction: ZoomDirection,
    pub to: Option<SceneId>,
}

/// `None` for per-frame progress, which travels in the frame snapshot.
pub fn transition_detail(event: &NavigationEvent) -> Option<TransitionDetail> {
    let detail = match *event {
        NavigationEvent::Progress(_) => return None,
        NavigationEvent::TransitionStarted { scene, direction } => TransitionDetail {
            kind: "started",
            scene,
            direction,
            to: None,
        },
        NavigationEvent::TransitionReversed { scene, direction } => TransitionDetail {
            kind: "reversed",
            scene,
            direction,
            to: None,
        },
        NavigationEvent::TransitionCompleted(outcome) => TransitionDetail {
            kind: "completed",
            scene: outcome.scene,
            direction: outcome.direction,
            to: Some(outcome.to),
        },
    };
    Some(detail)
}
