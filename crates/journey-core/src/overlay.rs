//! View models for the overlays drawn over the 3D view: scene text, the zoom
//! progress indicator and the device hints. All of them are pure reads of the
//! navigation state.

use crate::config::{FULLSCREEN_HINT_TIMEOUT_SEC, SCROLL_HINT_TIMEOUT_SEC};
use crate::scene::{
    asset_path, scene_assets, SceneId, ASTRONAUT_ICON, END_MARKER_ICON, HUMAN_ICON, SCENE_ORDER,
    SUPERHERO_ICON,
};
use crate::state::NavigationState;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SceneText {
    pub header: &'static str,
    pub sub: &'static str,
}

pub fn scene_text(scene: SceneId) -> SceneText {
    let (header, sub) = match scene {
        SceneId::Galaxy => ("Milky Way", "Galaxy"),
        SceneId::SolarSystemApproach => ("Interstellar Space", "Orion Arm"),
        SceneId::SolarSystemRotation => ("Solar System", "Star System"),
        SceneId::EarthApproach => ("Earth Vicinity", "Near Space"),
        SceneId::Earth => ("Earth", "Planet"),
        SceneId::Continent => ("GCC", "Continent"),
        SceneId::City => ("United Arab Emirates", "Country"),
        SceneId::District => ("Dubai", "City"),
        SceneId::Room => ("My Studio", "Workspace"),
    };
    SceneText { header, sub }
}

/// Text to show for the current state. Nothing while the device content fills
/// the view.
pub fn visible_scene_text(state: &NavigationState) -> Option<SceneText> {
    if state.terminal_zoomed_in() {
        None
    } else {
        Some(scene_text(state.current_scene()))
    }
}

/// Number of indicator markers: every scene plus the zoomed-in end.
pub const MARKER_COUNT: usize = SCENE_ORDER.len() + 1;

/// Share of the indicator covered by one scene, in percent.
pub const SEGMENT_PERCENT: f32 = 100.0 / (MARKER_COUNT - 1) as f32;

/// Marker index the traveller is at: the current scene, or the end marker
/// once the last scene is zoomed in.
pub fn reached_marker(state: &NavigationState) -> usize {
    if state.terminal_zoomed_in() {
        MARKER_COUNT - 1
    } else {
        state.current_scene().index()
    }
}

/// Overall journey progress in percent.
///
/// `transition_progress` is the position of the in-flight zoom, if any. The
/// zoom of scene K covers the segment from marker K to marker K + 1.
pub fn overall_progress(state: &NavigationState, transition_progress: Option<f32>) -> f32 {
    let base = match (state.active_transition(), transition_progress) {
        (Some(active), Some(t)) => active.scene.index() as f32 + t.clamp(0.0, 1.0),
        _ => reached_marker(state) as f32,
    };
    (base / (MARKER_COUNT - 1) as f32 * 100.0).clamp(0.0, 100.0)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Scene key, or `"end"` for the last marker.
    pub key: &'static str,
    /// Icon URL joined to the base URL.
    pub icon: String,
    /// Offset from the top of the indicator, in percent.
    pub position: f32,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorView {
    pub markers: Vec<Marker>,
    pub progress: f32,
    pub character_icon: String,
}

/// Character drawn at the progress position. It changes as the journey gets
/// closer to the ground.
pub fn character_icon(marker: usize) -> &'static str {
    if marker < 5 {
        ASTRONAUT_ICON
    } else if marker < 8 {
        SUPERHERO_ICON
    } else {
        HUMAN_ICON
    }
}

/// Indicator state with icon paths resolved against `base_url`.
pub fn indicator_view(
    state: &NavigationState,
    transition_progress: Option<f32>,
    base_url: &str,
) -> IndicatorView {
    let reached = reached_marker(state);
    let mut markers: Vec<Marker> = SCENE_ORDER
        .iter()
        .map(|scene| Marker {
            key: scene.key(),
            icon: asset_path(base_url, scene_assets(*scene).icon),
            position: scene.index() as f32 * SEGMENT_PERCENT,
            active: reached >= scene.index(),
        })
        .collect();
    markers.push(Marker {
        key: "end",
        icon: asset_path(base_url, END_MARKER_ICON),
        position: 100.0,
        active: reached >= MARKER_COUNT - 1,
    });
    IndicatorView {
        markers,
        progress: overall_progress(state, transition_progress),
        character_icon: asset_path(base_url, character_icon(state.current_scene().index())),
    }
}

/// Timers for the hints shown over the zoomed-in device. Both hints appear
/// when the device is reached and fade after their timeout; leaving the
/// device resets them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeviceHints {
    zoomed_in_since: Option<f64>,
}

impl DeviceHints {
    pub fn update(&mut self, state: &NavigationState, now_sec: f64) {
        if state.terminal_zoomed_in() {
            if self.zoomed_in_since.is_none() {
                self.zoomed_in_since = Some(now_sec);
            }
        } else {
            self.zoomed_in_since = None;
        }
    }

    fn elapsed(&self, now_sec: f64) -> Option<f64> {
        self.zoomed_in_since.map(|since| now_sec - since)
    }

    /// Hints only render over the zoomed-in device, and stay visible
    /// (reset) whenever it is not.
    pub fn show_scroll_hint(&self, now_sec: f64) -> bool {
        self.elapsed(now_sec)
            .map_or(true, |e| e < SCROLL_HINT_TIMEOUT_SEC)
    }

    pub fn show_fullscreen_hint(&self, now_sec: f64) -> bool {
        self.elapsed(now_sec)
            .map_or(true, |e| e < FULLSCREEN_HINT_TIMEOUT_SEC)
    }

    #[inline]
    pub fn device_active(&self) -> bool {
        self.zoomed_in_since.is_some()
    }
}
