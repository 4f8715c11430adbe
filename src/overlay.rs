//! DOM rendering of the scene text, the zoom progress indicator and the
//! device hints.

use crate::constants::*;
use crate::dom;
use crate::snapshot::{FrameSnapshot, HintView};
use journey_core::{IndicatorView, SceneText};
use web_sys as web;

pub fn render(document: &web::Document, snapshot: &FrameSnapshot) {
    render_scene_text(document, snapshot.scene_text.as_ref());
    render_indicator(document, &snapshot.indicator);
    render_hints(document, &snapshot.hints);
    set_fullscreen_class(document, snapshot.fullscreen);
}

fn render_scene_text(document: &web::Document, text: Option<&SceneText>) {
    match text {
        Some(text) => {
            dom::set_text(document, SCENE_HEADER_ID, text.header);
            dom::set_text(document, SCENE_SUB_ID, text.sub);
            dom::set_visible(document, SCENE_TEXT_ID, true);
        }
        None => dom::set_visible(document, SCENE_TEXT_ID, false),
    }
}

/// Markers are `[data-marker="<key>"]` children of the indicator; the
/// progress bar height is exposed as the `--progress` custom property.
fn render_indicator(document: &web::Document, view: &IndicatorView) {
    let Some(root) = document.get_element_by_id(INDICATOR_ID) else {
        return;
    };
    _ = root.set_attribute("style", &format!("--progress: {:.2}%", view.progress));
    for marker in &view.markers {
        let selector = format!("[data-marker=\"{}\"]", marker.key);
        if let Ok(Some(el)) = root.query_selector(&selector) {
            dom::set_class(&el, "active", marker.active);
        }
    }
    if let Some(character) = document.get_element_by_id(INDICATOR_CHARACTER_ID) {
        if character.get_attribute("src").as_deref() != Some(view.character_icon.as_str()) {
            _ = character.set_attribute("src", &view.character_icon);
        }
        _ = character.set_attribute("style", &format!("top: {:.2}%", view.progress));
    }
}

fn render_hints(document: &web::Document, hints: &HintView) {
    dom::set_visible(document, SCROLL_HINT_ID, hints.device_active && hints.scroll);
    dom::set_visible(
        document,
        FULLSCREEN_HINT_ID,
        hints.device_active && hints.fullscreen,
    );
    dom::set_visible(document, FULLSCREEN_TOGGLE_ID, hints.device_active);
}

fn set_fullscreen_class(document: &web::Document, on: bool) {
    if let Some(body) = document.body() {
        dom::set_class(&body, FULLSCREEN_CLASS, on);
    }
}
