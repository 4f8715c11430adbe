//! JS-facing surface for the external renderer: the latest frame snapshot,
//! the asset manifest, scene-graph anchors and fullscreen control.

use crate::constants::{FRAME_EVENT, TRANSITION_EVENT};
use crate::snapshot::{FrameSnapshot, TransitionDetail};
use glam::Vec3;
use journey_core::{Navigator, SceneId};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

thread_local! {
    static NAVIGATOR: RefCell<Option<Rc<RefCell<Navigator>>>> = const { RefCell::new(None) };
    static LATEST: RefCell<Option<FrameSnapshot>> = const { RefCell::new(None) };
}

pub fn install(navigator: Rc<RefCell<Navigator>>) {
    NAVIGATOR.with(|n| *n.borrow_mut() = Some(navigator));
}

fn with_navigator<R>(f: impl FnOnce(&mut Navigator) -> R) -> Option<R> {
    let nav = NAVIGATOR.with(|n| n.borrow().clone())?;
    let Ok(mut nav) = nav.try_borrow_mut() else {
        log::warn!("[bridge] navigator busy, call dropped");
        return None;
    };
    Some(f(&mut nav))
}

/// Latest snapshot, or `undefined` before the first frame.
#[wasm_bindgen(js_name = frameSnapshot)]
pub fn frame_snapshot() -> Result<JsValue, JsValue> {
    LATEST.with(|latest| match latest.borrow().as_ref() {
        Some(snapshot) => serde_wasm_bindgen::to_value(snapshot).map_err(JsValue::from),
        None => Ok(JsValue::UNDEFINED),
    })
}

/// Base-URL-joined model, texture and icon URLs for a scene key such as
/// `"room"`.
#[wasm_bindgen(js_name = sceneAssets)]
pub fn scene_assets(scene: &str) -> Result<JsValue, JsValue> {
    let scene = SceneId::from_key(scene)
        .ok_or_else(|| JsValue::from_str(&format!("unknown scene {scene}")))?;
    let assets = with_navigator(|nav| nav.scene_assets(scene))
        .ok_or_else(|| JsValue::from_str("navigator not ready"))?;
    serde_wasm_bindgen::to_value(&assets).map_err(JsValue::from)
}

/// Report a named scene-graph position, e.g. the `DeskTop` node once the
/// room model has loaded.
#[wasm_bindgen(js_name = registerAnchor)]
pub fn register_anchor(name: &str, x: f32, y: f32, z: f32) {
    if with_navigator(|nav| nav.register_anchor(name, Vec3::new(x, y, z))).is_none() {
        log::warn!("[bridge] anchor {name} reported before the navigator is ready");
    }
}

#[wasm_bindgen(js_name = setFullscreen)]
pub fn set_fullscreen(active: bool) -> bool {
    with_navigator(|nav| nav.set_fullscreen(active)).unwrap_or(false)
}

#[wasm_bindgen(js_name = teardown)]
pub fn teardown() {
    with_navigator(|nav| nav.teardown());
}

fn dispatch<T: Serialize>(kind: &str, detail: &T) {
    let Some(window) = web::window() else {
        return;
    };
    let value = match serde_wasm_bindgen::to_value(detail) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("[bridge] {kind} detail: {e}");
            return;
        }
    };
    let init = web::CustomEventInit::new();
    init.set_detail(&value);
    if let Ok(ev) = web::CustomEvent::new_with_event_init_dict(kind, &init) {
        _ = window.dispatch_event(&ev);
    }
}

pub fn publish_frame(snapshot: FrameSnapshot) {
    dispatch(FRAME_EVENT, &snapshot);
    LATEST.with(|latest| *latest.borrow_mut() = Some(snapshot));
}

/// Dispatch queued transition events. Runs after the frame releases the
/// navigator, so page handlers may call back into the bridge.
pub fn publish_transitions(details: Vec<TransitionDetail>) {
    for detail in &details {
        dispatch(TRANSITION_EVENT, detail);
    }
}
