use crate::constants::FULLSCREEN_TOGGLE_ID;
use crate::dom;
use crate::input::{key_action, InputQueue, KeyAction};
use journey_core::Navigator;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Flip fullscreen. Only takes effect over the zoomed-in device.
pub fn toggle_fullscreen(navigator: &Rc<RefCell<Navigator>>) {
    let mut nav = navigator.borrow_mut();
    let next = !nav.state().fullscreen_active();
    if nav.set_fullscreen(next) {
        log::info!("[input] fullscreen {}", if next { "on" } else { "off" });
    }
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    queue: &Rc<RefCell<InputQueue>>,
    navigator: &Rc<RefCell<Navigator>>,
) {
    if ev.repeat() && ev.key() != "ArrowDown" && ev.key() != "ArrowUp" {
        return;
    }
    match key_action(&ev.key()) {
        Some(KeyAction::Impulse(units)) => {
            ev.prevent_default();
            queue.borrow_mut().push_keys(units);
        }
        Some(KeyAction::ExitFullscreen) => {
            navigator.borrow_mut().set_fullscreen(false);
        }
        Some(KeyAction::ToggleFullscreen) => toggle_fullscreen(navigator),
        None => {}
    }
}

pub fn wire_global_keydown(queue: Rc<RefCell<InputQueue>>, navigator: Rc<RefCell<Navigator>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &queue, &navigator);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_fullscreen_toggle(document: &web::Document, navigator: Rc<RefCell<Navigator>>) {
    dom::add_click_listener(document, FULLSCREEN_TOGGLE_ID, move || {
        toggle_fullscreen(&navigator);
    });
}
