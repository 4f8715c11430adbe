use crate::input::{normalize_wheel_delta, InputQueue, TouchTracker};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Non-passive so the page itself never scrolls.
fn listener_options() -> web::AddEventListenerOptions {
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    opts
}

fn add_listener(target: &web::EventTarget, kind: &str, callback: &js_sys::Function) {
    if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        callback,
        &listener_options(),
    ) {
        log::warn!("[input] failed to listen for {kind}: {e:?}");
    }
}

pub fn wire_wheel(queue: Rc<RefCell<InputQueue>>) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        let page_height = crate::dom::viewport_size()
            .map(|(_, h)| h as f32)
            .unwrap_or(0.0);
        let units = normalize_wheel_delta(ev.delta_y(), ev.delta_mode(), page_height);
        queue.borrow_mut().push_wheel(units);
    }) as Box<dyn FnMut(web::WheelEvent)>);
    add_listener(&window, "wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_touch(queue: Rc<RefCell<InputQueue>>) {
    let Some(window) = web::window() else {
        return;
    };
    let tracker = Rc::new(RefCell::new(TouchTracker::default()));

    {
        let tracker = tracker.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            if let Some(touch) = ev.touches().get(0) {
                tracker.borrow_mut().start(touch.client_y() as f32);
            }
        }) as Box<dyn FnMut(web::TouchEvent)>);
        add_listener(&window, "touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let tracker = tracker.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            ev.prevent_default();
            if let Some(touch) = ev.touches().get(0) {
                let units = tracker.borrow_mut().move_to(touch.client_y() as f32);
                queue.borrow_mut().push_touch(units);
            }
        }) as Box<dyn FnMut(web::TouchEvent)>);
        add_listener(&window, "touchmove", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    for kind in ["touchend", "touchcancel"] {
        let tracker = tracker.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::TouchEvent| {
            tracker.borrow_mut().end();
        }) as Box<dyn FnMut(web::TouchEvent)>);
        add_listener(&window, kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
