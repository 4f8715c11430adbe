pub mod keyboard;
pub mod scroll;

pub use keyboard::*;
pub use scroll::*;

use crate::dom;
use journey_core::Navigator;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keep the camera aspect in step with the viewport.
pub fn wire_resize(navigator: Rc<RefCell<Navigator>>) {
    let sync = move || {
        if let Some((w, h)) = dom::viewport_size() {
            if h > 0.0 {
                navigator.borrow_mut().set_aspect((w / h) as f32);
            }
        }
    };
    sync();
    let closure = Closure::wrap(Box::new(sync) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
