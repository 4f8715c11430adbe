//! Error fallback shown when the journey cannot start or panics.

use crate::constants::*;
use crate::dom;
use web_sys as web;

pub fn show(document: &web::Document, message: &str) {
    dom::set_visible(document, FALLBACK_ID, true);
    if let Some(el) = document.get_element_by_id(FALLBACK_ID) {
        _ = el.set_attribute("data-error", message);
    }
}

/// Reload and "static version" buttons.
pub fn wire_buttons(document: &web::Document, base_url: &str) {
    dom::add_click_listener(document, FALLBACK_RELOAD_ID, || {
        if let Some(w) = web::window() {
            _ = w.location().reload();
        }
    });
    let static_url = journey_core::asset_path(base_url, STATIC_PORTFOLIO_PATH);
    dom::add_click_listener(document, FALLBACK_STATIC_ID, move || {
        if let Some(w) = web::window() {
            _ = w.location().set_href(&static_url);
        }
    });
}

/// Chain a panic hook that reveals the fallback after logging the panic.
pub fn install_panic_hook() {
    console_error_panic_hook::set_once();
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        previous(info);
        if let Some(document) = dom::window_document() {
            show(&document, &info.to_string());
        }
    }));
}
