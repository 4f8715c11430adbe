#![cfg(target_arch = "wasm32")]
use instant::Instant;
use journey_core::{DeviceHints, DeviceProfile, JourneyConfig, Navigator};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

mod bridge;
mod constants;
mod dom;
mod events;
mod fallback;
mod frame;
mod input;
mod overlay;
mod snapshot;

use constants::CONFIG_PATH;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    fallback::install_panic_hook();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("portfolio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                fallback::show(&document, &format!("{e:#}"));
            }
        }
    });
    Ok(())
}

/// Directory of the page base URL (`<base href>` when present).
fn base_url(document: &web::Document) -> String {
    let uri = document.base_uri().ok().flatten().unwrap_or_default();
    match uri.rfind('/') {
        Some(i) => uri[..=i].to_string(),
        None => "/".to_string(),
    }
}

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let opts = web::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web::RequestMode::SameOrigin);
    let request = web::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| anyhow::anyhow!("request error: {:?}", e))?;
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| anyhow::anyhow!("fetch error: {:?}", e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("response is not a Response"))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {}", resp.status());
    }
    let text = JsFuture::from(resp.text().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("body error: {:?}", e))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("body is not text"))
}

/// Runtime config, or the built-in defaults when none is deployed.
async fn load_config(base: &str) -> JourneyConfig {
    let url = journey_core::asset_path(base, CONFIG_PATH);
    let loaded = fetch_text(&url)
        .await
        .and_then(|json| JourneyConfig::from_json(&json).map_err(anyhow::Error::from));
    match loaded {
        Ok(mut config) => {
            log::info!("[config] loaded {url}");
            if config.base_url == JourneyConfig::default().base_url {
                config.base_url = base.to_string();
            }
            config
        }
        Err(e) => {
            log::warn!("[config] {url}: {e:#}; using defaults");
            JourneyConfig {
                base_url: base.to_string(),
                ..JourneyConfig::default()
            }
        }
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let base = base_url(&document);
    fallback::wire_buttons(&document, &base);

    let width = dom::viewport_size().map(|(w, _)| w).unwrap_or(1280.0);
    let device = DeviceProfile::detect(width, dom::has_touch());
    let config = load_config(&base).await.with_device(device);

    let navigator = Rc::new(RefCell::new(Navigator::new(config)));
    let transitions: Rc<RefCell<Vec<snapshot::TransitionDetail>>> = Rc::default();
    {
        let transitions = transitions.clone();
        navigator.borrow_mut().subscribe(move |event| {
            if let Some(detail) = snapshot::transition_detail(event) {
                transitions.borrow_mut().push(detail);
            }
        });
    }
    bridge::install(navigator.clone());

    let input = Rc::new(RefCell::new(input::InputQueue::default()));
    events::wire_resize(navigator.clone());
    events::wire_wheel(input.clone());
    events::wire_touch(input.clone());
    events::wire_global_keydown(input.clone(), navigator.clone());
    events::wire_fullscreen_toggle(&document, navigator.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        navigator,
        input,
        transitions,
        hints: DeviceHints::default(),
        document,
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    log::info!("[init] journey running ({device:?})");
    Ok(())
}
