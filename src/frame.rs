use crate::bridge;
use crate::input::InputQueue;
use crate::overlay;
use crate::snapshot::{frame_snapshot, TransitionDetail};
use instant::Instant;
use journey_core::{DeviceHints, Navigator};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub navigator: Rc<RefCell<Navigator>>,
    pub input: Rc<RefCell<InputQueue>>,
    /// Filled by the navigator subscriber during `tick`.
    pub transitions: Rc<RefCell<Vec<TransitionDetail>>>,
    pub hints: DeviceHints,
    pub document: web::Document,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now_sec = self.started.elapsed().as_secs_f64();
        let sample = self.input.borrow_mut().drain();

        let snapshot = {
            let Ok(mut nav) = self.navigator.try_borrow_mut() else {
                // still borrowed by a listener; input stays queued for next frame
                self.input.borrow_mut().restore(sample);
                return;
            };
            let report = nav.tick(&sample, now_sec);
            if let Some(progress) = report.progress {
                log::trace!(
                    "[frame] {} {:?} {:.3} v={:.4}",
                    progress.scene,
                    progress.direction,
                    progress.progress,
                    report.physics.velocity
                );
            }
            self.hints.update(nav.state(), now_sec);
            frame_snapshot(&nav, &self.hints, now_sec)
        };

        overlay::render(&self.document, &snapshot);
        let transitions = std::mem::take(&mut *self.transitions.borrow_mut());
        bridge::publish_transitions(transitions);
        bridge::publish_frame(snapshot);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
