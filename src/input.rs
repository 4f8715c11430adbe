// Browser input normalization: wheel delta modes, touch drags and key
// bindings, queued between animation frames.

use crate::constants::*;
use journey_core::InputSample;

/// `WheelEvent.deltaMode` values.
pub const DOM_DELTA_PIXEL: u32 = 0;
pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;

/// Convert a raw `deltaY` into wheel units. Positive scrolls forward.
#[inline]
pub fn normalize_wheel_delta(delta_y: f64, delta_mode: u32, page_height_px: f32) -> f32 {
    let pixels = match delta_mode {
        DOM_DELTA_LINE => delta_y as f32 * PIXELS_PER_LINE,
        DOM_DELTA_PAGE => {
            let page = if page_height_px > 0.0 {
                page_height_px
            } else {
                FALLBACK_PAGE_HEIGHT_PX
            };
            delta_y as f32 * page
        }
        _ => delta_y as f32,
    };
    if !pixels.is_finite() {
        return 0.0;
    }
    (pixels * WHEEL_UNITS_PER_PIXEL).clamp(-MAX_WHEEL_UNITS_PER_EVENT, MAX_WHEEL_UNITS_PER_EVENT)
}

/// Follows one finger and turns its vertical motion into touch units.
#[derive(Default, Clone, Copy, Debug)]
pub struct TouchTracker {
    last_y: Option<f32>,
}

impl TouchTracker {
    pub fn start(&mut self, y: f32) {
        self.last_y = Some(y);
    }

    /// Units for a move to `y`. Dragging the finger up moves forward.
    pub fn move_to(&mut self, y: f32) -> f32 {
        let delta = match self.last_y {
            Some(prev) => (prev - y) * TOUCH_UNITS_PER_PIXEL,
            None => 0.0,
        };
        self.last_y = Some(y);
        delta
    }

    pub fn end(&mut self) {
        self.last_y = None;
    }

    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.last_y.is_some()
    }
}

/// What a key press asks for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    /// Navigation impulse in wheel units.
    Impulse(f32),
    ExitFullscreen,
    ToggleFullscreen,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "ArrowDown" | " " | "j" | "J" => Some(KeyAction::Impulse(KEY_IMPULSE)),
        "ArrowUp" | "k" | "K" => Some(KeyAction::Impulse(-KEY_IMPULSE)),
        "PageDown" => Some(KeyAction::Impulse(KEY_PAGE_IMPULSE)),
        "PageUp" => Some(KeyAction::Impulse(-KEY_PAGE_IMPULSE)),
        "Escape" => Some(KeyAction::ExitFullscreen),
        "f" | "F" => Some(KeyAction::ToggleFullscreen),
        _ => None,
    }
}

/// Input gathered by the event listeners, drained once per frame.
#[derive(Default, Clone, Copy, Debug)]
pub struct InputQueue {
    pending: InputSample,
}

impl InputQueue {
    pub fn push_wheel(&mut self, units: f32) {
        self.pending.wheel += units;
    }

    pub fn push_touch(&mut self, units: f32) {
        self.pending.touch += units;
    }

    pub fn push_keys(&mut self, units: f32) {
        self.pending.keys += units;
    }

    /// Everything queued since the last drain.
    pub fn drain(&mut self) -> InputSample {
        std::mem::take(&mut self.pending)
    }

    /// Put back a sample that could not be consumed this frame.
    pub fn restore(&mut self, sample: InputSample) {
        self.pending = sample.merged(self.pending);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
