/// Input normalization and DOM wiring constants.
///
/// Browser deltas arrive in pixels, lines or pages; everything is converted to
/// wheel units before it reaches the physics engine.
// Wheel units per pixel of WheelEvent.deltaY (one mouse notch is ~100px)
pub const WHEEL_UNITS_PER_PIXEL: f32 = 0.025;
pub const PIXELS_PER_LINE: f32 = 16.0; // DOM_DELTA_LINE
pub const FALLBACK_PAGE_HEIGHT_PX: f32 = 800.0; // DOM_DELTA_PAGE when the viewport is unknown

// Trackpads can fire huge deltas in one event; clamp per event (in wheel units)
pub const MAX_WHEEL_UNITS_PER_EVENT: f32 = 10.0;

// Touch drag: finger moving up by one pixel counts as this many touch units
pub const TOUCH_UNITS_PER_PIXEL: f32 = 0.08;

// Keyboard impulse, in wheel units per key press
pub const KEY_IMPULSE: f32 = 2.5;
pub const KEY_PAGE_IMPULSE: f32 = 6.0; // PageUp / PageDown

// Relative location of the runtime config, joined to the base URL
pub const CONFIG_PATH: &str = "config/navigation.json";

// CustomEvents dispatched on window
pub const FRAME_EVENT: &str = "navigation-frame";
pub const TRANSITION_EVENT: &str = "navigation-transition"; // started, reversed, completed

// Element ids
pub const SCENE_TEXT_ID: &str = "scene-text";
pub const SCENE_HEADER_ID: &str = "scene-text-header";
pub const SCENE_SUB_ID: &str = "scene-text-sub";
pub const INDICATOR_ID: &str = "zoom-progress";
pub const INDICATOR_CHARACTER_ID: &str = "zoom-progress-character";
pub const SCROLL_HINT_ID: &str = "device-scroll-hint";
pub const FULLSCREEN_HINT_ID: &str = "device-fullscreen-hint";
pub const FULLSCREEN_TOGGLE_ID: &str = "device-fullscreen-toggle";
pub const FALLBACK_ID: &str = "error-fallback";
pub const FALLBACK_RELOAD_ID: &str = "error-fallback-reload";
pub const FALLBACK_STATIC_ID: &str = "error-fallback-static";

// Where the "static version" fallback action navigates to
pub const STATIC_PORTFOLIO_PATH: &str = "static/index.html";

// Class toggled on <body> while the device content is fullscreen
pub const FULLSCREEN_CLASS: &str = "device-fullscreen";
