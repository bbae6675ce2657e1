// DOM hooks the page provides
pub const CANVAS_ID: &str = "webgl";
pub const START_BUTTON_ID: &str = "start-btn";
pub const START_OVERLAY_ID: &str = "start-overlay";
pub const MAGNETIC_SELECTOR: &str = ".magnetic";

// Matches the overlay's CSS opacity transition
pub const OVERLAY_FADE_MS: i32 = 700;

// Canvas backing store never exceeds 2 device pixels per CSS pixel
pub const MAX_PIXEL_RATIO: f64 = 2.0;
