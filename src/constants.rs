//! Grid, ambient and interaction tuning constants.
//!
//! These are the defaults gathered by `AmbientConfig::default()`. They were
//! tuned by eye; keep them as visual defaults rather than derived values.

// Grid metrics (CSS pixels)
pub const FONT_SIZE: f32 = 16.0;
pub const LINE_HEIGHT: f32 = FONT_SIZE * 1.7;
pub const CHAR_WIDTH: f32 = FONT_SIZE * 0.62;
pub const GLYPH_ALPHABET: &str = "{}[]·:.-+*<>/|";

// Glyph drift (interval timer, web only)
pub const DRIFT_INTERVAL_MS: i32 = 400;

// Per-frame brightness decay for cells outside the spotlight
pub const FADE_STEP: f32 = 0.0015;

// Dappled light field
pub const DAPPLE_ALPHA_LIGHT: f32 = 0.2;
pub const DAPPLE_ALPHA_DARK: f32 = 0.12;
pub const DAPPLE_FADE_SPEED: f32 = 0.04; // per-frame easing of dapple presence
pub const DAPPLE_RETURN_DELAY_MS: f64 = 800.0;
pub const DAPPLE_MIN_WRITE: f32 = 0.01; // contributions below this are dropped

// Spotlight
pub const BRIGHT_ALPHA_LIGHT: f32 = 0.45;
pub const BRIGHT_ALPHA_DARK: f32 = 0.3;
pub const SPOTLIGHT_RADIUS_MIN: f32 = 180.0;
pub const SPOTLIGHT_RADIUS_MAX: f32 = 300.0;
pub const SPOTLIGHT_RADIUS_SPEED_GAIN: f32 = 90.0; // px of radius per px/ms of pointer speed
pub const SPOTLIGHT_RADIUS_SMOOTHING: f32 = 0.12; // new = old + α*(target-old)
pub const SPOTLIGHT_SPEED_DECAY: f32 = 0.9; // per-frame pointer speed decay
pub const SPOTLIGHT_IDLE_TIMEOUT_MS: f64 = 800.0;
pub const ACCENT_MIN_INTENSITY: f32 = 0.4;
pub const ACCENT_CHANCE: f32 = 0.08;

// Highlight text
pub const HL_REVEAL_SPEED: f32 = 0.025;
pub const HL_FADE_OUT_SPEED: f32 = 0.035;
pub const HL_SWEEP_MULTIPLIER: f32 = 1.3; // finishes the sweep before progress caps
pub const HL_SWEEP_SHARPNESS: f32 = 4.0;
pub const HL_LIT_ALPHA: u8 = 20; // mask alpha above which a cell counts as text
pub const HL_ALPHA_LIGHT: f32 = 0.85;
pub const HL_ALPHA_DARK: f32 = 0.82;
pub const HL_REVEAL_MIN_INTENSITY: f32 = 0.3;
pub const HL_RETREAT_MAX_INTENSITY: f32 = 0.1;
pub const HL_VISIBLE_MIN_INTENSITY: f32 = 0.01;
pub const HL_FONT_SCALE: f32 = 0.75; // font size as a fraction of grid rows
pub const HL_ADVANCE_SCALE: f32 = 0.85; // fixed letter advance as a fraction of font size
pub const HL_LEFT_PAD_SCALE: f32 = 0.35; // minimum start x as a fraction of font size

// Text proximity dimming
pub const DIM_FLOOR: f32 = 0.25;
pub const DIM_FALLOFF_PX: f32 = 48.0;

// Leaf shadows
pub const LEAF_COUNT: usize = 14;
pub const LEAF_OCCLUDE_DEPTH: f32 = 0.15;

// Glyph colours
pub const BASE_COLOR_LIGHT: &str = "rgb(60, 60, 60)";
pub const BASE_COLOR_DARK: &str = "rgb(200, 200, 200)";
pub const ACCENT_COLOR: &str = "rgb(45, 125, 154)";
pub const ACCENT_COLOR_ALT: &str = "rgb(196, 99, 106)";
