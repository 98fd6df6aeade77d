// Shared helpers for the host-side tests.
#![allow(dead_code)]

use ascii_ambient::config::AmbientConfig;
use ascii_ambient::constants::{CHAR_WIDTH, LINE_HEIGHT};
use ascii_ambient::core::{ColorScheme, GlyphSink, RendererState, Tone, Viewport};

pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Viewport that yields exactly `cols x rows` cells with default metrics.
pub fn viewport_for(cols: usize, rows: usize) -> Viewport {
    Viewport::new(
        cols as f32 * CHAR_WIDTH + CHAR_WIDTH * 0.5,
        rows as f32 * LINE_HEIGHT + LINE_HEIGHT * 0.5,
    )
}

pub fn state_with(cols: usize, rows: usize, config: AmbientConfig) -> RendererState {
    RendererState::create(viewport_for(cols, rows), config, 7)
}

pub fn state(cols: usize, rows: usize) -> RendererState {
    state_with(cols, rows, AmbientConfig::default())
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawnGlyph {
    pub ch: char,
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
    pub tone: Tone,
}

#[derive(Default)]
pub struct RecordingSink {
    pub frames: usize,
    pub scheme: Option<ColorScheme>,
    pub glyphs: Vec<DrawnGlyph>,
}

impl GlyphSink for RecordingSink {
    fn begin_frame(&mut self, _width: f32, _height: f32, scheme: ColorScheme) {
        self.frames += 1;
        self.scheme = Some(scheme);
        self.glyphs.clear();
    }

    fn glyph(&mut self, ch: char, x: f32, y: f32, alpha: f32, tone: Tone) {
        self.glyphs.push(DrawnGlyph {
            ch,
            x,
            y,
            alpha,
            tone,
        });
    }

    fn end_frame(&mut self) {}
}
