use super::geom::Rect;
use super::grid::Grid;
use super::highlight::HighlightState;
use super::leaves::LeafField;
use crate::config::{DimTuning, HighlightTuning};
use crate::constants::{ACCENT_COLOR, ACCENT_COLOR_ALT, BASE_COLOR_DARK, BASE_COLOR_LIGHT};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Pick the light- or dark-background variant of a tuning value.
    #[inline]
    pub fn pick<T>(self, light: T, dark: T) -> T {
        match self {
            ColorScheme::Light => light,
            ColorScheme::Dark => dark,
        }
    }

    pub fn color(self, tone: Tone) -> &'static str {
        match tone {
            Tone::Base => self.pick(BASE_COLOR_LIGHT, BASE_COLOR_DARK),
            Tone::Accent => ACCENT_COLOR,
            Tone::AccentAlt => ACCENT_COLOR_ALT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Base,
    Accent,
    AccentAlt,
}

/// Receives one frame of glyphs. Coordinates are CSS pixels, glyphs are
/// top-aligned at their cell origin.
pub trait GlyphSink {
    fn begin_frame(&mut self, width: f32, height: f32, scheme: ColorScheme);
    fn glyph(&mut self, ch: char, x: f32, y: f32, alpha: f32, tone: Tone);
    fn end_frame(&mut self);
}

/// Render-time dimming near real page text. Never written back into the
/// brightness buffer.
#[derive(Clone, Debug, Default)]
pub struct DimMask {
    regions: SmallVec<[Rect; 4]>,
    factors: Vec<f32>,
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

impl DimMask {
    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    pub fn set_regions(&mut self, regions: impl IntoIterator<Item = Rect>) {
        self.regions.clear();
        self.regions.extend(regions);
    }

    /// Recompute per-cell factors; called on resize and when regions change.
    pub fn rebuild(&mut self, grid: &Grid, tuning: &DimTuning) {
        self.factors.clear();
        if self.regions.is_empty() {
            return;
        }
        self.factors.reserve(grid.len());
        for i in 0..grid.len() {
            let p = grid.cell_center(i);
            let d = self
                .regions
                .iter()
                .map(|r| r.distance_to(p))
                .fold(f32::INFINITY, f32::min);
            let f = tuning.floor + (1.0 - tuning.floor) * smoothstep(0.0, tuning.falloff_px, d);
            self.factors.push(f);
        }
    }

    #[inline]
    pub fn factor(&self, i: usize) -> f32 {
        self.factors.get(i).copied().unwrap_or(1.0)
    }
}

/// Everything the draw pass reads.
pub struct Layers<'a> {
    pub grid: &'a Grid,
    pub dim: &'a DimMask,
    pub leaves: &'a LeafField,
    pub highlight: &'a HighlightState,
    pub highlight_tuning: &'a HighlightTuning,
}

/// Draw every visible cell into `sink`; returns the number of glyphs drawn.
pub fn draw(
    layers: &Layers<'_>,
    width: f32,
    height: f32,
    scheme: ColorScheme,
    sink: &mut impl GlyphSink,
) -> usize {
    let grid = layers.grid;
    let chars = grid.chars();
    let accent = grid.accent();
    let mut drawn = 0;
    sink.begin_frame(width, height, scheme);
    for (i, &b) in grid.brightness().iter().enumerate() {
        if b <= 0.0 {
            continue;
        }
        let Some(leaf) = layers.leaves.visibility(i) else {
            continue;
        };
        let alpha = b * leaf * layers.dim.factor(i);
        if alpha <= 0.0 {
            continue;
        }
        let tone = if accent[i] && !layers.highlight.is_lit_cell(i, layers.highlight_tuning) {
            if i % 3 == 0 {
                Tone::AccentAlt
            } else {
                Tone::Accent
            }
        } else {
            Tone::Base
        };
        let origin = grid.cell_origin(i);
        sink.glyph(chars[i], origin.x, origin.y, alpha, tone);
        drawn += 1;
    }
    sink.end_frame();
    drawn
}
