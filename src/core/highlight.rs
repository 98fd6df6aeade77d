//! Highlight text: a short word rasterised into a per-cell alpha mask that is
//! revealed cell by cell, and dissolved again when the word changes.
//!
//! Reveal and dissolve never overlap. When the text changes, the outgoing mask
//! becomes the fading mask and the new word's reveal progress is held at zero
//! until every cell of the old word has drained.

use super::grid::Grid;
use super::hash::reveal_threshold;
use crate::config::HighlightTuning;
use crate::constants::{HL_ADVANCE_SCALE, HL_FONT_SCALE, HL_LEFT_PAD_SCALE, HL_VISIBLE_MIN_INTENSITY};

/// What the page wants highlighted right now. Owned by the caller and handed
/// to every frame; the renderer only reads it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightRequest {
    pub text: String,
    /// 0 (hidden) to 1 (fully visible).
    pub intensity: f32,
}

impl HighlightRequest {
    pub fn new(text: impl Into<String>, intensity: f32) -> Self {
        Self {
            text: text.into(),
            intensity,
        }
    }
}

/// Glyph placement for a highlight word on a `cols x rows` bitmap, one pixel
/// per cell. Letters use a fixed advance so the word keeps its rhythm even
/// when it overflows the right edge; it never starts left of the edge.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskLayout {
    pub text: String,
    pub font_size: f32,
    pub advance: f32,
    pub start_x: f32,
    pub center_y: f32,
}

impl MaskLayout {
    pub fn for_text(text: &str, cols: usize, rows: usize) -> Self {
        let text = text.to_uppercase();
        let font_size = rows as f32 * HL_FONT_SCALE;
        let advance = font_size * HL_ADVANCE_SCALE;
        let n = text.chars().count();
        let total = n.saturating_sub(1) as f32 * advance;
        let start_x = (font_size * HL_LEFT_PAD_SCALE).max((cols as f32 - total) / 2.0);
        Self {
            text,
            font_size,
            advance,
            start_x,
            center_y: rows as f32 / 2.0,
        }
    }

    /// `(glyph, center_x, center_y)` for every letter.
    pub fn glyphs(&self) -> impl Iterator<Item = (char, f32, f32)> + '_ {
        self.text
            .chars()
            .enumerate()
            .map(move |(i, ch)| (ch, self.start_x + i as f32 * self.advance, self.center_y))
    }
}

/// Turns a [`MaskLayout`] into per-cell alpha. The browser build draws real
/// glyphs into an offscreen canvas; [`BlockRasterizer`] is the portable one.
pub trait TextRasterizer {
    /// Fill `alpha` (`cols * rows`, row-major, already zeroed).
    fn rasterize(&mut self, layout: &MaskLayout, cols: usize, rows: usize, alpha: &mut [u8]);
}

/// Fills a solid box per non-whitespace glyph.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockRasterizer;

impl TextRasterizer for BlockRasterizer {
    fn rasterize(&mut self, layout: &MaskLayout, cols: usize, rows: usize, alpha: &mut [u8]) {
        let half_w = layout.font_size * 0.3;
        let half_h = layout.font_size * 0.4;
        for (ch, cx, cy) in layout.glyphs() {
            if ch.is_whitespace() {
                continue;
            }
            let c0 = (cx - half_w).floor().max(0.0) as usize;
            let c1 = ((cx + half_w).ceil().max(0.0) as usize).min(cols);
            let r0 = (cy - half_h).floor().max(0.0) as usize;
            let r1 = ((cy + half_h).ceil().max(0.0) as usize).min(rows);
            for row in r0..r1 {
                for col in c0..c1 {
                    alpha[row * cols + col] = 255;
                }
            }
        }
    }
}

/// Per-cell alpha of a rasterised word plus the per-cell reveal order.
#[derive(Clone, Debug, Default)]
pub struct HighlightMask {
    alpha: Vec<u8>,
    threshold: Vec<f32>,
}

impl HighlightMask {
    fn rebuild(&mut self, text: &str, cols: usize, rows: usize, rasterizer: &mut dyn TextRasterizer) {
        let n = cols * rows;
        self.alpha.clear();
        self.alpha.resize(n, 0);
        if self.threshold.len() != n {
            self.threshold = (0..n).map(reveal_threshold).collect();
        }
        if n > 0 {
            let layout = MaskLayout::for_text(text, cols, rows);
            rasterizer.rasterize(&layout, cols, rows, &mut self.alpha);
        }
    }

    fn clear(&mut self) {
        self.alpha.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    #[inline]
    pub fn alpha(&self, i: usize) -> u8 {
        self.alpha.get(i).copied().unwrap_or(0)
    }

    #[inline]
    pub fn threshold(&self, i: usize) -> f32 {
        self.threshold.get(i).copied().unwrap_or(0.0)
    }

    pub fn lit_cells(&self, lit_alpha: u8) -> impl Iterator<Item = usize> + '_ {
        self.alpha
            .iter()
            .enumerate()
            .filter(move |(_, &a)| a > lit_alpha)
            .map(|(i, _)| i)
    }
}

/// The outgoing word while it dissolves.
#[derive(Clone, Debug)]
pub struct FadingMask {
    mask: HighlightMask,
    progress: f32,
}

impl FadingMask {
    pub fn mask(&self) -> &HighlightMask {
        &self.mask
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }
}

#[inline]
fn sweep(progress: f32, threshold: f32, tuning: &HighlightTuning) -> f32 {
    ((progress * tuning.sweep_multiplier - threshold) * tuning.sweep_sharpness).clamp(0.0, 1.0)
}

#[derive(Debug, Default)]
pub struct HighlightState {
    text: String,
    current: HighlightMask,
    fading: Option<FadingMask>,
    spare: HighlightMask,
    reveal: f32,
    intensity: f32,
}

impl HighlightState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn current(&self) -> &HighlightMask {
        &self.current
    }

    pub fn fading(&self) -> Option<&FadingMask> {
        self.fading.as_ref()
    }

    pub fn reveal_progress(&self) -> f32 {
        self.reveal
    }

    /// Drop both masks; the current one is rebuilt at the new size on the
    /// next frame. Fading cells are indexed for the old size, so they go.
    pub fn invalidate(&mut self) {
        self.current.clear();
        if let Some(f) = self.fading.take() {
            self.spare = f.mask;
        }
    }

    /// Per-frame scalar update: text change detection, mask rebuild, fade and
    /// reveal progress. Writes nothing into the grid.
    pub fn prepare(
        &mut self,
        request: &HighlightRequest,
        cols: usize,
        rows: usize,
        rasterizer: &mut dyn TextRasterizer,
        tuning: &HighlightTuning,
    ) {
        self.intensity = if request.intensity.is_nan() {
            0.0
        } else {
            request.intensity.clamp(0.0, 1.0)
        };

        if request.text != self.text {
            // A word still dissolving keeps dissolving; the word it would
            // replace was never revealed, since reveal is held at 0 meanwhile.
            if self.fading.is_none() && !self.current.is_empty() {
                let outgoing = std::mem::take(&mut self.current);
                self.current = std::mem::take(&mut self.spare);
                self.fading = Some(FadingMask {
                    mask: outgoing,
                    progress: 0.0,
                });
            }
            log::debug!("[highlight] text {:?} -> {:?}", self.text, request.text);
            self.text.clone_from(&request.text);
            self.current.clear();
            self.reveal = 0.0;
        }

        if self.text.is_empty() {
            self.current.clear();
        } else if self.current.is_empty() && cols * rows > 0 {
            self.current.rebuild(&self.text, cols, rows, rasterizer);
        }

        if let Some(f) = &mut self.fading {
            f.progress = (f.progress + tuning.fade_out_speed).min(1.0);
        }

        if self.fading.is_some() {
            self.reveal = 0.0;
        } else if !self.text.is_empty() && self.intensity > tuning.reveal_min_intensity {
            self.reveal = (self.reveal + tuning.reveal_speed).min(1.0);
        } else if self.reveal > 0.0 && self.intensity < tuning.retreat_max_intensity {
            self.reveal = (self.reveal - tuning.reveal_speed * 2.0).max(0.0);
        }
    }

    /// The current word contributes to this frame.
    #[inline]
    pub fn is_showing(&self) -> bool {
        !self.current.is_empty() && self.intensity > HL_VISIBLE_MIN_INTENSITY && self.reveal > 0.0
    }

    #[inline]
    pub fn cell_reveal(&self, i: usize, tuning: &HighlightTuning) -> f32 {
        sweep(self.reveal, self.current.threshold(i), tuning)
    }

    /// Multiplier for ambient contributions in cell `i`; `None` inside
    /// revealed text, where the ambient field must not write at all.
    #[inline]
    pub fn ambient_factor(&self, i: usize, tuning: &HighlightTuning) -> Option<f32> {
        if !self.is_showing() {
            return Some(1.0);
        }
        let mask = self.current.alpha(i);
        if mask == 0 {
            return Some(1.0);
        }
        let reveal = self.cell_reveal(i, tuning);
        if mask > tuning.lit_alpha && reveal > 0.01 {
            None
        } else if reveal > 0.0 {
            Some(1.0 - (mask as f32 / 255.0) * self.intensity * reveal)
        } else {
            Some(1.0)
        }
    }

    /// Cells the spotlight must skip.
    #[inline]
    pub fn covers(&self, i: usize, tuning: &HighlightTuning) -> bool {
        !self.current.is_empty()
            && self.intensity > tuning.retreat_max_intensity
            && self.reveal > 0.0
            && self.current.alpha(i) > tuning.lit_alpha
    }

    /// Cell belongs to the current word's glyphs (accents are not drawn here).
    #[inline]
    pub fn is_lit_cell(&self, i: usize, tuning: &HighlightTuning) -> bool {
        self.current.alpha(i) > tuning.lit_alpha
    }

    /// Brightness writes: multiplicative dissolve of the fading word, then
    /// max-merge of the revealed part of the current word.
    pub fn apply(&mut self, grid: &mut Grid, amplitude: f32, tuning: &HighlightTuning) {
        let drained = match &self.fading {
            Some(f) => {
                let mut any_left = false;
                for i in 0..grid.len() {
                    if f.mask.alpha(i) <= tuning.lit_alpha || grid.brightness()[i] <= 0.0 {
                        continue;
                    }
                    let clear = sweep(f.progress, f.mask.threshold(i), tuning);
                    if clear > 0.0 {
                        grid.shrink(i, 1.0 - clear);
                    }
                    if grid.brightness()[i] > 0.0 {
                        any_left = true;
                    }
                }
                !any_left || f.progress >= 1.0
            }
            None => false,
        };
        if drained {
            if let Some(done) = self.fading.take() {
                log::debug!("[highlight] dissolve complete at {:.3}", done.progress);
                self.spare = done.mask;
            }
        }

        if !self.is_showing() {
            return;
        }
        let n = grid.len().min(self.current.alpha.len());
        for i in 0..n {
            let mask = self.current.alpha[i];
            if mask <= tuning.lit_alpha {
                continue;
            }
            let reveal = self.cell_reveal(i, tuning);
            if reveal > 0.01 {
                grid.raise(i, (mask as f32 / 255.0) * self.intensity * reveal * amplitude);
            }
        }
    }
}
