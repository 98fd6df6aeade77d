use crate::config::GridMetrics;
use glam::Vec2;
use rand::Rng;

/// Viewport size in CSS pixels plus the device pixel ratio of the backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    pub fn with_dpr(mut self, dpr: f32) -> Self {
        self.device_pixel_ratio = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self
    }

    /// Backing store size in device pixels (never zero).
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width.max(0.0) * self.device_pixel_ratio) as u32;
        let h = (self.height.max(0.0) * self.device_pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }
}

/// Character grid covering the viewport.
///
/// `chars`, `brightness` and `accent` always have `cols * rows` entries; they
/// are only ever replaced wholesale by [`Grid::new`].
#[derive(Clone, Debug)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cell: Vec2,
    chars: Vec<char>,
    brightness: Vec<f32>,
    accent: Vec<bool>,
}

#[inline]
fn cells_along(extent: f32, pitch: f32) -> usize {
    // NaN and negative extents saturate to 0 on the cast
    (extent / pitch).floor() as usize
}

impl Grid {
    pub fn new(viewport: Viewport, metrics: &GridMetrics, alphabet: &[char], rng: &mut impl Rng) -> Self {
        let cols = cells_along(viewport.width, metrics.char_width);
        let rows = cells_along(viewport.height, metrics.line_height);
        let n = cols * rows;
        let chars = (0..n).map(|_| random_glyph(alphabet, rng)).collect();
        Self {
            cols,
            rows,
            cell: Vec2::new(metrics.char_width, metrics.line_height),
            chars,
            brightness: vec![0.0; n],
            accent: vec![false; n],
        }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.brightness.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.brightness.is_empty()
    }

    #[inline]
    pub fn cell_size(&self) -> Vec2 {
        self.cell
    }

    #[inline]
    pub fn col_row(&self, i: usize) -> (usize, usize) {
        (i % self.cols, i / self.cols)
    }

    /// Top-left corner of cell `i`, where its glyph is drawn.
    #[inline]
    pub fn cell_origin(&self, i: usize) -> Vec2 {
        let (col, row) = self.col_row(i);
        Vec2::new(col as f32, row as f32) * self.cell
    }

    #[inline]
    pub fn cell_center(&self, i: usize) -> Vec2 {
        self.cell_origin(i) + self.cell * 0.5
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn brightness(&self) -> &[f32] {
        &self.brightness
    }

    pub fn accent(&self) -> &[bool] {
        &self.accent
    }

    /// Max-merge a proposed brightness into cell `i`, clamped to [0, 1].
    #[inline]
    pub fn raise(&mut self, i: usize, value: f32) {
        let v = value.clamp(0.0, 1.0);
        if v > self.brightness[i] {
            self.brightness[i] = v;
        }
    }

    /// Multiplicative shrink; the only write allowed to lower a lit cell
    /// besides the per-frame decay.
    #[inline]
    pub fn shrink(&mut self, i: usize, keep: f32) {
        self.brightness[i] = (self.brightness[i] * keep.clamp(0.0, 1.0)).max(0.0);
    }

    #[inline]
    pub fn set(&mut self, i: usize, value: f32) {
        self.brightness[i] = value.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn mark_accent(&mut self, i: usize) {
        self.accent[i] = true;
    }

    /// Zero brightness and accents, keeping the glyphs.
    pub fn clear_brightness(&mut self) {
        self.brightness.fill(0.0);
        self.accent.fill(false);
    }

    /// Fade every lit cell not flagged in `active` by `step`; accents are
    /// dropped once a cell goes dark.
    pub fn decay(&mut self, active: &[bool], step: f32) {
        for ((b, acc), &on) in self
            .brightness
            .iter_mut()
            .zip(self.accent.iter_mut())
            .zip(active.iter())
        {
            if *b > 0.0 && !on {
                *b = (*b - step).max(0.0);
                if *b <= 0.0 {
                    *acc = false;
                }
            }
        }
    }

    /// Swap one random glyph for another from the alphabet.
    pub fn drift(&mut self, alphabet: &[char], rng: &mut impl Rng) {
        if self.chars.is_empty() {
            return;
        }
        let i = rng.gen_range(0..self.chars.len());
        self.chars[i] = random_glyph(alphabet, rng);
    }
}

#[inline]
fn random_glyph(alphabet: &[char], rng: &mut impl Rng) -> char {
    if alphabet.is_empty() {
        return ' ';
    }
    alphabet[rng.gen_range(0..alphabet.len())]
}
