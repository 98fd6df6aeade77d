//! Renderer state for one canvas instance.
//!
//! The host owns a `RendererState`, feeds it environment changes as they
//! happen (resize, pointer, regions, colour scheme) and calls [`step`] once per
//! display frame with the current timestamp and highlight request.
//!
//! [`step`]: RendererState::step

use super::compositor::{self, ColorScheme, DimMask, GlyphSink, Layers};
use super::geom::Rect;
use super::grid::{Grid, Viewport};
use super::highlight::{BlockRasterizer, HighlightRequest, HighlightState, TextRasterizer};
use super::leaves::LeafField;
use super::noise::{self, DapplePresence};
use super::spotlight::{PointerCapability, Spotlight};
use crate::config::AmbientConfig;
use crate::constants::{HL_VISIBLE_MIN_INTENSITY, LEAF_COUNT};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct RendererState {
    config: AmbientConfig,
    alphabet: Vec<char>,
    viewport: Viewport,
    grid: Grid,
    highlight: HighlightState,
    spotlight: Spotlight,
    presence: DapplePresence,
    dim: DimMask,
    leaves: LeafField,
    scheme: ColorScheme,
    rasterizer: Box<dyn TextRasterizer>,
    rng: StdRng,
    frozen: bool,
    frames: u64,
}

impl RendererState {
    pub fn create(viewport: Viewport, config: AmbientConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let alphabet: Vec<char> = config.grid.alphabet.chars().collect();
        let grid = Grid::new(viewport, &config.grid, &alphabet, &mut rng);
        let n = grid.len();
        log::debug!(
            "[state] create {}x{} cells for {:.0}x{:.0}",
            grid.cols(),
            grid.rows(),
            viewport.width,
            viewport.height
        );
        Self {
            spotlight: Spotlight::new(n, &config.spotlight),
            leaves: LeafField::new(LEAF_COUNT, n, config.ambient.leaf_shadows),
            config,
            alphabet,
            viewport,
            grid,
            highlight: HighlightState::default(),
            presence: DapplePresence::default(),
            dim: DimMask::default(),
            scheme: ColorScheme::default(),
            rasterizer: Box::new(BlockRasterizer),
            rng,
            frozen: false,
            frames: 0,
        }
    }

    /// Replace the glyph rasteriser used for highlight masks.
    pub fn with_rasterizer(mut self, rasterizer: Box<dyn TextRasterizer>) -> Self {
        self.rasterizer = rasterizer;
        self.highlight.invalidate();
        self
    }

    /// End of life. Consumes the state so no frame can run afterwards.
    pub fn destroy(self) {
        log::debug!("[state] destroy after {} frames", self.frames);
    }

    pub fn config(&self) -> &AmbientConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    pub fn spotlight(&self) -> &Spotlight {
        &self.spotlight
    }

    pub fn dim(&self) -> &DimMask {
        &self.dim
    }

    pub fn presence(&self) -> f32 {
        self.presence.value()
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Rebuild every per-cell buffer for a new viewport. Always a full
    /// replacement, even for identical dimensions.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.grid = Grid::new(viewport, &self.config.grid, &self.alphabet, &mut self.rng);
        let n = self.grid.len();
        self.spotlight.resize(n);
        self.leaves.resize(n);
        self.highlight.invalidate();
        self.dim.rebuild(&self.grid, &self.config.dimming);
        log::debug!(
            "[state] resize -> {}x{} cells",
            self.grid.cols(),
            self.grid.rows()
        );
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
    }

    pub fn set_pointer_capability(&mut self, capability: PointerCapability) {
        self.spotlight.set_capability(capability);
    }

    pub fn set_hover_regions(&mut self, regions: impl IntoIterator<Item = Rect>) {
        self.spotlight.set_regions(regions);
    }

    pub fn set_text_regions(&mut self, regions: impl IntoIterator<Item = Rect>) {
        self.dim.set_regions(regions);
        self.dim.rebuild(&self.grid, &self.config.dimming);
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32, now_ms: f64) {
        self.spotlight.pointer_moved(x, y, now_ms);
    }

    pub fn pointer_left(&mut self) {
        self.spotlight.pointer_left();
    }

    /// Replace one random glyph. Driven by the host's drift timer.
    pub fn drift(&mut self) {
        if self.frozen {
            return;
        }
        self.grid.drift(&self.alphabet, &mut self.rng);
    }

    /// Advance all effects by one frame without drawing.
    pub fn update(&mut self, now_ms: f64, request: &HighlightRequest) {
        if self.frozen {
            return;
        }
        self.frames += 1;
        let t = now_ms * 0.001;
        let cfg = &self.config;
        let scheme = self.scheme;

        self.spotlight.update(now_ms, &cfg.spotlight);
        self.presence
            .update(self.spotlight.is_tracking(), now_ms, &cfg.ambient);

        self.grid.decay(self.spotlight.active(), cfg.ambient.fade_step);

        self.highlight.prepare(
            request,
            self.grid.cols(),
            self.grid.rows(),
            self.rasterizer.as_mut(),
            &cfg.highlight,
        );

        let presence = self.presence.value();
        let highlight_visible = !self.highlight.current().is_empty()
            && request.intensity > HL_VISIBLE_MIN_INTENSITY;
        if presence > 0.001 || highlight_visible {
            let highlight = &self.highlight;
            let tuning = &cfg.highlight;
            noise::apply_dapple(
                &mut self.grid,
                t,
                scheme.pick(cfg.ambient.dapple_alpha_light, cfg.ambient.dapple_alpha_dark),
                presence,
                |i| highlight.ambient_factor(i, tuning),
            );
        }

        {
            let highlight = &self.highlight;
            let tuning = &cfg.highlight;
            self.spotlight.apply(
                &mut self.grid,
                scheme.pick(cfg.spotlight.bright_alpha_light, cfg.spotlight.bright_alpha_dark),
                &cfg.spotlight,
                &mut self.rng,
                |i| highlight.covers(i, tuning),
            );
        }

        self.highlight.apply(
            &mut self.grid,
            scheme.pick(cfg.highlight.alpha_light, cfg.highlight.alpha_dark),
            &cfg.highlight,
        );

        self.leaves.update(&self.grid, t);
    }

    /// Draw the current brightness buffer; returns the number of glyphs drawn.
    pub fn draw(&self, sink: &mut impl GlyphSink) -> usize {
        let layers = Layers {
            grid: &self.grid,
            dim: &self.dim,
            leaves: &self.leaves,
            highlight: &self.highlight,
            highlight_tuning: &self.config.highlight,
        };
        compositor::draw(
            &layers,
            self.viewport.width,
            self.viewport.height,
            self.scheme,
            sink,
        )
    }

    /// One animation frame: update then draw. A no-op once frozen.
    pub fn step(&mut self, now_ms: f64, request: &HighlightRequest, sink: &mut impl GlyphSink) {
        if self.frozen {
            return;
        }
        self.update(now_ms, request);
        self.draw(sink);
    }

    /// Reduced motion: write one static ambient frame, draw it and freeze.
    /// May be called again after a resize or colour scheme change to repaint;
    /// each call starts from a dark grid.
    pub fn render_static(&mut self, sink: &mut impl GlyphSink) -> usize {
        self.grid.clear_brightness();
        let amplitude = self
            .scheme
            .pick(self.config.ambient.dapple_alpha_light, self.config.ambient.dapple_alpha_dark);
        noise::apply_static_dapple(&mut self.grid, amplitude);
        self.leaves.update(&self.grid, 0.0);
        self.frozen = true;
        self.draw(sink)
    }
}
