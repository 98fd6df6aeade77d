// Draw pass: tones, text-proximity dimming, leaf shadows and reduced motion.

mod common;

use ascii_ambient::config::{AmbientConfig, DimTuning, GridMetrics, HighlightTuning};
use ascii_ambient::constants::{
    ACCENT_COLOR, ACCENT_COLOR_ALT, BASE_COLOR_DARK, DAPPLE_ALPHA_DARK, DAPPLE_ALPHA_LIGHT,
    DIM_FLOOR,
};
use ascii_ambient::core::compositor::{self, Layers};
use ascii_ambient::core::leaves::Leaf;
use ascii_ambient::core::{
    ColorScheme, DimMask, Grid, HighlightRequest, HighlightState, LeafField, Rect,
    RendererState, Tone,
};
use common::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn no_leaves() -> AmbientConfig {
    let mut cfg = AmbientConfig::default();
    cfg.ambient.leaf_shadows = false;
    cfg
}

fn small_grid(cols: usize, rows: usize) -> Grid {
    let mut rng = StdRng::seed_from_u64(11);
    let alphabet: Vec<char> = "+*".chars().collect();
    Grid::new(viewport_for(cols, rows), &GridMetrics::default(), &alphabet, &mut rng)
}

#[test]
fn only_lit_cells_are_drawn_at_their_origin() {
    let mut grid = small_grid(6, 3);
    grid.set(0, 0.5);
    grid.set(7, 0.25);
    let dim = DimMask::default();
    let leaves = LeafField::new(0, grid.len(), false);
    let highlight = HighlightState::default();
    let tuning = HighlightTuning::default();
    let layers = Layers {
        grid: &grid,
        dim: &dim,
        leaves: &leaves,
        highlight: &highlight,
        highlight_tuning: &tuning,
    };
    let mut sink = RecordingSink::default();
    let drawn = compositor::draw(&layers, 100.0, 100.0, ColorScheme::Light, &mut sink);
    assert_eq!(drawn, 2);
    assert_eq!(sink.glyphs.len(), 2);
    let second = &sink.glyphs[1];
    let origin = grid.cell_origin(7);
    assert_eq!((second.x, second.y), (origin.x, origin.y));
    assert_eq!(second.alpha, 0.25);
    assert_eq!(second.ch, grid.chars()[7]);
    assert!(sink.glyphs.iter().all(|g| g.tone == Tone::Base));
}

#[test]
fn accent_cells_alternate_between_two_tones() {
    let mut grid = small_grid(6, 1);
    for i in [0, 1, 3, 4] {
        grid.set(i, 0.4);
        grid.mark_accent(i);
    }
    let dim = DimMask::default();
    let leaves = LeafField::new(0, grid.len(), false);
    let highlight = HighlightState::default();
    let tuning = HighlightTuning::default();
    let layers = Layers {
        grid: &grid,
        dim: &dim,
        leaves: &leaves,
        highlight: &highlight,
        highlight_tuning: &tuning,
    };
    let mut sink = RecordingSink::default();
    compositor::draw(&layers, 60.0, 30.0, ColorScheme::Dark, &mut sink);
    let tones: Vec<Tone> = sink.glyphs.iter().map(|g| g.tone).collect();
    assert_eq!(
        tones,
        vec![Tone::AccentAlt, Tone::Accent, Tone::AccentAlt, Tone::Accent]
    );
    assert_eq!(ColorScheme::Dark.color(Tone::AccentAlt), ACCENT_COLOR_ALT);
    assert_eq!(ColorScheme::Light.color(Tone::Accent), ACCENT_COLOR);
    assert_eq!(ColorScheme::Dark.color(Tone::Base), BASE_COLOR_DARK);
}

#[test]
fn dim_factor_bottoms_out_over_text_and_recovers_with_distance() {
    let grid = small_grid(40, 20);
    let mut dim = DimMask::default();
    dim.set_regions([Rect::new(0.0, 0.0, 60.0, 60.0)]);
    dim.rebuild(&grid, &DimTuning::default());
    assert!((dim.factor(0) - DIM_FLOOR).abs() < 1e-6);
    let far = grid.len() - 1;
    assert_eq!(dim.factor(far), 1.0);
    for i in 0..grid.len() {
        let f = dim.factor(i);
        assert!((DIM_FLOOR..=1.0).contains(&f));
    }

    dim.set_regions(std::iter::empty());
    dim.rebuild(&grid, &DimTuning::default());
    assert_eq!(dim.factor(0), 1.0);
}

#[test]
fn dimming_changes_drawn_alpha_but_not_brightness() {
    let mut plain = state_with(40, 20, no_leaves());
    let mut dimmed = state_with(40, 20, no_leaves());
    let vp = dimmed.viewport();
    dimmed.set_text_regions(Rect::from_flat(&[0.0, 0.0, vp.width as f64, vp.height as f64]));
    assert_eq!(dimmed.dim().regions().len(), 1);

    let req = HighlightRequest::default();
    let mut a = RecordingSink::default();
    let mut b = RecordingSink::default();
    for f in 0..10 {
        let now = f as f64 * FRAME_MS;
        plain.step(now, &req, &mut a);
        dimmed.step(now, &req, &mut b);
    }
    assert_eq!(plain.grid().brightness(), dimmed.grid().brightness());
    assert_eq!(a.glyphs.len(), b.glyphs.len());
    for (p, d) in a.glyphs.iter().zip(&b.glyphs) {
        assert!((d.alpha - p.alpha * DIM_FLOOR).abs() < 1e-5);
    }
}

#[test]
fn leaf_depth_peaks_on_the_midrib() {
    let leaf = Leaf::seeded(3);
    let t = 0.0;
    let cx = leaf.base_x + leaf.drift_phase.sin() * leaf.drift_amp_x;
    let cy = leaf.base_y + (leaf.drift_phase + 1.5).sin() * leaf.drift_amp_y;
    assert!((leaf.depth(cx, cy, t) - 1.0).abs() < 1e-4);
    assert_eq!(leaf.depth(cx + 0.5, cy + 0.5, t), -1.0);
}

#[test]
fn leaf_shadows_never_touch_brightness() {
    let mut with = state(40, 20);
    let mut without = state_with(40, 20, no_leaves());
    let req = HighlightRequest::new("HI", 1.0);
    let mut a = RecordingSink::default();
    let mut b = RecordingSink::default();
    for f in 0..30 {
        let now = f as f64 * FRAME_MS;
        with.step(now, &req, &mut a);
        without.step(now, &req, &mut b);
    }
    assert_eq!(with.grid().brightness(), without.grid().brightness());
    assert!(a.glyphs.len() <= b.glyphs.len());

    let disabled = LeafField::new(14, 8, false);
    assert_eq!(disabled.visibility(3), Some(1.0));
}

#[test]
fn draw_follows_colour_scheme() {
    let mut s = state(20, 10);
    s.set_color_scheme(ColorScheme::Dark);
    let mut sink = RecordingSink::default();
    s.step(0.0, &HighlightRequest::default(), &mut sink);
    assert_eq!(sink.scheme, Some(ColorScheme::Dark));
    assert_eq!(s.scheme(), ColorScheme::Dark);
}

#[test]
fn reduced_motion_paints_once_and_freezes() {
    let mut s = state(40, 20);
    let mut sink = RecordingSink::default();
    let drawn = s.render_static(&mut sink);
    assert!(drawn > 0);
    assert_eq!(sink.frames, 1);
    assert!(s.is_frozen());

    let brightness = s.grid().brightness().to_vec();
    let chars = s.grid().chars().to_vec();
    for f in 0..20 {
        s.step(f as f64 * FRAME_MS, &HighlightRequest::new("HELLO", 1.0), &mut sink);
        s.drift();
    }
    assert_eq!(s.grid().brightness(), &brightness[..]);
    assert_eq!(s.grid().chars(), &chars[..]);
    assert_eq!(s.frames(), 0);
    assert_eq!(sink.frames, 1);

    // a resize repaints the static frame at the new size
    s.resize(viewport_for(30, 10));
    let again = s.render_static(&mut sink);
    assert!(again > 0);
    assert_eq!(sink.frames, 2);
}

#[test]
fn destroy_consumes_state() {
    let mut s = state(10, 5);
    let mut sink = RecordingSink::default();
    s.step(0.0, &HighlightRequest::default(), &mut sink);
    assert_eq!(s.frames(), 1);
    s.destroy();
}

#[test]
fn static_frame_repaints_for_a_new_colour_scheme() {
    let mut s = state(40, 20);
    let mut sink = RecordingSink::default();
    s.render_static(&mut sink);
    let peak = |s: &RendererState| {
        s.grid().brightness().iter().copied().fold(0.0f32, f32::max)
    };
    assert!(peak(&s) > DAPPLE_ALPHA_DARK);
    assert!(peak(&s) <= DAPPLE_ALPHA_LIGHT + 1e-6);

    s.set_color_scheme(ColorScheme::Dark);
    s.render_static(&mut sink);
    assert_eq!(sink.scheme, Some(ColorScheme::Dark));
    assert!(peak(&s) <= DAPPLE_ALPHA_DARK + 1e-6);
    assert!(s.is_frozen());
}
