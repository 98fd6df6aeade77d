//! Drifting leaf shadows. Each leaf is a pointed ellipse in normalised
//! viewport space; cells inside a leaf get a positive depth and are occluded.

use super::grid::Grid;
use super::hash::leaf_seed;
use crate::constants::LEAF_OCCLUDE_DEPTH;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Debug)]
pub struct Leaf {
    pub base_x: f32,
    pub base_y: f32,
    pub length: f32,
    pub half_width: f32,
    pub base_angle: f32,
    pub drift_phase: f32,
    pub sway_phase: f32,
    pub drift_amp_x: f32,
    pub drift_amp_y: f32,
}

impl Leaf {
    pub fn seeded(i: usize) -> Self {
        let (r, r2) = leaf_seed(i);
        Self {
            base_x: 0.05 + r * 0.9,
            base_y: 0.05 + r2 * 0.9,
            length: 0.03 + r * 0.03,
            half_width: 0.006 + r2 * 0.008,
            base_angle: r * TAU,
            drift_phase: r * 10.0,
            sway_phase: r2 * 10.0,
            drift_amp_x: 0.06 + r2 * 0.08,
            drift_amp_y: 0.04 + r * 0.06,
        }
    }

    /// Depth of `(nx, ny)` inside the leaf at time `t`: 1 on the midrib,
    /// 0 on the outline, -1 outside.
    pub fn depth(&self, nx: f32, ny: f32, t: f64) -> f32 {
        let drift = self.drift_phase as f64;
        let cx = self.base_x + (t * 0.3 + drift).sin() as f32 * self.drift_amp_x;
        let cy = self.base_y + (t * 0.22 + drift + 1.5).sin() as f32 * self.drift_amp_y;
        let angle = self.base_angle + (t * 0.4 + self.sway_phase as f64).sin() as f32 * 0.5;
        let (sin_a, cos_a) = angle.sin_cos();
        let dx = nx - cx;
        let dy = ny - cy;
        let lx = dx * cos_a + dy * sin_a;
        let ly = -dx * sin_a + dy * cos_a;
        let along = lx / self.length + 0.5;
        if !(0.0..=1.0).contains(&along) {
            return -1.0;
        }
        let envelope = (along * PI).sin() * self.half_width;
        if envelope <= 0.0 {
            return -1.0;
        }
        let across = ly.abs() / envelope;
        if across > 1.0 {
            return -1.0;
        }
        1.0 - across
    }
}

/// Per-cell leaf depth, refreshed every frame when enabled.
#[derive(Clone, Debug)]
pub struct LeafField {
    leaves: Vec<Leaf>,
    depth: Vec<f32>,
    enabled: bool,
}

impl LeafField {
    pub fn new(count: usize, cell_count: usize, enabled: bool) -> Self {
        Self {
            leaves: (0..count).map(Leaf::seeded).collect(),
            depth: vec![-1.0; cell_count],
            enabled,
        }
    }

    pub fn resize(&mut self, cell_count: usize) {
        self.depth = vec![-1.0; cell_count];
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn update(&mut self, grid: &Grid, t: f64) {
        if !self.enabled {
            return;
        }
        let cols = grid.cols();
        let rows = grid.rows();
        for row in 0..rows {
            let ny = row as f32 / rows as f32;
            for col in 0..cols {
                let nx = col as f32 / cols as f32;
                self.depth[row * cols + col] = self
                    .leaves
                    .iter()
                    .map(|leaf| leaf.depth(nx, ny, t))
                    .fold(-1.0, f32::max);
            }
        }
    }

    /// Visibility multiplier for cell `i`; `None` when fully in shadow.
    #[inline]
    pub fn visibility(&self, i: usize) -> Option<f32> {
        if !self.enabled {
            return Some(1.0);
        }
        let d = self.depth.get(i).copied().unwrap_or(-1.0);
        if d > LEAF_OCCLUDE_DEPTH {
            None
        } else if d >= 0.0 {
            Some(1.0 - d / LEAF_OCCLUDE_DEPTH)
        } else {
            Some(1.0)
        }
    }
}
