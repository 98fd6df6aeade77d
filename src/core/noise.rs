use super::grid::Grid;
use super::hash::cell_noise;
use crate::config::AmbientTuning;
use crate::constants::DAPPLE_MIN_WRITE;

/// Dappled-light intensity for one cell at time `t` (seconds), in [0, 1].
///
/// Two layered sine-product fields drift with a slow wind; a per-cell shimmer
/// with its own phase and frequency breaks up any visible tiling. Phases are
/// evaluated in f64 so the motion stays smooth on long-lived pages.
#[inline]
pub fn dapple_edge(nx: f32, ny: f32, col: usize, row: usize, t: f64) -> f32 {
    let (nx, ny) = (nx as f64, ny as f64);
    let wind_x = t * 0.18;
    let wind_y = t * 0.07;
    let n1 = ((nx * 3.2 + wind_x) * 2.0).sin()
        * ((ny * 2.8 + wind_y) * 2.0).sin()
        * ((nx * 1.5 - ny * 2.1 + t * 0.12) * 1.8).sin();
    let n2 = ((nx * 7.1 + wind_x * 1.3 + 5.2) * 1.5).sin()
        * ((ny * 6.3 + wind_y * 1.1 + 3.1) * 1.5).sin()
        * 0.5;
    let h = cell_noise(col, row) as f64;
    let shimmer = (t * (1.2 + h * 2.0) + h * 6.28).sin() * 0.15;
    ((n1 + n2 + shimmer) * 2.0 + 0.3).clamp(0.0, 1.0) as f32
}

/// Frozen variant for reduced motion: only the base layer at `t = 0`.
#[inline]
pub fn static_dapple_edge(nx: f32, ny: f32) -> f32 {
    let n1 = (nx * 3.2 * 2.0).sin() * (ny * 2.8 * 2.0).sin() * ((nx * 1.5 - ny * 2.1) * 1.8).sin();
    (n1 * 2.0 + 0.3).clamp(0.0, 1.0)
}

/// How much of the ambient field is showing. Eases out while the spotlight is
/// tracking the pointer and back in a short while after it stops.
#[derive(Clone, Debug)]
pub struct DapplePresence {
    value: f32,
    hover_end_ms: f64,
}

impl Default for DapplePresence {
    fn default() -> Self {
        Self {
            value: 1.0,
            hover_end_ms: f64::NEG_INFINITY,
        }
    }
}

impl DapplePresence {
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn update(&mut self, tracking: bool, now_ms: f64, tuning: &AmbientTuning) {
        if tracking {
            self.value += (0.0 - self.value) * tuning.dapple_fade_speed;
            self.hover_end_ms = now_ms;
        } else if now_ms - self.hover_end_ms > tuning.dapple_return_delay_ms {
            self.value += (1.0 - self.value) * tuning.dapple_fade_speed;
        }
    }
}

/// Max-merge the dapple field into the grid.
///
/// `ambient_factor(i)` returns `None` for cells the ambient field must leave
/// alone (revealed highlight text) or a suppression multiplier otherwise.
pub fn apply_dapple(
    grid: &mut Grid,
    t: f64,
    amplitude: f32,
    presence: f32,
    ambient_factor: impl Fn(usize) -> Option<f32>,
) {
    let cols = grid.cols();
    let rows = grid.rows();
    if cols == 0 || rows == 0 {
        return;
    }
    for row in 0..rows {
        let ny = row as f32 / rows as f32;
        for col in 0..cols {
            let i = row * cols + col;
            let Some(suppress) = ambient_factor(i) else {
                continue;
            };
            let nx = col as f32 / cols as f32;
            let alpha = dapple_edge(nx, ny, col, row, t) * amplitude * presence * suppress;
            if alpha > DAPPLE_MIN_WRITE {
                grid.raise(i, alpha);
            }
        }
    }
}

/// Write the reduced-motion frame.
pub fn apply_static_dapple(grid: &mut Grid, amplitude: f32) {
    let cols = grid.cols();
    let rows = grid.rows();
    for row in 0..rows {
        let ny = row as f32 / rows as f32;
        for col in 0..cols {
            let nx = col as f32 / cols as f32;
            grid.raise(row * cols + col, static_dapple_edge(nx, ny) * amplitude);
        }
    }
}
