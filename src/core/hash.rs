// Sine-fract hashes used for per-cell pseudo-random values. Evaluated in f64:
// the arguments grow with the cell index and f32 `sin` loses the fraction.

#[inline]
fn sin_fract(x: f64) -> f32 {
    let h = x.sin() * 43758.5453;
    (h - h.floor()) as f32
}

/// Static per-cell noise in [0, 1) used for shimmer phase and frequency.
#[inline]
pub fn cell_noise(col: usize, row: usize) -> f32 {
    sin_fract(col as f64 * 127.1 + row as f64 * 311.7)
}

/// Per-cell reveal/dissolve order in [0, 1), keyed by flat cell index.
#[inline]
pub fn reveal_threshold(index: usize) -> f32 {
    sin_fract(index as f64 * 127.1 + 311.7)
}

/// Two decorrelated values in [0, 1) for seeding leaf `i`.
#[inline]
pub fn leaf_seed(i: usize) -> (f32, f32) {
    let i = i as f64;
    let a = (i * 73.17 + 3.91).sin() * 43758.5453;
    let b = (i * 127.3 + 7.13).sin() * 23421.631;
    ((a - a.floor()) as f32, (b - b.floor()) as f32)
}
