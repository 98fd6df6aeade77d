use glam::Vec2;

/// Axis-aligned rectangle in CSS pixels (viewport coordinates).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let a = Vec2::new(x, y);
        let b = Vec2::new(x + width, y + height);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Euclidean distance from `p` to the rectangle; 0 inside or on the edge.
    #[inline]
    pub fn distance_to(&self, p: Vec2) -> f32 {
        let d = (self.min - p).max(p - self.max).max(Vec2::ZERO);
        d.length()
    }

    /// Build rectangles from a flat `[x, y, w, h, x, y, w, h, ..]` slice.
    /// A trailing partial quad is ignored.
    pub fn from_flat(values: &[f64]) -> impl Iterator<Item = Rect> + '_ {
        values
            .chunks_exact(4)
            .map(|q| Rect::new(q[0] as f32, q[1] as f32, q[2] as f32, q[3] as f32))
    }
}
