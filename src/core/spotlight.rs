use super::geom::Rect;
use super::grid::Grid;
use crate::config::SpotlightTuning;
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerCapability {
    #[default]
    Fine,
    /// Touch-only devices: the spotlight never activates.
    Coarse,
}

/// Pointer state as last reported by the host's pointer events.
#[derive(Clone, Debug, Default)]
pub struct PointerState {
    /// `None` while the pointer is off the canvas.
    pub pos: Option<Vec2>,
    pub hovering: bool,
    pub idle: bool,
    pub last_move_ms: f64,
    /// Pointer speed in px/ms, decays while the pointer rests.
    pub speed: f32,
}

/// Cursor spotlight: brightens cells around the pointer while it moves inside
/// one of the hover regions, with a radius that swells with pointer speed.
#[derive(Clone, Debug)]
pub struct Spotlight {
    pointer: PointerState,
    capability: PointerCapability,
    regions: SmallVec<[Rect; 4]>,
    radius: f32,
    active: Vec<bool>,
    // set by an actual pointer move, consumed by the next `apply`
    moved: bool,
}

impl Spotlight {
    pub fn new(cell_count: usize, tuning: &SpotlightTuning) -> Self {
        Self {
            pointer: PointerState::default(),
            capability: PointerCapability::default(),
            regions: SmallVec::new(),
            radius: tuning.radius_min,
            active: vec![false; cell_count],
            moved: false,
        }
    }

    pub fn resize(&mut self, cell_count: usize) {
        self.active = vec![false; cell_count];
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn capability(&self) -> PointerCapability {
        self.capability
    }

    /// Cells lit by the spotlight on the most recent frame.
    pub fn active(&self) -> &[bool] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    pub fn set_capability(&mut self, capability: PointerCapability) {
        self.capability = capability;
        if capability == PointerCapability::Coarse {
            self.pointer_left();
        }
    }

    pub fn set_regions(&mut self, regions: impl IntoIterator<Item = Rect>) {
        self.regions.clear();
        self.regions.extend(regions);
    }

    /// Whether the spotlight is currently following the pointer.
    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.capability == PointerCapability::Fine && self.pointer.hovering && !self.pointer.idle
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32, now_ms: f64) {
        if self.capability == PointerCapability::Coarse {
            return;
        }
        let next = Vec2::new(x, y);
        let moved = self.pointer.pos != Some(next);
        if moved {
            if let Some(prev) = self.pointer.pos {
                let dt = (now_ms - self.pointer.last_move_ms) as f32;
                if dt > 0.0 {
                    self.pointer.speed = prev.distance(next) / dt;
                }
            }
            self.pointer.last_move_ms = now_ms;
            self.pointer.idle = false;
            self.moved = true;
        }
        self.pointer.pos = Some(next);
        self.pointer.hovering = self.regions.iter().any(|r| r.contains(next));
        if !self.pointer.hovering {
            self.active.fill(false);
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer.pos = None;
        self.pointer.hovering = false;
        self.pointer.speed = 0.0;
        self.moved = false;
        self.active.fill(false);
    }

    /// Per-frame bookkeeping: idle transition, speed decay and radius easing.
    pub fn update(&mut self, now_ms: f64, tuning: &SpotlightTuning) {
        let p = &mut self.pointer;
        if p.hovering && !p.idle && now_ms - p.last_move_ms > tuning.idle_timeout_ms {
            p.idle = true;
            self.active.fill(false);
            log::debug!("[spotlight] pointer idle");
        }
        let target = (tuning.radius_min + p.speed * tuning.radius_speed_gain)
            .clamp(tuning.radius_min, tuning.radius_max);
        self.radius += (target - self.radius) * tuning.radius_smoothing;
        p.speed *= tuning.speed_decay;
    }

    /// Brighten cells within the radius. `covered(i)` marks cells under
    /// revealed highlight text, which the spotlight never touches. Accents are
    /// only rolled on the first frame after the pointer actually moved.
    pub fn apply(
        &mut self,
        grid: &mut Grid,
        amplitude: f32,
        tuning: &SpotlightTuning,
        rng: &mut impl Rng,
        covered: impl Fn(usize) -> bool,
    ) {
        self.active.fill(false);
        let roll_accents = std::mem::take(&mut self.moved);
        if !self.is_tracking() || grid.is_empty() {
            return;
        }
        let Some(center) = self.pointer.pos else {
            return;
        };
        let radius = self.radius.max(1.0);
        let cell = grid.cell_size();
        let last_col = (grid.cols() - 1) as f32;
        let last_row = (grid.rows() - 1) as f32;
        let min_col = ((center.x - radius) / cell.x).floor().clamp(0.0, last_col) as usize;
        let max_col = ((center.x + radius) / cell.x).ceil().clamp(0.0, last_col) as usize;
        let min_row = ((center.y - radius) / cell.y).floor().clamp(0.0, last_row) as usize;
        let max_row = ((center.y + radius) / cell.y).ceil().clamp(0.0, last_row) as usize;

        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let i = row * grid.cols() + col;
                let dist = grid.cell_center(i).distance(center);
                if dist >= radius {
                    continue;
                }
                self.active[i] = true;
                if covered(i) {
                    continue;
                }
                let intensity = 1.0 - dist / radius;
                grid.raise(i, amplitude * intensity * intensity);
                if roll_accents
                    && intensity > tuning.accent_min_intensity
                    && rng.gen::<f32>() < tuning.accent_chance
                {
                    grid.mark_accent(i);
                }
            }
        }
    }
}
