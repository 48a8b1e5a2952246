//! The obstacle field: the live set of falling hazards plus their spawn,
//! motion and pruning rules. The field owns its obstacles and keeps them in
//! insertion order; the collision engine relies on that ordering.

use super::FRAME_BASELINE_MS;

/// Per-frame probability of a spawn roll producing a new obstacle.
pub const SPAWN_CHANCE: f64 = 0.02;

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Flips false -> true at most once, when the obstacle clears the car's
    /// vertical band without a collision having ended the session first.
    pub passed: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    /// One spawn roll: with probability [`SPAWN_CHANCE`] push a new obstacle
    /// at a uniformly random x in `[0, viewport_w - width]`, just above the
    /// visible area. Returns whether an obstacle was produced.
    pub fn try_spawn(
        &mut self,
        rng: &mut impl FnMut() -> f64,
        viewport_w: f64,
        width: f64,
        height: f64,
    ) -> bool {
        if rng() >= SPAWN_CHANCE {
            return false;
        }
        let x = rng() * (viewport_w - width);
        self.obstacles.push(Obstacle {
            x,
            y: -height,
            width,
            height,
            passed: false,
        });
        true
    }

    /// Move every live obstacle down by `speed` pixels per 16ms of `dt_ms`.
    pub fn advance(&mut self, dt_ms: f64, speed: f64) {
        for ob in &mut self.obstacles {
            ob.y += speed * (dt_ms / FRAME_BASELINE_MS);
        }
    }

    /// Drop obstacles that scrolled past the bottom edge, preserving the
    /// relative order of survivors.
    pub fn prune(&mut self, viewport_h: f64) {
        self.obstacles.retain(|ob| ob.y < viewport_h);
    }
}
