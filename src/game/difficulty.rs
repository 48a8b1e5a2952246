//! Difficulty escalation: a single timer that fires every five seconds of
//! gameplay and applies exactly one escalation step per firing.

pub const DIFFICULTY_INTERVAL_MS: f64 = 5000.0;

pub const BASE_SPEED: f64 = 5.0;
pub const SPEED_STEP: f64 = 0.5;
pub const MAX_SPEED: f64 = 15.0;

pub const INITIAL_OBSTACLE_SIZE: f64 = 50.0;
pub const SIZE_STEP: f64 = 5.0;
pub const MAX_OBSTACLE_SIZE: f64 = 100.0;

/// Which knob an escalation step turns besides obstacle speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DifficultyVariant {
    /// Obstacles grow by [`SIZE_STEP`] per step, capped at
    /// [`MAX_OBSTACLE_SIZE`]; each pass stays worth one point.
    GrowSize,
    /// Obstacles keep their size; each pass is worth one more point per
    /// step, unbounded.
    #[default]
    GrowPoints,
}

#[derive(Clone, Debug)]
pub struct Difficulty {
    pub variant: DifficultyVariant,
    pub speed: f64,
    pub obstacle_w: f64,
    pub obstacle_h: f64,
    pub points_per_obstacle: u64,
    last_increase_ms: f64,
}

impl Difficulty {
    pub fn new(variant: DifficultyVariant) -> Self {
        Self {
            variant,
            speed: BASE_SPEED,
            obstacle_w: INITIAL_OBSTACLE_SIZE,
            obstacle_h: INITIAL_OBSTACLE_SIZE,
            points_per_obstacle: 1,
            last_increase_ms: 0.0,
        }
    }

    /// Fire at most one escalation step if a full interval elapsed since the
    /// last one. A frame that skipped several intervals (backgrounded tab)
    /// still advances by a single step. Returns whether a step fired.
    pub fn tick(&mut self, elapsed_ms: f64) -> bool {
        if elapsed_ms - self.last_increase_ms < DIFFICULTY_INTERVAL_MS {
            return false;
        }
        self.last_increase_ms = elapsed_ms;
        if self.speed < MAX_SPEED {
            self.speed += SPEED_STEP;
        }
        match self.variant {
            DifficultyVariant::GrowSize => {
                if self.obstacle_w < MAX_OBSTACLE_SIZE && self.obstacle_h < MAX_OBSTACLE_SIZE {
                    self.obstacle_w += SIZE_STEP;
                    self.obstacle_h += SIZE_STEP;
                }
            }
            DifficultyVariant::GrowPoints => {
                self.points_per_obstacle += 1;
            }
        }
        true
    }
}
