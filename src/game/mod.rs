//! Core simulation: one `GameState` per play session, advanced by
//! [`GameState::update`] once per animation frame. Everything in this module
//! tree is plain Rust with no web-sys calls, so the gameplay rules run under
//! native `cargo test`; the browser driver in `crate::app` owns the clock,
//! the canvas and the random source and feeds them in from outside.

pub mod collision;
pub mod difficulty;
pub mod obstacles;

pub use difficulty::{Difficulty, DifficultyVariant};
pub use obstacles::{Obstacle, ObstacleField};

use collision::CarBox;

use crate::leaderboard::LeaderboardScope;

// --- Tunables ----------------------------------------------------------------

pub const CAR_WIDTH: f64 = 50.0;
pub const CAR_HEIGHT: f64 = 100.0;
/// Gap between the bottom of the car and the bottom edge of the viewport.
pub const GROUND_MARGIN: f64 = 10.0;
/// Speeds are expressed in pixels per 16ms so motion stays frame-rate
/// independent at a 60fps baseline.
pub const FRAME_BASELINE_MS: f64 = 16.0;

// --- Session configuration ----------------------------------------------------

/// Per-session options. The defaults are the superset configuration:
/// points-escalation difficulty with a local + remote leaderboard.
#[derive(Clone, Debug, Default)]
pub struct GameConfig {
    pub difficulty_variant: DifficultyVariant,
    pub leaderboard_scope: LeaderboardScope,
    /// Endpoint of the shared score store. `None` with a remote scope is
    /// treated like any other remote-store failure: logged and skipped.
    pub remote_url: Option<String>,
}

// --- Session state ------------------------------------------------------------

/// Mutable state of one play session. Created on start, updated every frame,
/// replaced wholesale on restart.
#[derive(Clone, Debug)]
pub struct GameState {
    pub viewport_w: f64,
    pub viewport_h: f64,
    /// Left edge of the car, always within `[0, viewport_w - CAR_WIDTH]`.
    pub car_x: f64,
    pub field: ObstacleField,
    pub difficulty: Difficulty,
    pub score: u64,
    pub elapsed_ms: f64,
    pub game_over: bool,
}

impl GameState {
    pub fn new(viewport_w: f64, viewport_h: f64, variant: DifficultyVariant) -> Self {
        Self {
            viewport_w,
            viewport_h,
            car_x: viewport_w / 2.0 - CAR_WIDTH / 2.0,
            field: ObstacleField::new(),
            difficulty: Difficulty::new(variant),
            score: 0,
            elapsed_ms: 0.0,
            game_over: false,
        }
    }

    /// Vertical position of the car's top edge (the "ground line").
    pub fn ground_y(&self) -> f64 {
        self.viewport_h - CAR_HEIGHT - GROUND_MARGIN
    }

    pub fn car_box(&self) -> CarBox {
        CarBox {
            x: self.car_x,
            y: self.ground_y(),
            width: CAR_WIDTH,
            height: CAR_HEIGHT,
        }
    }

    /// Pointer input: center the car under the pointer, clamped to the
    /// viewport. Safe to call at any time; the next frame picks it up.
    pub fn set_pointer_x(&mut self, pointer_x: f64) {
        let max = (self.viewport_w - CAR_WIDTH).max(0.0);
        self.car_x = (pointer_x - CAR_WIDTH / 2.0).clamp(0.0, max);
    }

    /// Advance the session by one frame of `dt_ms` wall-clock milliseconds.
    ///
    /// Fixed sequence: difficulty timer, spawn roll, obstacle advance,
    /// collision/scoring, prune. A collision ends the session immediately and
    /// skips the prune step; pruning runs after scoring so a long frame
    /// cannot drop an obstacle that legitimately cleared the car unscored.
    /// `rng` must yield uniform values in `[0, 1)`.
    pub fn update(&mut self, dt_ms: f64, rng: &mut impl FnMut() -> f64) {
        if self.game_over {
            return;
        }
        self.elapsed_ms += dt_ms;
        self.difficulty.tick(self.elapsed_ms);
        self.field.try_spawn(
            rng,
            self.viewport_w,
            self.difficulty.obstacle_w,
            self.difficulty.obstacle_h,
        );
        self.field.advance(dt_ms, self.difficulty.speed);
        let verdict = collision::evaluate(
            &self.car_box(),
            self.field.obstacles_mut(),
            self.difficulty.points_per_obstacle,
        );
        self.score += verdict.score_delta;
        if verdict.collided {
            self.game_over = true;
            return;
        }
        self.field.prune(self.viewport_h);
    }
}
