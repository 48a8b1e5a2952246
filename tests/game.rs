// Integration tests (native) for the simulation core. These avoid wasm and
// browser APIs entirely: the random source is injected as a scripted closure
// and time advances by explicit millisecond deltas, so everything runs under
// plain `cargo test` on the host.

use dodge_rush::game::collision::{self, CarBox};
use dodge_rush::game::difficulty::{
    DIFFICULTY_INTERVAL_MS, Difficulty, DifficultyVariant, MAX_OBSTACLE_SIZE, MAX_SPEED,
};
use dodge_rush::game::obstacles::{Obstacle, ObstacleField, SPAWN_CHANCE};
use dodge_rush::game::{CAR_WIDTH, GameState};

const VIEW_W: f64 = 480.0;
const VIEW_H: f64 = 640.0;

/// Rng yielding the given values in order, then a value high enough to never
/// trigger a spawn roll.
fn scripted(values: &[f64]) -> impl FnMut() -> f64 {
    let mut vals: std::collections::VecDeque<f64> = values.iter().copied().collect();
    move || vals.pop_front().unwrap_or(0.99)
}

fn calm() -> impl FnMut() -> f64 {
    scripted(&[])
}

// --- Obstacle field -----------------------------------------------------------

#[test]
fn spawn_roll_respects_probability_threshold() {
    let mut field = ObstacleField::new();
    // Roll exactly at the threshold: no spawn (strict less-than).
    let mut rng = scripted(&[SPAWN_CHANCE]);
    assert!(!field.try_spawn(&mut rng, VIEW_W, 50.0, 50.0));
    assert!(field.is_empty());

    let mut rng = scripted(&[SPAWN_CHANCE - 0.001, 0.5]);
    assert!(field.try_spawn(&mut rng, VIEW_W, 50.0, 50.0));
    assert_eq!(field.len(), 1);
    let ob = &field.obstacles()[0];
    assert_eq!(ob.x, 0.5 * (VIEW_W - 50.0));
    assert_eq!(ob.y, -50.0);
    assert!(!ob.passed);
}

#[test]
fn spawn_x_spans_the_viewport() {
    let mut field = ObstacleField::new();
    let mut rng = scripted(&[0.0, 0.0]);
    assert!(field.try_spawn(&mut rng, VIEW_W, 50.0, 50.0));
    assert_eq!(field.obstacles()[0].x, 0.0);

    let mut rng = scripted(&[0.0, 1.0]);
    assert!(field.try_spawn(&mut rng, VIEW_W, 50.0, 50.0));
    assert_eq!(field.obstacles()[1].x, VIEW_W - 50.0);
}

#[test]
fn obstacle_y_is_non_decreasing_while_live() {
    let mut field = ObstacleField::new();
    let mut rng = scripted(&[0.0, 0.5]);
    field.try_spawn(&mut rng, VIEW_W, 50.0, 50.0);

    let mut last_y = field.obstacles()[0].y;
    for dt in [16.0, 0.0, 8.0, 33.0, 16.0] {
        field.advance(dt, 5.0);
        let y = field.obstacles()[0].y;
        assert!(y >= last_y, "y went backwards: {last_y} -> {y}");
        last_y = y;
    }
    // Speed is pixels per 16ms: one 16ms frame at speed 5 moves 5 pixels.
    let mut field = ObstacleField::new();
    let mut rng = scripted(&[0.0, 0.0]);
    field.try_spawn(&mut rng, VIEW_W, 50.0, 50.0);
    field.advance(16.0, 5.0);
    assert_eq!(field.obstacles()[0].y, -45.0);
}

#[test]
fn prune_drops_offscreen_obstacles_and_keeps_order() {
    let mut field = ObstacleField::new();
    // First obstacle spawns early and travels further than the later one.
    let mut rng = scripted(&[0.0, 0.1]);
    field.try_spawn(&mut rng, VIEW_W, 50.0, 50.0);
    field.advance(16.0 * 100.0, 5.0); // y: -50 -> 450
    let mut rng = scripted(&[0.0, 0.9]);
    field.try_spawn(&mut rng, VIEW_W, 50.0, 50.0);
    field.advance(16.0 * 50.0, 5.0); // first: 700, second: 200

    field.prune(VIEW_H);
    assert_eq!(field.len(), 1);
    assert_eq!(field.obstacles()[0].x, 0.9 * (VIEW_W - 50.0));
}

// --- Collision & scoring -------------------------------------------------------

fn spec_car() -> CarBox {
    CarBox {
        x: 100.0,
        y: 300.0,
        width: 50.0,
        height: 100.0,
    }
}

fn obstacle_at(x: f64, y: f64) -> Obstacle {
    Obstacle {
        x,
        y,
        width: 30.0,
        height: 30.0,
        passed: false,
    }
}

#[test]
fn overlapping_boxes_collide() {
    let mut obstacles = vec![obstacle_at(110.0, 310.0)];
    let verdict = collision::evaluate(&spec_car(), &mut obstacles, 1);
    assert!(verdict.collided);
    assert_eq!(verdict.score_delta, 0);
}

#[test]
fn horizontally_clear_boxes_do_not_collide() {
    let mut obstacles = vec![obstacle_at(200.0, 310.0)];
    let verdict = collision::evaluate(&spec_car(), &mut obstacles, 1);
    assert!(!verdict.collided);
}

#[test]
fn first_collision_stops_the_walk_but_keeps_earlier_points() {
    let mut obstacles = vec![
        obstacle_at(0.0, 450.0),   // past the car's band: scores
        obstacle_at(110.0, 310.0), // collides
        obstacle_at(0.0, 500.0),   // never reached
    ];
    let verdict = collision::evaluate(&spec_car(), &mut obstacles, 3);
    assert!(verdict.collided);
    assert_eq!(verdict.score_delta, 3);
    assert!(obstacles[0].passed);
    assert!(!obstacles[2].passed, "walk continued past the collision");
}

#[test]
fn passed_flag_flips_at_most_once() {
    let mut obstacles = vec![obstacle_at(0.0, 450.0)];
    let first = collision::evaluate(&spec_car(), &mut obstacles, 2);
    assert_eq!(first.score_delta, 2);
    assert!(obstacles[0].passed);

    let second = collision::evaluate(&spec_car(), &mut obstacles, 2);
    assert_eq!(second.score_delta, 0);
    assert!(obstacles[0].passed);
}

#[test]
fn an_obstacle_inside_the_band_neither_collides_nor_scores() {
    // Horizontally clear of the car, vertically level with it.
    let mut obstacles = vec![obstacle_at(300.0, 350.0)];
    let verdict = collision::evaluate(&spec_car(), &mut obstacles, 1);
    assert!(!verdict.collided);
    assert_eq!(verdict.score_delta, 0);
    assert!(!obstacles[0].passed);
}

// --- Difficulty ----------------------------------------------------------------

#[test]
fn difficulty_fires_once_per_interval() {
    let mut d = Difficulty::new(DifficultyVariant::GrowPoints);
    assert!(!d.tick(DIFFICULTY_INTERVAL_MS - 1.0));
    assert!(d.tick(DIFFICULTY_INTERVAL_MS));
    assert_eq!(d.speed, 5.5);
    assert_eq!(d.points_per_obstacle, 2);
    // Same elapsed time again: the timer was reset, nothing fires.
    assert!(!d.tick(DIFFICULTY_INTERVAL_MS));
    assert!(!d.tick(2.0 * DIFFICULTY_INTERVAL_MS - 1.0));
    assert!(d.tick(2.0 * DIFFICULTY_INTERVAL_MS));
    assert_eq!(d.speed, 6.0);
}

#[test]
fn a_long_frame_advances_difficulty_by_a_single_step() {
    let mut d = Difficulty::new(DifficultyVariant::GrowPoints);
    // Ten intervals at once (tab was backgrounded): still one step.
    assert!(d.tick(10.0 * DIFFICULTY_INTERVAL_MS));
    assert_eq!(d.speed, 5.5);
    assert_eq!(d.points_per_obstacle, 2);
    assert!(!d.tick(10.0 * DIFFICULTY_INTERVAL_MS));
}

#[test]
fn grow_size_variant_caps_size_and_keeps_points_fixed() {
    let mut d = Difficulty::new(DifficultyVariant::GrowSize);
    for step in 1..=40 {
        d.tick(step as f64 * DIFFICULTY_INTERVAL_MS);
    }
    assert_eq!(d.obstacle_w, MAX_OBSTACLE_SIZE);
    assert_eq!(d.obstacle_h, MAX_OBSTACLE_SIZE);
    assert_eq!(d.points_per_obstacle, 1);
    assert_eq!(d.speed, MAX_SPEED);
}

#[test]
fn grow_points_variant_is_unbounded() {
    let mut d = Difficulty::new(DifficultyVariant::GrowPoints);
    for step in 1..=30 {
        d.tick(step as f64 * DIFFICULTY_INTERVAL_MS);
    }
    assert_eq!(d.points_per_obstacle, 31);
    assert_eq!(d.speed, MAX_SPEED);
}

// --- Game state ----------------------------------------------------------------

#[test]
fn pointer_position_is_clamped_to_the_viewport() {
    let mut state = GameState::new(VIEW_W, VIEW_H, DifficultyVariant::GrowPoints);
    state.set_pointer_x(-50.0);
    assert_eq!(state.car_x, 0.0);
    state.set_pointer_x(VIEW_W + 50.0);
    assert_eq!(state.car_x, VIEW_W - CAR_WIDTH);
}

#[test]
fn update_applies_a_single_difficulty_step_per_frame() {
    let mut state = GameState::new(VIEW_W, VIEW_H, DifficultyVariant::GrowPoints);
    let mut rng = calm();
    state.update(10.0 * DIFFICULTY_INTERVAL_MS, &mut rng);
    assert_eq!(state.elapsed_ms, 10.0 * DIFFICULTY_INTERVAL_MS);
    assert_eq!(state.difficulty.speed, 5.5);
}

#[test]
fn a_passing_obstacle_scores_and_is_pruned() {
    let mut state = GameState::new(VIEW_W, VIEW_H, DifficultyVariant::GrowPoints);
    // One spawn at the far left, well away from the centered car.
    let mut rng = scripted(&[0.01, 0.0]);
    state.update(16.0, &mut rng);
    assert_eq!(state.field.len(), 1);

    let mut rng = calm();
    for _ in 0..200 {
        state.update(16.0, &mut rng);
    }
    assert!(!state.game_over);
    assert_eq!(state.score, 1);
    assert!(state.field.is_empty(), "passed obstacle should be pruned");
}

#[test]
fn an_obstacle_over_the_car_ends_the_session() {
    let mut state = GameState::new(VIEW_W, VIEW_H, DifficultyVariant::GrowPoints);
    // Spawn directly above the centered car: car_x = 215, so x-fraction 0.5.
    let mut rng = scripted(&[0.01, 0.5]);
    state.update(16.0, &mut rng);
    assert_eq!(state.field.obstacles()[0].x, state.car_x);

    let mut rng = calm();
    let mut frames = 0;
    while !state.game_over && frames < 2000 {
        state.update(16.0, &mut rng);
        frames += 1;
    }
    assert!(state.game_over, "obstacle never reached the car");
    assert_eq!(state.score, 0, "a colliding obstacle must not score");

    // Terminal state is frozen: further updates change nothing.
    let score = state.score;
    let elapsed = state.elapsed_ms;
    let count = state.field.len();
    state.update(16.0, &mut rng);
    assert_eq!(state.score, score);
    assert_eq!(state.elapsed_ms, elapsed);
    assert_eq!(state.field.len(), count);
}
