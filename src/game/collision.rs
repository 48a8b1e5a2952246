//! Axis-aligned bounding-box collision and pass scoring.

use super::obstacles::Obstacle;

/// The car's hitbox for one frame. `y` is the ground line (top edge of the
/// car sprite).
#[derive(Clone, Copy, Debug)]
pub struct CarBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub score_delta: u64,
    pub collided: bool,
}

/// Walk the obstacles in insertion order. The collision test runs before the
/// pass test, so an obstacle can never both end the session and score in the
/// same frame; the first hit aborts the walk with points from earlier
/// obstacles retained.
pub fn evaluate(car: &CarBox, obstacles: &mut [Obstacle], points_per_obstacle: u64) -> Verdict {
    let mut score_delta = 0;
    for ob in obstacles.iter_mut() {
        let overlap = ob.x < car.x + car.width
            && ob.x + ob.width > car.x
            && ob.y < car.y + car.height
            && ob.y + ob.height > car.y;
        if overlap {
            return Verdict {
                score_delta,
                collided: true,
            };
        }
        if !ob.passed && ob.y > car.y + car.height {
            ob.passed = true;
            score_delta += points_per_obstacle;
        }
    }
    Verdict {
        score_delta,
        collided: false,
    }
}
