//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D position in playfield space (pixels, origin top-left, y grows down).
/// Always the center of whatever entity carries it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another position.
    pub fn distance_sq_to(&self, other: &Position) -> f32 {
        self.to_vec2().distance_squared(other.to_vec2())
    }

    /// Euclidean distance to another position.
    pub fn range_to(&self, other: &Position) -> f32 {
        self.to_vec2().distance(other.to_vec2())
    }

    /// Whether `point` lies inside the axis-aligned square of side `size`
    /// centered on this position (edges inclusive).
    pub fn square_contains(&self, size: f32, point: &Position) -> bool {
        let half = size / 2.0;
        point.x >= self.x - half
            && point.x <= self.x + half
            && point.y >= self.y - half
            && point.y <= self.y + half
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl SimTime {
    /// Advance by one tick at the given tick rate.
    pub fn advance(&mut self, tick_rate: u32) {
        self.tick += 1;
        self.elapsed_secs += 1.0 / tick_rate as f64;
    }
}
