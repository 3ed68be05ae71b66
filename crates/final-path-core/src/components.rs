//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems, with the small
//! exception of the health helpers, which every system needs identically.

use serde::{Deserialize, Serialize};

/// Monotonic spawn sequence number. Systems iterate entities in this order
/// so first-match rules stay stable across despawns. Doubles as the public
/// id in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);

/// An enemy walking the path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    /// Pixels per tick along the current segment.
    pub speed: f32,
    /// Index of the segment being walked. Equal to the path length once the
    /// enemy has reached the exit.
    pub segment_index: usize,
}

/// Remaining hit points. Never negative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hit_points: u32,
}

impl Health {
    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// Subtract `damage`, clamping at zero.
    pub fn take_damage(&mut self, damage: u32) {
        self.hit_points = self.hit_points.saturating_sub(damage);
    }
}

/// A stationary tower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tower {
    pub range: f32,
    pub base_damage: u32,
    /// Shots per second before the shop multiplier.
    pub base_fire_rate: f64,
    /// `None` until the first shot, which makes a new tower ready at once.
    pub last_fire_tick: Option<u64>,
}

/// A homing projectile in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Pixels per tick.
    pub speed: f32,
    /// Damage of the tower that fired it. The shop boost is added on impact.
    pub base_damage: u32,
}
