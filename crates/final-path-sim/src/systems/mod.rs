//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for
//! read-only work) plus whatever engine state they need. They never despawn
//! while iterating; removals go through the despawn buffer and `cleanup`.

pub mod cleanup;
pub mod enemy_motion;
pub mod projectile;
pub mod snapshot;
pub mod targeting;
pub mod wave_spawner;
