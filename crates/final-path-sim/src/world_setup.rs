//! Entity spawn factories for the simulation world.
//!
//! Every factory stamps the entity with the next `SpawnOrder`, which is also
//! the id reported in snapshots and events.

use hecs::{Entity, World};

use final_path_core::components::*;
use final_path_core::config::SimConfig;
use final_path_core::path::PathNetwork;
use final_path_core::types::Position;

use crate::systems::projectile::HomingTarget;

/// Hand out the next spawn sequence number.
fn next_order(next_id: &mut u64) -> SpawnOrder {
    let order = SpawnOrder(*next_id);
    *next_id += 1;
    order
}

/// Spawn an enemy at the path entrance, scaled for the given difficulty.
pub fn spawn_enemy(
    world: &mut World,
    path: &PathNetwork,
    config: &SimConfig,
    difficulty: u32,
    next_id: &mut u64,
) -> (Entity, u64) {
    spawn_enemy_at(
        world,
        path.spawn_point(),
        config.enemy_speed(difficulty),
        config.enemy_hit_points(difficulty),
        next_id,
    )
}

/// Spawn an enemy at an arbitrary point on the first segment.
pub fn spawn_enemy_at(
    world: &mut World,
    position: Position,
    speed: f32,
    hit_points: u32,
    next_id: &mut u64,
) -> (Entity, u64) {
    let order = next_order(next_id);
    let entity = world.spawn((
        order,
        position,
        Enemy {
            speed,
            segment_index: 0,
        },
        Health { hit_points },
    ));
    (entity, order.0)
}

/// Spawn a tower with the configured base stats. Validation is the caller's job.
pub fn spawn_tower(
    world: &mut World,
    config: &SimConfig,
    position: Position,
    next_id: &mut u64,
) -> (Entity, u64) {
    let order = next_order(next_id);
    let entity = world.spawn((
        order,
        position,
        Tower {
            range: config.tower_range,
            base_damage: config.tower_base_damage,
            base_fire_rate: config.tower_base_fire_rate,
            last_fire_tick: None,
        },
    ));
    (entity, order.0)
}

/// Spawn a projectile at `origin` homing on `target`.
pub fn spawn_projectile(
    world: &mut World,
    config: &SimConfig,
    origin: Position,
    target: Entity,
    base_damage: u32,
    next_id: &mut u64,
) -> Entity {
    let order = next_order(next_id);
    world.spawn((
        order,
        origin,
        Projectile {
            speed: config.projectile_speed,
            base_damage,
        },
        HomingTarget(target),
    ))
}
