//! Projectile resolution: perfect homing and hit/damage application.

use glam::Vec2;
use hecs::{Entity, World};
use tracing::debug;

use final_path_core::components::{Health, Projectile, SpawnOrder};
use final_path_core::events::GameEvent;
use final_path_core::types::Position;

use crate::economy::EconomyState;

/// Non-owning reference to the enemy a projectile chases. The handle is
/// generation-checked, so a despawned target simply fails to resolve.
#[derive(Debug, Clone, Copy)]
pub struct HomingTarget(pub Entity);

/// Advance every projectile one tick. Hits and misses are queued for despawn.
pub fn run(
    world: &mut World,
    economy: &EconomyState,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut projectiles: Vec<(SpawnOrder, Entity, Entity)> = world
        .query::<(&SpawnOrder, &HomingTarget, &Projectile)>()
        .iter()
        .map(|(entity, (order, target, _))| (*order, entity, target.0))
        .collect();
    projectiles.sort_unstable_by_key(|(order, _, _)| *order);

    for (_, entity, target) in projectiles {
        let target_pos = match world.query_one_mut::<(&Position, &Health)>(target) {
            Ok((pos, health)) if health.is_alive() => *pos,
            _ => {
                // Target gone or already dead: silent miss.
                despawn_buffer.push(entity);
                continue;
            }
        };

        let Ok((position, projectile)) =
            world.query_one_mut::<(&mut Position, &Projectile)>(entity)
        else {
            continue;
        };

        let current: Vec2 = position.to_vec2();
        let delta = target_pos.to_vec2() - current;
        let distance = delta.length();
        if distance < projectile.speed {
            let damage = economy.tower_damage(projectile.base_damage);
            despawn_buffer.push(entity);
            apply_hit(world, target, damage, events);
        } else {
            *position = Position::from(current + delta / distance * projectile.speed);
        }
    }
}

fn apply_hit(world: &mut World, target: Entity, damage: u32, events: &mut Vec<GameEvent>) {
    let Ok((health, order)) = world.query_one_mut::<(&mut Health, &SpawnOrder)>(target) else {
        return;
    };
    health.take_damage(damage);
    debug!(
        enemy_id = order.0,
        damage,
        remaining = health.hit_points,
        "enemy hit"
    );
    events.push(GameEvent::ProjectileHit {
        enemy_id: order.0,
        damage,
        remaining_hit_points: health.hit_points,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use final_path_core::config::SimConfig;

    fn spawn_target(world: &mut World, x: f32, y: f32, hit_points: u32) -> Entity {
        world.spawn((SpawnOrder(0), Position::new(x, y), Health { hit_points }))
    }

    fn spawn_shot(world: &mut World, x: f32, y: f32, target: Entity) -> Entity {
        world.spawn((
            SpawnOrder(1),
            Position::new(x, y),
            Projectile {
                speed: 10.0,
                base_damage: 10,
            },
            HomingTarget(target),
        ))
    }

    #[test]
    fn test_homes_then_hits() {
        let economy = EconomyState::new(&SimConfig::default());
        let mut world = World::new();
        let target = spawn_target(&mut world, 0.0, 25.0, 40);
        let shot = spawn_shot(&mut world, 0.0, 0.0, target);
        let mut events = Vec::new();
        let mut despawn = Vec::new();

        run(&mut world, &economy, &mut events, &mut despawn);
        assert_eq!(*world.get::<&Position>(shot).unwrap(), Position::new(0.0, 10.0));
        run(&mut world, &economy, &mut events, &mut despawn);
        assert!(despawn.is_empty());
        run(&mut world, &economy, &mut events, &mut despawn);
        assert_eq!(despawn, vec![shot]);
        assert_eq!(world.get::<&Health>(target).unwrap().hit_points, 30);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_missing_target_is_silent_miss() {
        let economy = EconomyState::new(&SimConfig::default());
        let mut world = World::new();
        let target = spawn_target(&mut world, 0.0, 50.0, 40);
        let shot = spawn_shot(&mut world, 0.0, 0.0, target);
        world.despawn(target).unwrap();

        let mut events = Vec::new();
        let mut despawn = Vec::new();
        run(&mut world, &economy, &mut events, &mut despawn);
        assert_eq!(despawn, vec![shot]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_dead_target_is_silent_miss() {
        let economy = EconomyState::new(&SimConfig::default());
        let mut world = World::new();
        let target = spawn_target(&mut world, 0.0, 5.0, 0);
        let shot = spawn_shot(&mut world, 0.0, 0.0, target);

        let mut events = Vec::new();
        let mut despawn = Vec::new();
        run(&mut world, &economy, &mut events, &mut despawn);
        assert_eq!(despawn, vec![shot]);
        assert!(events.is_empty());
    }
}
