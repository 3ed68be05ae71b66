//! Tower targeting: cooldown check and first-match target acquisition.
//!
//! Each ready tower scans live enemies in spawn order and fires one homing
//! projectile at the first one inside its range. Selection is first-match,
//! not nearest.

use hecs::{Entity, World};
use tracing::trace;

use final_path_core::components::{Enemy, Health, SpawnOrder, Tower};
use final_path_core::config::SimConfig;
use final_path_core::events::GameEvent;
use final_path_core::types::Position;

use crate::economy::EconomyState;
use crate::world_setup;

/// A live enemy as seen by the targeting pass.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub entity: Entity,
    pub enemy_id: u64,
    pub position: Position,
}

/// Run the targeting pass for one tick.
pub fn run(
    world: &mut World,
    config: &SimConfig,
    economy: &EconomyState,
    next_id: &mut u64,
    events: &mut Vec<GameEvent>,
    current_tick: u64,
) {
    let candidates = live_enemies(world);
    if candidates.is_empty() {
        return;
    }

    let mut towers: Vec<(SpawnOrder, Entity)> = world
        .query::<(&SpawnOrder, &Tower)>()
        .iter()
        .map(|(entity, (order, _))| (*order, entity))
        .collect();
    towers.sort_unstable_by_key(|(order, _)| *order);

    let mut shots = Vec::new();
    for (tower_order, entity) in towers {
        let Ok((position, tower)) = world.query_one_mut::<(&Position, &mut Tower)>(entity) else {
            continue;
        };

        let interval = economy.fire_interval(config, tower.base_fire_rate);
        if !can_fire(tower, current_tick, interval) {
            continue;
        }
        let Some(target) = acquire_target(position, tower.range, &candidates) else {
            continue;
        };

        tower.last_fire_tick = Some(current_tick);
        shots.push((*position, target, tower.base_damage));
        trace!(tower_id = tower_order.0, enemy_id = target.enemy_id, "tower fired");
        events.push(GameEvent::TowerFired {
            tower_id: tower_order.0,
            enemy_id: target.enemy_id,
        });
    }

    for (origin, target, base_damage) in shots {
        world_setup::spawn_projectile(world, config, origin, target.entity, base_damage, next_id);
    }
}

/// Live enemies in spawn order.
pub fn live_enemies(world: &World) -> Vec<Candidate> {
    let mut candidates: Vec<(SpawnOrder, Candidate)> = world
        .query::<(&SpawnOrder, &Position, &Health, &Enemy)>()
        .iter()
        .filter(|(_, (_, _, health, _))| health.is_alive())
        .map(|(entity, (order, position, _, _))| {
            (
                *order,
                Candidate {
                    entity,
                    enemy_id: order.0,
                    position: *position,
                },
            )
        })
        .collect();
    candidates.sort_unstable_by_key(|(order, _)| *order);
    candidates.into_iter().map(|(_, c)| c).collect()
}

/// A tower that has never fired is ready immediately.
pub fn can_fire(tower: &Tower, current_tick: u64, interval: u64) -> bool {
    match tower.last_fire_tick {
        None => true,
        Some(last) => current_tick.saturating_sub(last) >= interval,
    }
}

/// First candidate with squared distance `<= range^2`.
pub fn acquire_target(position: &Position, range: f32, candidates: &[Candidate]) -> Option<Candidate> {
    let range_sq = range * range;
    candidates
        .iter()
        .find(|c| position.distance_sq_to(&c.position) <= range_sq)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(world: &mut World, id: u64, x: f32, y: f32) -> Candidate {
        Candidate {
            entity: world.spawn((SpawnOrder(id),)),
            enemy_id: id,
            position: Position::new(x, y),
        }
    }

    #[test]
    fn test_first_match_not_nearest() {
        let mut world = World::new();
        let far = candidate(&mut world, 0, 190.0, 100.0);
        let near = candidate(&mut world, 1, 105.0, 100.0);
        let tower = Position::new(100.0, 100.0);

        let picked = acquire_target(&tower, 100.0, &[far, near]).unwrap();
        assert_eq!(picked.enemy_id, far.enemy_id);
    }

    #[test]
    fn test_range_is_inclusive() {
        let mut world = World::new();
        let edge = candidate(&mut world, 0, 200.0, 100.0);
        let tower = Position::new(100.0, 100.0);
        assert!(acquire_target(&tower, 100.0, &[edge]).is_some());
        assert!(acquire_target(&tower, 99.0, &[edge]).is_none());
    }

    #[test]
    fn test_cooldown() {
        let mut tower = Tower {
            range: 100.0,
            base_damage: 10,
            base_fire_rate: 1.0,
            last_fire_tick: None,
        };
        assert!(can_fire(&tower, 0, 60));
        tower.last_fire_tick = Some(100);
        assert!(!can_fire(&tower, 159, 60));
        assert!(can_fire(&tower, 160, 60));
    }

    #[test]
    fn test_dead_enemies_are_not_candidates() {
        let mut world = World::new();
        world.spawn((
            SpawnOrder(0),
            Position::new(0.0, 0.0),
            Health { hit_points: 0 },
            Enemy {
                speed: 1.0,
                segment_index: 0,
            },
        ));
        world.spawn((
            SpawnOrder(1),
            Position::new(0.0, 0.0),
            Health { hit_points: 5 },
            Enemy {
                speed: 1.0,
                segment_index: 0,
            },
        ));
        let live = live_enemies(&world);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].enemy_id, 1);
    }
}
