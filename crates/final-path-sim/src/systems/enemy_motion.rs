//! Enemy path-following.
//!
//! Each live enemy walks the center line of its current segment. The moving
//! coordinate is clamped to the segment's end; the index advances on the
//! following tick, so nothing carries over between segments.

use hecs::{Entity, World};

use final_path_core::components::{Enemy, Health, SpawnOrder};
use final_path_core::path::PathNetwork;
use final_path_core::types::Position;

/// Why an enemy left the active collection this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// Reached the end of the path alive.
    Escaped,
    /// Hit points reached zero on an earlier tick.
    Killed,
}

/// An enemy the orchestrator must settle and despawn.
#[derive(Debug, Clone, Copy)]
pub struct Exit {
    pub entity: Entity,
    pub enemy_id: u64,
    pub departure: Departure,
}

/// Move every live enemy one step and report the ones that are done,
/// in spawn order. Departing enemies are not despawned here.
pub fn run(world: &mut World, path: &PathNetwork) -> Vec<Exit> {
    let mut order: Vec<(SpawnOrder, Entity)> = world
        .query::<(&SpawnOrder, &Enemy)>()
        .iter()
        .map(|(entity, (order, _))| (*order, entity))
        .collect();
    order.sort_unstable_by_key(|(order, _)| *order);

    let mut exits = Vec::new();
    for (spawn_order, entity) in order {
        let Ok((position, enemy, health)) =
            world.query_one_mut::<(&mut Position, &mut Enemy, &Health)>(entity)
        else {
            continue;
        };

        let departure = if !health.is_alive() {
            Some(Departure::Killed)
        } else if enemy.segment_index >= path.len() {
            Some(Departure::Escaped)
        } else {
            step(position, enemy, path);
            None
        };

        if let Some(departure) = departure {
            exits.push(Exit {
                entity,
                enemy_id: spawn_order.0,
                departure,
            });
        }
    }
    exits
}

/// Advance one enemy by one tick along its current segment.
pub fn step(position: &mut Position, enemy: &mut Enemy, path: &PathNetwork) {
    let Some(segment) = path.segment(enemy.segment_index) else {
        return;
    };

    if segment.is_vertical() {
        position.x = path.corridor_center(segment.start_x);
        let target = path.corridor_center(segment.end_y);
        if advance_axis(&mut position.y, target, segment.end_y >= segment.start_y, enemy.speed) {
            enemy.segment_index += 1;
        }
    } else {
        position.y = path.corridor_center(segment.start_y);
        let target = path.corridor_center(segment.end_x);
        if advance_axis(&mut position.x, target, segment.end_x >= segment.start_x, enemy.speed) {
            enemy.segment_index += 1;
        }
    }
}

/// Move `coord` toward `target` by `speed` without passing it.
/// Returns true, without moving, when the target was already reached.
fn advance_axis(coord: &mut f32, target: f32, increasing: bool, speed: f32) -> bool {
    if increasing {
        if *coord < target {
            *coord = (*coord + speed).min(target);
            false
        } else {
            true
        }
    } else if *coord > target {
        *coord = (*coord - speed).max(target);
        false
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use final_path_core::path::Segment;

    fn path() -> PathNetwork {
        PathNetwork::new(
            vec![
                Segment::new(0.0, 0.0, 0.0, 10.0),
                Segment::new(0.0, 10.0, -20.0, 10.0),
                Segment::new(-20.0, 10.0, -20.0, 0.0),
            ],
            50.0,
            30.0,
        )
        .unwrap()
    }

    #[test]
    fn test_vertical_snaps_and_clamps() {
        let path = path();
        let mut pos = Position::new(31.0, 25.0);
        let mut enemy = Enemy {
            speed: 4.0,
            segment_index: 0,
        };

        step(&mut pos, &mut enemy, &path);
        assert_eq!(pos, Position::new(25.0, 29.0));
        step(&mut pos, &mut enemy, &path);
        assert_eq!(pos.y, 33.0);
        step(&mut pos, &mut enemy, &path);
        assert_eq!(pos.y, 35.0, "clamped to the segment end");
        assert_eq!(enemy.segment_index, 0);

        step(&mut pos, &mut enemy, &path);
        assert_eq!(pos.y, 35.0, "arrival tick does not move");
        assert_eq!(enemy.segment_index, 1);
    }

    #[test]
    fn test_horizontal_leftward_and_vertical_upward() {
        let path = path();
        let mut pos = Position::new(25.0, 35.0);
        let mut enemy = Enemy {
            speed: 8.0,
            segment_index: 1,
        };

        // Leftward: 25 -> 17 -> 9 -> 5 (clamped) -> advance.
        for _ in 0..3 {
            step(&mut pos, &mut enemy, &path);
        }
        assert_eq!(pos, Position::new(5.0, 35.0));
        step(&mut pos, &mut enemy, &path);
        assert_eq!(enemy.segment_index, 2);

        // Upward: 35 -> 27 -> 25 (clamped) -> advance to the exit.
        step(&mut pos, &mut enemy, &path);
        step(&mut pos, &mut enemy, &path);
        assert_eq!(pos, Position::new(5.0, 25.0));
        step(&mut pos, &mut enemy, &path);
        assert_eq!(enemy.segment_index, path.len());

        // Past the end nothing moves.
        step(&mut pos, &mut enemy, &path);
        assert_eq!(pos, Position::new(5.0, 25.0));
    }

    #[test]
    fn test_run_reports_exits_in_spawn_order() {
        let path = path();
        let mut world = World::new();
        let escaped = world.spawn((
            SpawnOrder(3),
            Position::new(5.0, 25.0),
            Enemy {
                speed: 1.0,
                segment_index: 3,
            },
            Health { hit_points: 10 },
        ));
        let killed = world.spawn((
            SpawnOrder(1),
            Position::new(25.0, 25.0),
            Enemy {
                speed: 1.0,
                segment_index: 0,
            },
            Health { hit_points: 0 },
        ));
        let walking = world.spawn((
            SpawnOrder(2),
            Position::new(25.0, 25.0),
            Enemy {
                speed: 1.0,
                segment_index: 0,
            },
            Health { hit_points: 10 },
        ));

        let exits = run(&mut world, &path);
        assert_eq!(exits.len(), 2);
        assert_eq!(exits[0].entity, killed);
        assert_eq!(exits[0].departure, Departure::Killed);
        assert_eq!(exits[1].entity, escaped);
        assert_eq!(exits[1].departure, Departure::Escaped);

        let pos = *world.get::<&Position>(walking).unwrap();
        assert_eq!(pos.y, 26.0);
        let dead_pos = *world.get::<&Position>(killed).unwrap();
        assert_eq!(dead_pos.y, 25.0, "dead enemies do not move");
    }
}
