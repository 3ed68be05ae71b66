//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use final_path_core::components::*;
use final_path_core::config::SimConfig;
use final_path_core::enums::{GamePhase, ShopItem};
use final_path_core::events::{GameEvent, TransientMessage};
use final_path_core::state::*;
use final_path_core::types::{Position, SimTime};

use crate::economy::{EconomyState, ScoreState};
use crate::systems::projectile::HomingTarget;
use crate::systems::wave_spawner::WaveState;

/// Everything outside the ECS world that a snapshot reports.
pub struct SnapshotInputs<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub config: &'a SimConfig,
    pub wave: &'a WaveState,
    pub economy: &'a EconomyState,
    pub score: &'a ScoreState,
    pub message: Option<&'a TransientMessage>,
    pub events: Vec<GameEvent>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(world: &World, inputs: SnapshotInputs<'_>) -> GameStateSnapshot {
    let towers = build_towers(world, inputs.config, inputs.economy);
    let economy = EconomyView {
        coins: inputs.economy.coins,
        lives: inputs.economy.lives,
        towers_built: towers.len() as u32,
        tower_limit: inputs.economy.tower_limit,
        tower_cost: inputs.economy.tower_cost,
        tower_refund: inputs.economy.tower_refund,
        damage_boost: inputs.economy.damage_boost,
        fire_rate_multiplier: inputs.economy.fire_rate_multiplier,
    };

    GameStateSnapshot {
        time: inputs.time,
        phase: inputs.phase,
        enemies: build_enemies(world),
        towers,
        projectiles: build_projectiles(world),
        wave: build_wave(inputs.wave),
        economy,
        score: ScoreView {
            enemies_defeated: inputs.score.enemies_defeated,
            enemies_escaped: inputs.score.enemies_escaped,
        },
        shop: build_shop(inputs.config, inputs.economy),
        message: inputs.message.cloned(),
        events: inputs.events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&SpawnOrder, &Position, &Enemy, &Health)>()
        .iter()
        .map(|(_, (order, pos, enemy, health))| EnemyView {
            id: order.0,
            position: *pos,
            hit_points: health.hit_points,
            segment_index: enemy.segment_index,
            alive: health.is_alive(),
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_towers(world: &World, config: &SimConfig, economy: &EconomyState) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&SpawnOrder, &Position, &Tower)>()
        .iter()
        .map(|(_, (order, pos, tower))| TowerView {
            id: order.0,
            position: *pos,
            range: tower.range,
            damage: economy.tower_damage(tower.base_damage),
            fire_interval_ticks: economy.fire_interval(config, tower.base_fire_rate),
            last_fire_tick: tower.last_fire_tick,
        })
        .collect();
    towers.sort_by_key(|t| t.id);
    towers
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&SpawnOrder, &Position, &HomingTarget)>()
        .iter()
        .map(|(_, (order, pos, target))| ProjectileView {
            id: order.0,
            position: *pos,
            target_id: live_target_id(world, target),
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}

/// The target's id, if it still exists and is alive.
fn live_target_id(world: &World, target: &HomingTarget) -> Option<u64> {
    let alive = world
        .get::<&Health>(target.0)
        .map(|h| h.is_alive())
        .unwrap_or(false);
    if !alive {
        return None;
    }
    world.get::<&SpawnOrder>(target.0).ok().map(|o| o.0)
}

fn build_wave(wave: &WaveState) -> WaveView {
    WaveView {
        current_wave: wave.current_wave,
        wave_active: wave.wave_active,
        enemies_per_wave: wave.enemies_per_wave,
        enemies_spawned: wave.enemies_spawned,
        enemies_killed: wave.enemies_killed,
        next_wave_enemies: wave.next_wave_enemies,
        difficulty: wave.difficulty,
    }
}

fn build_shop(config: &SimConfig, economy: &EconomyState) -> Vec<ShopItemView> {
    ShopItem::ALL
        .iter()
        .map(|&item| {
            let cost = config.item_cost(item);
            ShopItemView {
                id: item.id(),
                name: item.name().to_string(),
                cost,
                affordable: economy.coins >= cost,
            }
        })
        .collect()
}
