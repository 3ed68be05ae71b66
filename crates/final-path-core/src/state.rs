//! Game state snapshot: the complete visible state handed to the renderer each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{GameEvent, TransientMessage};
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub wave: WaveView,
    pub economy: EconomyView,
    pub score: ScoreView,
    pub shop: Vec<ShopItemView>,
    pub message: Option<TransientMessage>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub position: Position,
    pub hit_points: u32,
    pub segment_index: usize,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: u64,
    pub position: Position,
    pub range: f32,
    /// Base damage plus the shop boost.
    pub damage: u32,
    pub fire_interval_ticks: u64,
    pub last_fire_tick: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub position: Position,
    /// `None` once the target has been removed.
    pub target_id: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub current_wave: u32,
    pub wave_active: bool,
    pub enemies_per_wave: u32,
    pub enemies_spawned: u32,
    pub enemies_killed: u32,
    /// Size of the upcoming wave, for the "next wave" preview.
    pub next_wave_enemies: u32,
    pub difficulty: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub coins: u32,
    pub lives: u32,
    pub towers_built: u32,
    pub tower_limit: u32,
    pub tower_cost: u32,
    pub tower_refund: u32,
    pub damage_boost: u32,
    pub fire_rate_multiplier: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub enemies_defeated: u32,
    pub enemies_escaped: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopItemView {
    pub id: u32,
    pub name: String,
    pub cost: u32,
    pub affordable: bool,
}
