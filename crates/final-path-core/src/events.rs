//! Events emitted by the simulation for UI feedback and logging.

use serde::{Deserialize, Serialize};

use crate::enums::ShopItem;

/// Something notable that happened during a tick. Ids are `SpawnOrder` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted { wave: u32, enemies: u32 },
    WaveCompleted { wave: u32 },
    EnemySpawned { enemy_id: u64 },
    /// An enemy reached the exit.
    EnemyEscaped { enemy_id: u64, lives_remaining: u32 },
    EnemyKilled { enemy_id: u64, reward: u32 },
    TowerFired { tower_id: u64, enemy_id: u64 },
    ProjectileHit {
        enemy_id: u64,
        damage: u32,
        remaining_hit_points: u32,
    },
    TowerPlaced { tower_id: u64, cost: u32 },
    TowerRemoved { tower_id: u64, refund: u32 },
    ItemPurchased { item: ShopItem, cost: u32 },
    CommandRejected { reason: String },
    GameOver { wave: u32 },
    Restarted,
}

/// A short message shown to the player for a fixed number of ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransientMessage {
    pub text: String,
    pub remaining_ticks: u32,
}

impl TransientMessage {
    pub fn new(text: impl Into<String>, duration_ticks: u32) -> Self {
        Self {
            text: text.into(),
            remaining_ticks: duration_ticks,
        }
    }

    /// Count down one tick. Returns `false` once the message has expired.
    pub fn tick_down(&mut self) -> bool {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.remaining_ticks > 0
    }
}
