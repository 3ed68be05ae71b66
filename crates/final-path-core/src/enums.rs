//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Instructions screen shown before the first game. Nothing moves.
    #[default]
    Instructions,
    /// Normal play: waves, towers and projectiles are simulated.
    Playing,
    /// Lives exhausted. Only `Restart` is accepted.
    GameOver,
}

/// Items sold in the shop. Discriminants are the stable item ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopItem {
    /// +1 tower limit.
    TowerSlot = 1,
    /// +damage for every tower, current and future.
    DamageUpgrade = 2,
    /// +fire-rate multiplier for every tower.
    FireRateUpgrade = 4,
}

impl ShopItem {
    /// Catalog order.
    pub const ALL: [ShopItem; 3] = [
        ShopItem::TowerSlot,
        ShopItem::DamageUpgrade,
        ShopItem::FireRateUpgrade,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShopItem::TowerSlot => "Buy Tower Slot",
            ShopItem::DamageUpgrade => "Tower Damage +10",
            ShopItem::FireRateUpgrade => "Fire Rate +10%",
        }
    }
}
