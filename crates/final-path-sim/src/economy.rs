//! Economy: coins, lives, tower limit, shop upgrades, and the placement and
//! removal rules that spend and refund coins.
//!
//! Stored on `SimulationEngine`, not as ECS entities.

use hecs::{Entity, World};
use tracing::debug;

use final_path_core::components::{SpawnOrder, Tower};
use final_path_core::config::SimConfig;
use final_path_core::enums::ShopItem;
use final_path_core::error::CommandError;
use final_path_core::path::PathNetwork;
use final_path_core::types::Position;

use crate::world_setup;

/// Player resources and global tower modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct EconomyState {
    pub coins: u32,
    pub lives: u32,
    pub tower_limit: u32,
    pub tower_cost: u32,
    pub tower_refund: u32,
    /// Added to every tower's base damage.
    pub damage_boost: u32,
    /// Multiplies every tower's base fire rate.
    pub fire_rate_multiplier: f64,
}

impl EconomyState {
    pub fn new(config: &SimConfig) -> Self {
        let mut economy = Self {
            coins: config.starting_coins,
            lives: config.starting_lives,
            tower_limit: config.starting_tower_limit,
            tower_cost: 0,
            tower_refund: 0,
            damage_boost: 0,
            fire_rate_multiplier: 1.0,
        };
        economy.reprice(config);
        economy
    }

    /// Tower cost tracks the limit; refund is half the cost.
    fn reprice(&mut self, config: &SimConfig) {
        self.tower_cost = config.tower_cost_for_limit(self.tower_limit);
        self.tower_refund = self.tower_cost / 2;
    }

    pub fn tower_damage(&self, base_damage: u32) -> u32 {
        base_damage + self.damage_boost
    }

    pub fn fire_interval(&self, config: &SimConfig, base_fire_rate: f64) -> u64 {
        config.fire_interval_ticks(base_fire_rate, self.fire_rate_multiplier)
    }

    /// Pay the kill reward. Returns the amount paid.
    pub fn award_kill(&mut self, config: &SimConfig) -> u32 {
        self.coins += config.kill_reward;
        config.kill_reward
    }

    /// Deduct one life. Returns true when no lives remain.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    fn spend(&mut self, amount: u32) -> Result<(), CommandError> {
        if self.coins < amount {
            return Err(CommandError::InsufficientCoins {
                needed: amount,
                available: self.coins,
            });
        }
        self.coins -= amount;
        Ok(())
    }

    /// Buy one shop item and apply its effect. Nothing changes on rejection.
    pub fn purchase(&mut self, config: &SimConfig, item_id: u32) -> Result<(ShopItem, u32), CommandError> {
        let item = ShopItem::from_id(item_id).ok_or(CommandError::UnknownItem { id: item_id })?;
        let cost = config.item_cost(item);
        self.spend(cost)?;

        match item {
            ShopItem::TowerSlot => {
                self.tower_limit += 1;
                self.reprice(config);
            }
            ShopItem::DamageUpgrade => self.damage_boost += config.damage_upgrade_amount,
            ShopItem::FireRateUpgrade => {
                self.fire_rate_multiplier += config.fire_rate_upgrade_step;
            }
        }
        Ok((item, cost))
    }
}

/// Running score tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub enemies_defeated: u32,
    pub enemies_escaped: u32,
}

/// Towers in placement order with their positions.
fn towers_in_order(world: &World) -> Vec<(SpawnOrder, Entity, Position)> {
    let mut towers: Vec<(SpawnOrder, Entity, Position)> = world
        .query::<(&SpawnOrder, &Position, &Tower)>()
        .iter()
        .map(|(entity, (order, position, _))| (*order, entity, *position))
        .collect();
    towers.sort_unstable_by_key(|(order, _, _)| *order);
    towers
}

/// Validate and build a tower centered at `(x, y)`. Returns the new tower's id.
///
/// Checks run in a fixed order and the first failure wins: HUD band,
/// overlap with an existing tower, tower limit, coins, path clearance.
pub fn place_tower(
    world: &mut World,
    path: &PathNetwork,
    config: &SimConfig,
    economy: &mut EconomyState,
    next_id: &mut u64,
    x: f32,
    y: f32,
) -> Result<u64, CommandError> {
    if y < config.hud_height {
        return Err(CommandError::InHudArea);
    }

    let candidate = Position::new(x, y);
    let towers = towers_in_order(world);
    let min_gap_sq = config.tower_size * config.tower_size;
    if towers
        .iter()
        .any(|(_, _, pos)| pos.distance_sq_to(&candidate) < min_gap_sq)
    {
        return Err(CommandError::OverlapsTower);
    }

    if towers.len() as u32 >= economy.tower_limit {
        return Err(CommandError::TowerLimitReached {
            limit: economy.tower_limit,
        });
    }

    if economy.coins < economy.tower_cost {
        return Err(CommandError::InsufficientCoins {
            needed: economy.tower_cost,
            available: economy.coins,
        });
    }

    if !path.can_place_tower(x, y, config.tower_size) {
        return Err(CommandError::OnPath);
    }

    let cost = economy.tower_cost;
    economy.spend(cost)?;
    let (_entity, tower_id) = world_setup::spawn_tower(world, config, candidate, next_id);
    debug!(tower_id, x, y, cost, "tower placed");
    Ok(tower_id)
}

/// Sell the first tower (in placement order) whose footprint contains the
/// point. Returns `(tower_id, refund)`.
pub fn remove_tower(
    world: &mut World,
    config: &SimConfig,
    economy: &mut EconomyState,
    x: f32,
    y: f32,
) -> Result<(u64, u32), CommandError> {
    let point = Position::new(x, y);
    let (order, entity, _) = towers_in_order(world)
        .into_iter()
        .find(|(_, _, pos)| pos.square_contains(config.tower_size, &point))
        .ok_or(CommandError::NoTowerAt)?;

    let _ = world.despawn(entity);
    let refund = economy.tower_refund;
    economy.coins += refund;
    debug!(tower_id = order.0, refund, "tower removed");
    Ok((order.0, refund))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_purchase_changes_nothing() {
        let config = SimConfig::default();
        let mut economy = EconomyState::new(&config);
        economy.coins = 40;
        let before = economy.clone();

        assert_eq!(
            economy.purchase(&config, ShopItem::DamageUpgrade.id()),
            Err(CommandError::InsufficientCoins {
                needed: 50,
                available: 40
            })
        );
        assert_eq!(economy, before);

        assert_eq!(
            economy.purchase(&config, 3),
            Err(CommandError::UnknownItem { id: 3 })
        );
        assert_eq!(economy, before);
    }

    #[test]
    fn test_each_item_applies_one_effect() {
        let config = SimConfig::default();
        let mut economy = EconomyState::new(&config);
        economy.coins = 500;

        economy.purchase(&config, 1).unwrap();
        assert_eq!(economy.tower_limit, 4);
        assert_eq!(economy.tower_cost, 25);
        assert_eq!(economy.tower_refund, 12);
        assert_eq!(economy.damage_boost, 0);

        economy.purchase(&config, 2).unwrap();
        assert_eq!(economy.damage_boost, 10);
        assert_eq!(economy.tower_damage(10), 20);

        economy.purchase(&config, 4).unwrap();
        assert!((economy.fire_rate_multiplier - 1.1).abs() < 1e-9);
        assert_eq!(economy.fire_interval(&config, 1.0), 54);

        assert_eq!(economy.coins, 500 - 30 - 50 - 45);
    }

    #[test]
    fn test_lives_saturate() {
        let config = SimConfig {
            starting_lives: 2,
            ..Default::default()
        };
        let mut economy = EconomyState::new(&config);
        assert!(!economy.lose_life());
        assert!(economy.lose_life());
        assert!(economy.lose_life());
        assert_eq!(economy.lives, 0);
    }
}
