//! The canonical simulation configuration.
//!
//! Every tunable lives here as a named field. Deserialization fills missing
//! fields from the defaults, so a config file only needs the overrides.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::ShopItem;
use crate::error::ConfigError;
use crate::path::{default_segments, PathNetwork, Segment};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // --- Timing ---
    pub tick_rate: u32,
    pub spawn_interval_ticks: u64,
    pub message_duration_ticks: u32,

    // --- Geometry ---
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub hud_height: f32,
    pub path_width: f32,
    pub corridor_margin: f32,
    /// Cell size for classifying buildable ground.
    pub build_grid_size: f32,
    pub tower_size: f32,
    pub enemy_size: f32,
    pub projectile_size: f32,
    pub segments: Vec<Segment>,

    // --- Waves ---
    pub base_enemies_per_wave: u32,
    pub enemies_per_wave_growth: u32,
    pub difficulty_step_waves: u32,

    // --- Enemies ---
    pub enemy_base_speed: f32,
    pub enemy_speed_per_difficulty: f32,
    pub enemy_base_hit_points: u32,
    pub enemy_hit_points_per_difficulty: u32,

    // --- Towers ---
    pub tower_range: f32,
    pub tower_base_damage: u32,
    pub tower_base_fire_rate: f64,
    pub projectile_speed: f32,

    // --- Economy ---
    pub starting_lives: u32,
    pub starting_coins: u32,
    pub starting_tower_limit: u32,
    pub tower_base_cost: u32,
    pub tower_cost_per_extra_slot: u32,
    pub kill_reward: u32,

    // --- Shop ---
    pub tower_slot_cost: u32,
    pub damage_upgrade_cost: u32,
    pub damage_upgrade_amount: u32,
    pub fire_rate_upgrade_cost: u32,
    pub fire_rate_upgrade_step: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            message_duration_ticks: MESSAGE_DURATION_TICKS,
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            hud_height: HUD_HEIGHT,
            path_width: PATH_WIDTH,
            corridor_margin: CORRIDOR_MARGIN,
            build_grid_size: BUILD_GRID_SIZE,
            tower_size: TOWER_SIZE,
            enemy_size: ENEMY_SIZE,
            projectile_size: PROJECTILE_SIZE,
            segments: default_segments(HUD_HEIGHT),
            base_enemies_per_wave: BASE_ENEMIES_PER_WAVE,
            enemies_per_wave_growth: ENEMIES_PER_WAVE_GROWTH,
            difficulty_step_waves: DIFFICULTY_STEP_WAVES,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_speed_per_difficulty: ENEMY_SPEED_PER_DIFFICULTY,
            enemy_base_hit_points: ENEMY_BASE_HIT_POINTS,
            enemy_hit_points_per_difficulty: ENEMY_HIT_POINTS_PER_DIFFICULTY,
            tower_range: TOWER_RANGE,
            tower_base_damage: TOWER_BASE_DAMAGE,
            tower_base_fire_rate: TOWER_BASE_FIRE_RATE,
            projectile_speed: PROJECTILE_SPEED,
            starting_lives: STARTING_LIVES,
            starting_coins: STARTING_COINS,
            starting_tower_limit: STARTING_TOWER_LIMIT,
            tower_base_cost: TOWER_BASE_COST,
            tower_cost_per_extra_slot: TOWER_COST_PER_EXTRA_SLOT,
            kill_reward: KILL_REWARD,
            tower_slot_cost: TOWER_SLOT_COST,
            damage_upgrade_cost: DAMAGE_UPGRADE_COST,
            damage_upgrade_amount: DAMAGE_UPGRADE_AMOUNT,
            fire_rate_upgrade_cost: FIRE_RATE_UPGRADE_COST,
            fire_rate_upgrade_step: FIRE_RATE_UPGRADE_STEP,
        }
    }
}

impl SimConfig {
    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.tower_base_fire_rate <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "tower_base_fire_rate",
                value: self.tower_base_fire_rate,
            });
        }
        if self.projectile_speed <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "projectile_speed",
                value: self.projectile_speed as f64,
            });
        }
        if self.tower_size <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "tower_size",
                value: self.tower_size as f64,
            });
        }
        if self.build_grid_size <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "build_grid_size",
                value: self.build_grid_size as f64,
            });
        }
        if self.enemy_base_speed < 0.0 {
            return Err(ConfigError::Negative {
                field: "enemy_base_speed",
                value: self.enemy_base_speed as f64,
            });
        }
        if self.enemy_speed_per_difficulty < 0.0 {
            return Err(ConfigError::Negative {
                field: "enemy_speed_per_difficulty",
                value: self.enemy_speed_per_difficulty as f64,
            });
        }
        if self.path_width <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "path_width",
                value: self.path_width as f64,
            });
        }
        self.build_path().map(|_| ())
    }

    /// Build the path network described by `segments`.
    pub fn build_path(&self) -> Result<PathNetwork, ConfigError> {
        PathNetwork::new(
            self.segments.clone(),
            self.path_width,
            self.corridor_margin,
        )
    }

    /// Enemy count for wave `wave` (1-based): `base + growth * (wave - 1)`.
    pub fn enemies_in_wave(&self, wave: u32) -> u32 {
        self.base_enemies_per_wave + self.enemies_per_wave_growth * wave.saturating_sub(1)
    }

    /// Whether reaching `wave` bumps the difficulty modifier.
    pub fn raises_difficulty(&self, wave: u32) -> bool {
        self.difficulty_step_waves > 0 && wave > 0 && wave % self.difficulty_step_waves == 0
    }

    pub fn enemy_speed(&self, difficulty: u32) -> f32 {
        self.enemy_base_speed + self.enemy_speed_per_difficulty * difficulty as f32
    }

    pub fn enemy_hit_points(&self, difficulty: u32) -> u32 {
        self.enemy_base_hit_points + self.enemy_hit_points_per_difficulty * difficulty
    }

    /// Ticks between shots: `floor(tick_rate / (rate * multiplier))`, at least 1.
    pub fn fire_interval_ticks(&self, base_fire_rate: f64, multiplier: f64) -> u64 {
        let shots_per_sec = base_fire_rate * multiplier;
        if shots_per_sec <= 0.0 {
            return u64::MAX;
        }
        // Absorb float error so e.g. 60 / 1.2 truncates to 50, not 49.
        let ticks = (self.tick_rate as f64 / shots_per_sec + 1e-9).floor();
        (ticks as u64).max(1)
    }

    /// Tower price once the limit has been raised to `tower_limit`.
    pub fn tower_cost_for_limit(&self, tower_limit: u32) -> u32 {
        let extra = tower_limit.saturating_sub(self.starting_tower_limit);
        self.tower_base_cost + self.tower_cost_per_extra_slot * extra
    }

    pub fn item_cost(&self, item: ShopItem) -> u32 {
        match item {
            ShopItem::TowerSlot => self.tower_slot_cost,
            ShopItem::DamageUpgrade => self.damage_upgrade_cost,
            ShopItem::FireRateUpgrade => self.fire_rate_upgrade_cost,
        }
    }
}
