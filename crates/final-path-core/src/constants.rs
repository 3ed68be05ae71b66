//! Simulation constants and default tuning parameters.
//!
//! These seed `SimConfig::default()`. Systems read the live values from the
//! config, never from here directly.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Playfield ---

/// Playfield width in pixels.
pub const PLAYFIELD_WIDTH: f32 = 800.0;

/// Playfield height in pixels.
pub const PLAYFIELD_HEIGHT: f32 = 720.0;

/// Height of the reserved HUD band at the top of the playfield.
/// Towers cannot be placed with their center above this line.
pub const HUD_HEIGHT: f32 = 120.0;

/// Corridor width of every path segment.
pub const PATH_WIDTH: f32 = 50.0;

/// Extra margin around each corridor when testing tower clearance.
pub const CORRIDOR_MARGIN: f32 = 30.0;

/// Grid cell size used to classify buildable areas.
pub const BUILD_GRID_SIZE: f32 = 40.0;

// --- Entity sizes ---

pub const TOWER_SIZE: f32 = 25.0;
pub const ENEMY_SIZE: f32 = 25.0;
pub const PROJECTILE_SIZE: f32 = 5.0;

// --- Waves ---

/// Enemies in the first wave.
pub const BASE_ENEMIES_PER_WAVE: u32 = 3;

/// Additional enemies per subsequent wave.
pub const ENEMIES_PER_WAVE_GROWTH: u32 = 2;

/// Ticks between consecutive spawns within a wave.
pub const SPAWN_INTERVAL_TICKS: u64 = 60;

/// Difficulty rises by one every this many waves.
pub const DIFFICULTY_STEP_WAVES: u32 = 5;

// --- Enemies ---

/// Pixels per tick.
pub const ENEMY_BASE_SPEED: f32 = 2.0;
pub const ENEMY_SPEED_PER_DIFFICULTY: f32 = 0.25;
pub const ENEMY_BASE_HIT_POINTS: u32 = 40;
pub const ENEMY_HIT_POINTS_PER_DIFFICULTY: u32 = 20;

// --- Towers ---

pub const TOWER_RANGE: f32 = 100.0;
pub const TOWER_BASE_DAMAGE: u32 = 10;

/// Shots per second before upgrades.
pub const TOWER_BASE_FIRE_RATE: f64 = 1.0;

/// Projectile speed in pixels per tick.
pub const PROJECTILE_SPEED: f32 = 10.0;

// --- Economy ---

pub const STARTING_LIVES: u32 = 10;
pub const STARTING_COINS: u32 = 50;
pub const STARTING_TOWER_LIMIT: u32 = 3;

/// Price of a tower while the limit is at its starting value.
pub const TOWER_BASE_COST: u32 = 20;

/// Price increase for every tower slot bought beyond the starting limit.
pub const TOWER_COST_PER_EXTRA_SLOT: u32 = 5;

/// Coins awarded per enemy killed.
pub const KILL_REWARD: u32 = 10;

// --- Shop ---

pub const TOWER_SLOT_COST: u32 = 30;
pub const DAMAGE_UPGRADE_COST: u32 = 50;
pub const DAMAGE_UPGRADE_AMOUNT: u32 = 10;
pub const FIRE_RATE_UPGRADE_COST: u32 = 45;

/// Added to the fire-rate multiplier per purchase.
pub const FIRE_RATE_UPGRADE_STEP: f64 = 0.1;

// --- Messages ---

/// Ticks a rejection message stays on screen (2 seconds).
pub const MESSAGE_DURATION_TICKS: u32 = 120;
