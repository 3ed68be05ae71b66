//! Wave spawning system: paces enemy spawns within a wave and detects completion.
//!
//! Lifecycle: idle (next wave primed) -> active/spawning -> complete -> idle.

use hecs::World;
use tracing::{debug, info};

use final_path_core::components::Enemy;
use final_path_core::config::SimConfig;
use final_path_core::error::CommandError;
use final_path_core::events::GameEvent;
use final_path_core::path::PathNetwork;

use crate::world_setup;

/// Wave bookkeeping owned by the engine.
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    /// 1-based number of the current (or last) wave. 0 before the first.
    pub current_wave: u32,
    pub wave_active: bool,
    pub enemies_per_wave: u32,
    pub enemies_spawned: u32,
    pub enemies_killed: u32,
    /// `None` until the wave's first spawn, which is then immediate.
    pub last_spawn_tick: Option<u64>,
    /// Size of the upcoming wave while idle, or of the running wave.
    pub next_wave_enemies: u32,
    pub difficulty: u32,
}

impl WaveState {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            next_wave_enemies: config.enemies_in_wave(1),
            ..Default::default()
        }
    }

    /// Prime and activate the next wave. Returns its enemy count.
    pub fn start_next_wave(&mut self, config: &SimConfig) -> Result<u32, CommandError> {
        if self.wave_active {
            return Err(CommandError::WaveInProgress);
        }

        self.current_wave += 1;
        if config.raises_difficulty(self.current_wave) {
            self.difficulty += 1;
        }
        self.enemies_per_wave = config.enemies_in_wave(self.current_wave);
        self.enemies_spawned = 0;
        self.enemies_killed = 0;
        self.last_spawn_tick = None;
        self.next_wave_enemies = self.enemies_per_wave;
        self.wave_active = true;

        Ok(self.enemies_per_wave)
    }

    /// Whether an enemy should spawn on `tick`.
    pub fn spawn_due(&self, tick: u64, spawn_interval: u64) -> bool {
        if !self.wave_active || self.enemies_spawned >= self.enemies_per_wave {
            return false;
        }
        match self.last_spawn_tick {
            None => true,
            Some(last) => tick.saturating_sub(last) >= spawn_interval,
        }
    }

    /// Close out the wave and preview the next one.
    fn complete(&mut self, config: &SimConfig) {
        self.wave_active = false;
        self.enemies_killed = 0;
        self.next_wave_enemies = config.enemies_in_wave(self.current_wave + 1);
    }
}

/// Spawn at most one enemy if the active wave is due one.
pub fn run(
    world: &mut World,
    path: &PathNetwork,
    config: &SimConfig,
    wave: &mut WaveState,
    next_id: &mut u64,
    events: &mut Vec<GameEvent>,
    current_tick: u64,
) {
    if !wave.spawn_due(current_tick, config.spawn_interval_ticks) {
        return;
    }

    let (_entity, enemy_id) =
        world_setup::spawn_enemy(world, path, config, wave.difficulty, next_id);
    wave.enemies_spawned += 1;
    wave.last_spawn_tick = Some(current_tick);

    debug!(
        enemy_id,
        spawned = wave.enemies_spawned,
        of = wave.enemies_per_wave,
        "enemy spawned"
    );
    events.push(GameEvent::EnemySpawned { enemy_id });
}

/// End the wave once everything has spawned and no enemy remains.
pub fn check_completion(
    world: &World,
    config: &SimConfig,
    wave: &mut WaveState,
    events: &mut Vec<GameEvent>,
) {
    if !wave.wave_active || wave.enemies_spawned < wave.enemies_per_wave {
        return;
    }
    let remaining = world.query::<&Enemy>().iter().count();
    if remaining > 0 {
        return;
    }

    wave.complete(config);
    info!(
        wave = wave.current_wave,
        next_wave_enemies = wave.next_wave_enemies,
        "wave complete"
    );
    events.push(GameEvent::WaveCompleted {
        wave: wave.current_wave,
    });
}
