//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world plus wave, economy and score
//! state, applies player commands, runs all systems in a fixed order, and
//! produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use tracing::{debug, info};

use final_path_core::commands::PlayerCommand;
use final_path_core::config::SimConfig;
use final_path_core::enums::GamePhase;
use final_path_core::error::{CommandError, ConfigError};
use final_path_core::events::{GameEvent, TransientMessage};
use final_path_core::path::PathNetwork;
use final_path_core::state::GameStateSnapshot;
use final_path_core::types::SimTime;

use crate::economy::{self, EconomyState, ScoreState};
use crate::systems;
use crate::systems::enemy_motion::{Departure, Exit};
use crate::systems::snapshot::SnapshotInputs;
use crate::systems::wave_spawner::WaveState;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    path: PathNetwork,
    world: World,
    time: SimTime,
    phase: GamePhase,
    next_entity_id: u64,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    wave: WaveState,
    economy: EconomyState,
    score: ScoreState,
    message: Option<TransientMessage>,
}

impl SimulationEngine {
    /// Create a new simulation engine, starting on the instructions screen.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let path = config.build_path()?;
        Ok(Self {
            wave: WaveState::new(&config),
            economy: EconomyState::new(&config),
            config,
            path,
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            next_entity_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreState::default(),
            message: None,
        })
    }

    /// Queue a player command for the command step of the next tick.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Order: wave spawn, enemy motion with escape/death bookkeeping, tower
    /// targeting, projectile resolution (systems only while playing), then
    /// queued commands, then the transient-message countdown.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.time.advance(self.config.tick_rate);

        if self.phase == GamePhase::Playing {
            self.run_systems();
        }
        self.process_commands();
        self.update_message();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInputs {
                time: self.time,
                phase: self.phase,
                config: &self.config,
                wave: &self.wave,
                economy: &self.economy,
                score: &self.score,
                message: self.message.as_ref(),
                events,
            },
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn path(&self) -> &PathNetwork {
        &self.path
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn wave(&self) -> &WaveState {
        &self.wave
    }

    pub fn economy(&self) -> &EconomyState {
        &self.economy
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// The transient message currently on screen, if any.
    pub fn message(&self) -> Option<&TransientMessage> {
        self.message.as_ref()
    }

    /// Place a tower anywhere, skipping every placement rule and cost (for testing).
    #[cfg(test)]
    pub fn spawn_tower_at(&mut self, x: f32, y: f32) -> hecs::Entity {
        let position = final_path_core::types::Position::new(x, y);
        crate::world_setup::spawn_tower(
            &mut self.world,
            &self.config,
            position,
            &mut self.next_entity_id,
        )
        .0
    }

    /// Spawn a lone enemy outside the wave schedule (for testing).
    #[cfg(test)]
    pub fn spawn_enemy_at(&mut self, x: f32, y: f32, speed: f32, hit_points: u32) -> hecs::Entity {
        let position = final_path_core::types::Position::new(x, y);
        crate::world_setup::spawn_enemy_at(
            &mut self.world,
            position,
            speed,
            hit_points,
            &mut self.next_entity_id,
        )
        .0
    }

    #[cfg(test)]
    pub fn set_coins(&mut self, coins: u32) {
        self.economy.coins = coins;
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands. Rejections become the transient message.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(command) {
                self.reject(err);
            }
        }
    }

    /// Count the transient message down and drop it once expired.
    fn update_message(&mut self) {
        let expired = match self.message.as_mut() {
            Some(message) => !message.tick_down(),
            None => false,
        };
        if expired {
            self.message = None;
        }
    }

    fn reject(&mut self, err: CommandError) {
        let reason = err.to_string();
        debug!(%reason, "command rejected");
        self.message = Some(TransientMessage::new(
            reason.clone(),
            self.config.message_duration_ticks,
        ));
        self.events.push(GameEvent::CommandRejected { reason });
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), CommandError> {
        match command {
            PlayerCommand::Restart => {
                self.reset();
                Ok(())
            }
            PlayerCommand::DismissInstructions => {
                self.require_phase(GamePhase::Instructions)?;
                self.phase = GamePhase::Playing;
                info!("instructions dismissed");
                Ok(())
            }
            PlayerCommand::StartNextWave => {
                self.require_phase(GamePhase::Playing)?;
                let enemies = self.wave.start_next_wave(&self.config)?;
                info!(wave = self.wave.current_wave, enemies, "wave started");
                self.events.push(GameEvent::WaveStarted {
                    wave: self.wave.current_wave,
                    enemies,
                });
                Ok(())
            }
            PlayerCommand::PlaceTower { x, y } => {
                self.require_phase(GamePhase::Playing)?;
                let cost = self.economy.tower_cost;
                let tower_id = economy::place_tower(
                    &mut self.world,
                    &self.path,
                    &self.config,
                    &mut self.economy,
                    &mut self.next_entity_id,
                    x,
                    y,
                )?;
                self.events.push(GameEvent::TowerPlaced { tower_id, cost });
                Ok(())
            }
            PlayerCommand::RemoveTower { x, y } => {
                self.require_phase(GamePhase::Playing)?;
                let (tower_id, refund) =
                    economy::remove_tower(&mut self.world, &self.config, &mut self.economy, x, y)?;
                self.events.push(GameEvent::TowerRemoved { tower_id, refund });
                Ok(())
            }
            PlayerCommand::PurchaseItem { item_id } => {
                self.require_phase(GamePhase::Playing)?;
                let (item, cost) = self.economy.purchase(&self.config, item_id)?;
                debug!(?item, cost, coins = self.economy.coins, "item purchased");
                self.events.push(GameEvent::ItemPurchased { item, cost });
                Ok(())
            }
        }
    }

    fn require_phase(&self, phase: GamePhase) -> Result<(), CommandError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(CommandError::NotAvailable { phase: self.phase })
        }
    }

    /// Return every piece of state to its starting value and resume play.
    fn reset(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.next_entity_id = 0;
        self.despawn_buffer.clear();
        self.events.clear();
        self.wave = WaveState::new(&self.config);
        self.economy = EconomyState::new(&self.config);
        self.score = ScoreState::default();
        self.message = None;
        self.phase = GamePhase::Playing;
        info!("game restarted");
        self.events.push(GameEvent::Restarted);
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let tick = self.time.tick;

        // 1. Wave spawning
        systems::wave_spawner::run(
            &mut self.world,
            &self.path,
            &self.config,
            &mut self.wave,
            &mut self.next_entity_id,
            &mut self.events,
            tick,
        );

        // 2. Enemy motion, then escape/death bookkeeping
        let exits = systems::enemy_motion::run(&mut self.world, &self.path);
        for exit in exits {
            self.settle_exit(exit);
        }
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        systems::wave_spawner::check_completion(
            &self.world,
            &self.config,
            &mut self.wave,
            &mut self.events,
        );
        if self.phase != GamePhase::Playing {
            return;
        }

        // 3. Tower targeting
        systems::targeting::run(
            &mut self.world,
            &self.config,
            &self.economy,
            &mut self.next_entity_id,
            &mut self.events,
            tick,
        );

        // 4. Projectile resolution
        systems::projectile::run(
            &mut self.world,
            &self.economy,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    /// Convert a departing enemy into a reward or a lost life.
    fn settle_exit(&mut self, exit: Exit) {
        self.despawn_buffer.push(exit.entity);
        match exit.departure {
            Departure::Killed => {
                let reward = self.economy.award_kill(&self.config);
                self.score.enemies_defeated += 1;
                self.wave.enemies_killed += 1;
                debug!(enemy_id = exit.enemy_id, reward, "enemy defeated");
                self.events.push(GameEvent::EnemyKilled {
                    enemy_id: exit.enemy_id,
                    reward,
                });
            }
            Departure::Escaped => {
                let out_of_lives = self.economy.lose_life();
                self.score.enemies_escaped += 1;
                debug!(
                    enemy_id = exit.enemy_id,
                    lives = self.economy.lives,
                    "enemy escaped"
                );
                self.events.push(GameEvent::EnemyEscaped {
                    enemy_id: exit.enemy_id,
                    lives_remaining: self.economy.lives,
                });
                if out_of_lives && self.phase == GamePhase::Playing {
                    self.phase = GamePhase::GameOver;
                    self.wave.wave_active = false;
                    info!(wave = self.wave.current_wave, "game over");
                    self.events.push(GameEvent::GameOver {
                        wave: self.wave.current_wave,
                    });
                }
            }
        }
    }
}
