//! Game loop thread: runs the simulation engine at its tick rate and
//! publishes snapshots.
//!
//! The engine is moved into this thread and owned there. Commands arrive via
//! `mpsc` channel. The latest snapshot is stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use final_path_core::state::GameStateSnapshot;
use final_path_sim::SimulationEngine;

use crate::input::InputTranslator;
use crate::state::{GameLoopCommand, SharedSnapshot};

/// Nominal duration of one tick.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    latest_snapshot: SharedSnapshot,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("final-path-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let tick_duration = tick_duration(engine.config().tick_rate);
    let mut input = InputTranslator::default();
    let mut next_tick_time = Instant::now();
    info!(?tick_duration, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Pointer(frame)) => {
                    engine.queue_commands(input.translate(&frame));
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind, reset to avoid catch-up spiral
            debug!(behind = ?(now - next_tick_time), "game loop fell behind");
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerFrame;
    use crate::state::LoopHandle;
    use final_path_core::commands::PlayerCommand;
    use final_path_core::config::SimConfig;
    use final_path_core::enums::GamePhase;

    fn wait_for(
        handle: &LoopHandle,
        pred: impl Fn(&GameStateSnapshot) -> bool,
    ) -> Option<GameStateSnapshot> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(snapshot) = handle.latest() {
                if pred(&snapshot) {
                    return Some(snapshot);
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_populated_snapshot_serializes() {
        let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
        engine.queue_command(PlayerCommand::DismissInstructions);
        engine.queue_command(PlayerCommand::PlaceTower { x: 300.0, y: 200.0 });
        engine.queue_command(PlayerCommand::PlaceTower { x: 460.0, y: 180.0 });
        engine.queue_command(PlayerCommand::StartNextWave);

        // Run enough ticks to populate entities
        for _ in 0..200 {
            engine.tick();
        }

        let snapshot = engine.tick();
        assert!(!snapshot.enemies.is_empty());
        assert_eq!(snapshot.towers.len(), 2);

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.enemies.len(), snapshot.enemies.len());
        assert_eq!(parsed.wave.current_wave, 1);
    }

    #[test]
    fn test_loop_applies_player_and_pointer_commands() {
        let engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let handle = LoopHandle::spawn(engine).unwrap();

        handle.send(GameLoopCommand::Player(PlayerCommand::DismissInstructions));
        let playing = wait_for(&handle, |s| s.phase == GamePhase::Playing);
        assert!(playing.is_some(), "loop never left the instructions screen");

        let press = PointerFrame {
            x: 300.0,
            y: 200.0,
            left: true,
            right: false,
        };
        // Held across several frames, still one placement.
        for _ in 0..3 {
            handle.send(GameLoopCommand::Pointer(press));
        }
        let placed = wait_for(&handle, |s| !s.towers.is_empty()).unwrap();
        assert_eq!(placed.towers.len(), 1);
        assert_eq!(placed.economy.towers_built, 1);

        handle.shutdown();
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(tick_duration(60).as_nanos(), expected_nanos as u128);
        assert_eq!(tick_duration(0), Duration::from_secs(1));
    }
}
