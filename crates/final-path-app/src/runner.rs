//! Headless drivers for the auto-player.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use final_path_core::config::SimConfig;
use final_path_core::enums::GamePhase;
use final_path_core::error::ConfigError;
use final_path_core::state::GameStateSnapshot;
use final_path_sim::SimulationEngine;

use crate::autoplay::AutoPlayer;
use crate::game_loop::tick_duration;
use crate::state::{GameLoopCommand, LoopHandle};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// Defaults overlaid with the JSON file at `path`, if any.
pub fn load_config(path: Option<&Path>) -> Result<SimConfig, RunnerError> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str::<SimConfig>(&text)?
        }
        None => SimConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Step the engine as fast as possible for up to `ticks` ticks, stopping
/// early on game over.
pub fn run_fast(
    config: SimConfig,
    seed: u64,
    ticks: u64,
) -> Result<GameStateSnapshot, RunnerError> {
    let mut player = AutoPlayer::new(seed, &config)?;
    let mut engine = SimulationEngine::new(config)?;
    let started = Instant::now();

    let mut snapshot = engine.tick();
    while snapshot.time.tick < ticks && snapshot.phase != GamePhase::GameOver {
        engine.queue_commands(player.decide(&snapshot));
        snapshot = engine.tick();
    }

    debug!(elapsed = ?started.elapsed(), "fast run finished");
    Ok(snapshot)
}

/// Drive the threaded game loop at its real tick rate, answering each new
/// snapshot once.
pub fn run_realtime(
    config: SimConfig,
    seed: u64,
    ticks: u64,
) -> Result<Option<GameStateSnapshot>, RunnerError> {
    let mut player = AutoPlayer::new(seed, &config)?;
    let poll = tick_duration(config.tick_rate);
    let handle = LoopHandle::spawn(SimulationEngine::new(config)?)?;

    let mut last_seen = None;
    let mut latest = None;
    loop {
        std::thread::sleep(poll);
        let Some(snapshot) = handle.latest() else {
            continue;
        };
        if last_seen == Some(snapshot.time.tick) {
            continue;
        }
        last_seen = Some(snapshot.time.tick);

        let done = snapshot.time.tick >= ticks || snapshot.phase == GamePhase::GameOver;
        if !done {
            for command in player.decide(&snapshot) {
                if !handle.send(GameLoopCommand::Player(command)) {
                    break;
                }
            }
        }
        latest = Some(snapshot);
        if done {
            break;
        }
    }

    handle.shutdown();
    Ok(latest)
}

/// Log the outcome of a run.
pub fn report(snapshot: &GameStateSnapshot) {
    info!(
        tick = snapshot.time.tick,
        phase = ?snapshot.phase,
        wave = snapshot.wave.current_wave,
        lives = snapshot.economy.lives,
        coins = snapshot.economy.coins,
        towers = snapshot.economy.towers_built,
        defeated = snapshot.score.enemies_defeated,
        escaped = snapshot.score.enemies_escaped,
        "simulation finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "final-path-{name}-{}.json",
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_config_defaults_without_file() {
        assert_eq!(load_config(None).unwrap(), SimConfig::default());
    }

    #[test]
    fn test_load_config_overlays_file() {
        let path = temp_config("overlay", r#"{ "starting_lives": 3, "kill_reward": 25 }"#);
        let config = load_config(Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.kill_reward, 25);
        assert_eq!(config.tick_rate, SimConfig::default().tick_rate);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let path = temp_config("invalid", r#"{ "tick_rate": 0 }"#);
        let result = load_config(Some(&path));
        fs::remove_file(&path).ok();
        assert!(matches!(
            result,
            Err(RunnerError::Config(ConfigError::ZeroTickRate))
        ));

        let path = temp_config("garbled", "not json");
        let result = load_config(Some(&path));
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(RunnerError::Parse(_))));
    }

    #[test]
    fn test_fast_run_stops_at_tick_budget() {
        let snapshot = run_fast(SimConfig::default(), 3, 600).unwrap();
        assert_eq!(snapshot.time.tick, 600);
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert!(snapshot.wave.current_wave >= 1);
    }

    #[test]
    fn test_fast_run_stops_on_game_over() {
        let config = SimConfig {
            starting_lives: 1,
            starting_coins: 0,
            ..SimConfig::default()
        };
        let snapshot = run_fast(config, 3, 100_000).unwrap();
        assert_eq!(snapshot.phase, GamePhase::GameOver);
        assert!(snapshot.time.tick < 100_000);
    }

    #[test]
    fn test_realtime_run_reaches_budget() {
        let snapshot = run_realtime(SimConfig::default(), 3, 30).unwrap().unwrap();
        assert!(snapshot.time.tick >= 30);
        assert_eq!(snapshot.phase, GamePhase::Playing);
    }
}
