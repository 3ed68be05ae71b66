//! State shared between the game loop thread and whoever drives it.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use final_path_core::commands::PlayerCommand;
use final_path_core::state::GameStateSnapshot;
use final_path_sim::SimulationEngine;

use crate::game_loop::spawn_game_loop;
use crate::input::PointerFrame;

/// Latest published snapshot, `None` until the first tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Raw pointer state, translated to commands on the loop thread.
    Pointer(PointerFrame),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Owning handle to a running game loop.
pub struct LoopHandle {
    command_tx: mpsc::Sender<GameLoopCommand>,
    latest_snapshot: SharedSnapshot,
    thread: Option<JoinHandle<()>>,
}

impl LoopHandle {
    /// Move `engine` onto a new game loop thread.
    pub fn spawn(engine: SimulationEngine) -> io::Result<Self> {
        let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
        let (command_tx, thread) = spawn_game_loop(engine, Arc::clone(&latest_snapshot))?;
        Ok(Self {
            command_tx,
            latest_snapshot,
            thread: Some(thread),
        })
    }

    /// Returns false once the loop has exited.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        self.command_tx.send(command).is_ok()
    }

    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|snapshot| snapshot.clone())
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
