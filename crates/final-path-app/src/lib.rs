//! Final Path runtime harness.
//!
//! Wires the simulation engine to a fixed-rate game loop thread, turns raw
//! pointer state into player commands, and provides a seeded auto-player for
//! headless runs.

pub mod autoplay;
pub mod game_loop;
pub mod input;
pub mod runner;
pub mod state;

pub use final_path_core as core;
