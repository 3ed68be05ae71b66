//! Simulation engine for Final Path.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the renderer.

pub mod economy;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use final_path_core as core;
