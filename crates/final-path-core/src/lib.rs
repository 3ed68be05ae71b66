//! Core types and definitions for the Final Path tower-defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, configuration, the path network, state snapshots,
//! events, and constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod path;
pub mod state;
pub mod types;
