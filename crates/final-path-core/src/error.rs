//! Error types for rejected commands and invalid configuration.

use thiserror::Error;

use crate::enums::GamePhase;

/// Why a player command was rejected.
///
/// The `Display` text is exactly what the player sees in the transient
/// message line, so keep it short.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Cannot place tower in HUD area!")]
    InHudArea,
    #[error("Too close to another tower!")]
    OverlapsTower,
    #[error("Tower limit reached ({limit})!")]
    TowerLimitReached { limit: u32 },
    #[error("Not enough coins! Need {needed}, have {available}")]
    InsufficientCoins { needed: u32, available: u32 },
    #[error("Cannot place tower on path!")]
    OnPath,
    #[error("No tower at that position!")]
    NoTowerAt,
    #[error("Unknown shop item {id}!")]
    UnknownItem { id: u32 },
    #[error("Wave already in progress!")]
    WaveInProgress,
    #[error("Not available during {phase:?}!")]
    NotAvailable { phase: GamePhase },
}

/// A configuration the engine refuses to start with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tick rate must be positive")]
    ZeroTickRate,
    #[error("path has no segments")]
    EmptyPath,
    #[error("segment {index} has zero length")]
    DegenerateSegment { index: usize },
    #[error("segment {index} is neither horizontal nor vertical")]
    DiagonalSegment { index: usize },
    #[error("segment {index} does not start where the previous segment ends")]
    DisconnectedSegment { index: usize },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}
