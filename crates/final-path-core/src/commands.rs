//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and applied at the command step of the next tick.
//! Each one either changes state or is rejected with a reason.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Flow ---
    /// Leave the instructions screen and start playing.
    DismissInstructions,
    /// Begin the next wave. Rejected while a wave is running.
    StartNextWave,
    /// Reset everything to the starting configuration.
    Restart,

    // --- Construction ---
    /// Build a tower centered at the given point.
    PlaceTower { x: f32, y: f32 },
    /// Sell the first tower whose footprint contains the point.
    RemoveTower { x: f32, y: f32 },

    // --- Shop ---
    /// Buy a shop item by its stable id.
    PurchaseItem { item_id: u32 },
}
