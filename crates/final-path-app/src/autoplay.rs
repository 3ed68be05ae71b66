//! Seeded scripted player for headless runs.
//!
//! Reads each snapshot and answers with the commands a simple human would
//! issue: dismiss the instructions, start waves as soon as the field is
//! clear, fill free tower slots at random buildable cells, then spend spare
//! coins in the shop. Same seed and config give the same game.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use final_path_core::commands::PlayerCommand;
use final_path_core::config::SimConfig;
use final_path_core::enums::GamePhase;
use final_path_core::error::ConfigError;
use final_path_core::state::GameStateSnapshot;
use final_path_core::types::Position;

pub struct AutoPlayer {
    rng: ChaCha8Rng,
    build_sites: Vec<Position>,
    tower_size: f32,
}

impl AutoPlayer {
    pub fn new(seed: u64, config: &SimConfig) -> Result<Self, ConfigError> {
        let path = config.build_path()?;
        let half = config.tower_size / 2.0;
        let build_sites = path
            .buildable_cells(
                config.build_grid_size,
                config.playfield_width,
                config.playfield_height,
            )
            .into_iter()
            .filter(|cell| {
                cell.y - half >= config.hud_height
                    && cell.x - half >= 0.0
                    && cell.x + half <= config.playfield_width
                    && cell.y + half <= config.playfield_height
                    && path.can_place_tower(cell.x, cell.y, config.tower_size)
            })
            .collect();

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            build_sites,
            tower_size: config.tower_size,
        })
    }

    /// Cells the player considers for new towers.
    pub fn build_sites(&self) -> &[Position] {
        &self.build_sites
    }

    /// Commands to queue in response to `snapshot`.
    pub fn decide(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        match snapshot.phase {
            GamePhase::Instructions => return vec![PlayerCommand::DismissInstructions],
            GamePhase::GameOver => return Vec::new(),
            GamePhase::Playing => {}
        }

        let mut commands = Vec::new();
        if !snapshot.wave.wave_active {
            commands.push(PlayerCommand::StartNextWave);
        }

        let economy = &snapshot.economy;
        if economy.towers_built < economy.tower_limit {
            if economy.coins >= economy.tower_cost {
                if let Some(site) = self.pick_site(snapshot) {
                    commands.push(PlayerCommand::PlaceTower {
                        x: site.x,
                        y: site.y,
                    });
                }
            }
        } else if let Some(item) = snapshot
            .shop
            .iter()
            .filter(|item| item.affordable)
            .collect::<Vec<_>>()
            .choose(&mut self.rng)
        {
            commands.push(PlayerCommand::PurchaseItem { item_id: item.id });
        }

        commands
    }

    fn pick_site(&mut self, snapshot: &GameStateSnapshot) -> Option<Position> {
        let min_gap_sq = self.tower_size * self.tower_size;
        let free: Vec<Position> = self
            .build_sites
            .iter()
            .copied()
            .filter(|site| {
                snapshot
                    .towers
                    .iter()
                    .all(|tower| tower.position.distance_sq_to(site) >= min_gap_sq)
            })
            .collect();
        free.choose(&mut self.rng).copied()
    }
}
