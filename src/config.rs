//! Game configuration.

use crate::ai_player::Difficulty;
use crate::board::Player;
use crate::error::ConfigError;
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Chance that the easy computer player ignores its move and plays a random
/// column instead.
pub const DEFAULT_EASY_BLUNDER_CHANCE: f64 = 0.3;

/// Who controls the second player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Two humans take turns.
    #[default]
    #[value(name = "hvh")]
    HumanVsHuman,
    /// The computer answers every human move.
    #[value(name = "hva")]
    HumanVsAi,
}

/// Settings of a game, passed to [`crate::Game::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Side played by the computer in [`GameMode::HumanVsAi`].
    pub ai_player: Player,
    /// Pause before the computer moves. Front ends only.
    pub think_delay_ms: u64,
    /// Seed of the computer player's random source; entropy if unset.
    pub seed: Option<u64>,
    pub easy_blunder_chance: f64,
    /// Search the root moves on the rayon thread pool.
    pub parallel_search: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::HumanVsHuman,
            difficulty: Difficulty::Medium,
            ai_player: Player::Player2,
            think_delay_ms: 1000,
            seed: None,
            easy_blunder_chance: DEFAULT_EASY_BLUNDER_CHANCE,
            parallel_search: false,
        }
    }
}

impl GameConfig {
    /// Config for a game against the computer.
    #[must_use]
    pub fn against_ai(difficulty: Difficulty) -> Self {
        Self {
            mode: GameMode::HumanVsAi,
            difficulty,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub const fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// Returns whether `player` is controlled by the computer.
    #[must_use]
    pub fn is_ai(&self, player: Player) -> bool {
        self.mode == GameMode::HumanVsAi && player == self.ai_player
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.easy_blunder_chance) {
            return Err(ConfigError::BlunderChance(self.easy_blunder_chance));
        }
        Ok(())
    }
}
