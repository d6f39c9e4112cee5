//! Win/loss/draw tallies kept across games.

use crate::board::Player;
use crate::error::ScoreboardError;
use crate::game::Outcome;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub player1_wins: u32,
    pub player2_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    /// Counts a finished game. Games still in progress are ignored.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win(Player::Player1) => self.player1_wins += 1,
            Outcome::Win(Player::Player2) => self.player2_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    #[must_use]
    pub const fn games(&self) -> u32 {
        self.player1_wins + self.player2_wins + self.draws
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Reads the scoreboard from a JSON file. A missing file yields an empty
    /// scoreboard.
    pub fn load(path: &Path) -> Result<Self, ScoreboardError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ScoreboardError::Io {
                operation: "read scoreboard",
                source,
            }),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ScoreboardError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ScoreboardError::Io {
            operation: "write scoreboard",
            source,
        })
    }
}
