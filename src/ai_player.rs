//! The computer player.

use crate::board::{Gameboard, Player};
use crate::config::{DEFAULT_EASY_BLUNDER_CHANCE, GameConfig};
use crate::search::{Searcher, winning_move};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Random moves; takes obvious wins and blocks most of the time.
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Plies searched ahead, `None` if the difficulty doesn't search.
    #[must_use]
    pub const fn search_depth(self) -> Option<usize> {
        match self {
            Self::Easy => None,
            Self::Medium => Some(4),
            Self::Hard => Some(6),
        }
    }
}

/// Why the computer picked a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The move wins the game.
    Win,
    /// The opponent would win in this column next.
    Block,
    Search { score: i32 },
    Random,
    /// Easy mode threw away the move it had found.
    Blunder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub column: usize,
    pub reason: Reason,
}

/// Computer player with its own random source.
#[derive(Debug, Clone)]
pub struct AiPlayer<R = StdRng> {
    rng: R,
    easy_blunder_chance: f64,
    parallel_search: bool,
}

impl AiPlayer<StdRng> {
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        Self::with_rng(rng)
            .with_blunder_chance(config.easy_blunder_chance)
            .with_parallel_search(config.parallel_search)
    }
}

impl<R: Rng> AiPlayer<R> {
    #[must_use]
    pub const fn with_rng(rng: R) -> Self {
        Self {
            rng,
            easy_blunder_chance: DEFAULT_EASY_BLUNDER_CHANCE,
            parallel_search: false,
        }
    }

    /// Sets the easy blunder chance, clamped to `[0, 1]`; NaN disables
    /// blunders.
    #[must_use]
    pub fn with_blunder_chance(mut self, chance: f64) -> Self {
        self.easy_blunder_chance = if chance.is_nan() {
            0.0
        } else {
            chance.clamp(0.0, 1.0)
        };
        self
    }

    #[must_use]
    pub const fn with_parallel_search(mut self, parallel: bool) -> Self {
        self.parallel_search = parallel;
        self
    }

    /// Picks the column to play for `player`. Returns `None` if the board
    /// is full.
    ///
    /// A winning move is taken first, then a move blocking the opponent's
    /// immediate win. Otherwise easy plays randomly while medium and hard
    /// search [`Difficulty::search_depth`] plies. On easy, the outcome is
    /// replaced by a random column with the configured blunder chance.
    pub fn choose_column<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        player: Player,
        difficulty: Difficulty,
    ) -> Option<Decision> {
        let legal = board.available_columns_iter().collect::<Vec<_>>();
        if legal.is_empty() {
            return None;
        }

        let mut decision = self.best_column(board, &legal, player, difficulty);

        if difficulty == Difficulty::Easy && self.rng.random_bool(self.easy_blunder_chance) {
            decision = Decision {
                column: self.random_column(&legal),
                reason: Reason::Blunder,
            };
        }

        debug!(
            ?player,
            ?difficulty,
            column = decision.column,
            reason = ?decision.reason,
            "computer move"
        );
        Some(decision)
    }

    fn best_column<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        legal: &[usize],
        player: Player,
        difficulty: Difficulty,
    ) -> Decision {
        if let Some(column) = winning_move(board, player) {
            return Decision {
                column,
                reason: Reason::Win,
            };
        }
        if let Some(column) = winning_move(board, player.opponent()) {
            return Decision {
                column,
                reason: Reason::Block,
            };
        }

        let Some(depth) = difficulty.search_depth() else {
            return Decision {
                column: self.random_column(legal),
                reason: Reason::Random,
            };
        };

        let mut searcher = Searcher::new(player);
        let result = if self.parallel_search {
            searcher.best_move_parallel(board, depth, player)
        } else {
            searcher.best_move(board, depth, player)
        };
        Decision {
            // legal is not empty, so the search always finds a column
            column: result.column.unwrap_or(legal[0]),
            reason: Reason::Search {
                score: result.score,
            },
        }
    }

    fn random_column(&mut self, legal: &[usize]) -> usize {
        legal.choose(&mut self.rng).copied().unwrap_or(legal[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Gameboard<7, 6> {
        Gameboard::from_rows(rows).unwrap()
    }

    fn seeded() -> AiPlayer {
        AiPlayer::with_rng(StdRng::seed_from_u64(42))
    }

    #[test]
    fn depth_policy() {
        assert_eq!(Difficulty::Easy.search_depth(), None);
        assert_eq!(Difficulty::Medium.search_depth(), Some(4));
        assert_eq!(Difficulty::Hard.search_depth(), Some(6));
    }

    #[test]
    fn full_board_has_no_move() {
        let board = board(&[
            "XOXOXOX", //
            "XOXOXOX",
            "OXOXOXO",
            "OXOXOXO",
            "XOXOXOX",
            "XOXOXOX",
        ]);
        assert_eq!(
            seeded().choose_column(&board, Player::Player1, Difficulty::Hard),
            None
        );
    }

    #[test]
    fn takes_win_before_block() {
        // O wins in column 6, X threatens column 3
        let board = board(&[
            ".......", //
            ".......",
            ".......",
            "......O",
            "......O",
            "XXX...O",
        ]);
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            let decision = seeded()
                .choose_column(&board, Player::Player2, difficulty)
                .unwrap();
            assert_eq!(
                decision,
                Decision {
                    column: 6,
                    reason: Reason::Win
                }
            );
        }
    }

    #[test]
    fn blocks_immediate_threat() {
        let board = board(&[
            ".......", //
            ".......",
            ".......",
            ".......",
            ".......",
            "XXX...O",
        ]);
        let decision = seeded()
            .choose_column(&board, Player::Player2, Difficulty::Medium)
            .unwrap();
        assert_eq!(
            decision,
            Decision {
                column: 3,
                reason: Reason::Block
            }
        );
    }

    #[test]
    fn easy_without_blunders_still_blocks() {
        let board = board(&[
            ".......", //
            ".......",
            ".......",
            ".......",
            ".......",
            "XXX...O",
        ]);
        let mut ai = seeded().with_blunder_chance(0.0);
        for _ in 0..20 {
            let decision = ai
                .choose_column(&board, Player::Player2, Difficulty::Easy)
                .unwrap();
            assert_eq!(decision.column, 3);
        }
    }

    #[test]
    fn easy_always_blundering_plays_legal_random_columns() {
        let board = board(&[
            "X......", //
            "O......",
            "X......",
            "O......",
            "X......",
            "O......",
        ]);
        let mut ai = seeded().with_blunder_chance(1.0);
        for _ in 0..50 {
            let decision = ai
                .choose_column(&board, Player::Player2, Difficulty::Easy)
                .unwrap();
            assert_eq!(decision.reason, Reason::Blunder);
            assert!((1..7).contains(&decision.column));
        }
    }

    #[test]
    fn easy_blunders_even_with_a_winning_move() {
        // O wins in column 6
        let board = board(&[
            ".......", //
            ".......",
            ".......",
            "......O",
            "......O",
            "XXX...O",
        ]);
        let mut ai = seeded().with_blunder_chance(1.0);
        let columns = (0..50)
            .map(|_| {
                let decision = ai
                    .choose_column(&board, Player::Player2, Difficulty::Easy)
                    .unwrap();
                assert_eq!(decision.reason, Reason::Blunder);
                decision.column
            })
            .collect::<Vec<_>>();
        assert!(columns.iter().any(|&col| col != 6), "{columns:?}");
        assert!(columns.iter().all(|&col| board.is_column_playable(col)));
    }

    #[test]
    fn same_seed_same_moves() {
        let board = Gameboard::<7, 6>::new();
        let mut a = seeded();
        let mut b = seeded();
        for _ in 0..10 {
            assert_eq!(
                a.choose_column(&board, Player::Player1, Difficulty::Easy),
                b.choose_column(&board, Player::Player1, Difficulty::Easy)
            );
        }
    }

    #[test]
    fn search_reason_on_quiet_positions() {
        let board = Gameboard::<7, 6>::new();
        let decision = seeded()
            .choose_column(&board, Player::Player1, Difficulty::Medium)
            .unwrap();
        assert!(matches!(decision.reason, Reason::Search { .. }));
        assert!(board.is_column_playable(decision.column));
    }

    #[test]
    fn blunder_chance_is_clamped() {
        assert_eq!(seeded().with_blunder_chance(3.0).easy_blunder_chance, 1.0);
        assert_eq!(seeded().with_blunder_chance(-1.0).easy_blunder_chance, 0.0);
        assert_eq!(seeded().with_blunder_chance(f64::NAN).easy_blunder_chance, 0.0);
    }
}
