//! Engine for _Vier gewinnt_ (_Connect Four_): board, win detection, static
//! evaluation, minimax search with alpha-beta pruning and the turn logic of a
//! game against a human or the computer.
//!
//! ```
//! use viergewinnt_engine::{Difficulty, Game, GameConfig, Outcome, Player};
//!
//! let mut game = Game::<7, 6>::new(GameConfig::default());
//! for column in [3, 0, 3, 0, 3, 0, 3] {
//!     game.play_move(column).unwrap();
//! }
//! assert_eq!(game.outcome(), Outcome::Win(Player::Player1));
//!
//! game.reset();
//! let column = game.get_ai_move(Difficulty::Medium).unwrap();
//! assert!(column < 7);
//! ```

#![deny(missing_debug_implementations)]

pub mod ai_player;
pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod moves;
pub mod scoreboard;
pub mod search;
pub mod win;

pub use ai_player::{AiPlayer, Decision, Difficulty, Reason};
pub use board::{Gameboard, Player, SERIES_LEN};
pub use config::{GameConfig, GameMode};
pub use error::{BoardParseError, ConfigError, InvalidMove, ScoreboardError, UndoError};
pub use eval::evaluate;
pub use game::{Game, GameState, MoveResult, Outcome, UndoResult};
pub use moves::{Move, MoveHistory, ScopedMove};
pub use scoreboard::Scoreboard;
pub use search::{Pruning, SearchResult, SearchStats, Searcher, WIN_SCORE};
pub use win::{Axis, WinningLine, check_win, winning_line};
