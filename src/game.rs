//! Game flow: turns, move history and game outcome.

use crate::ai_player::{AiPlayer, Difficulty};
use crate::board::{Gameboard, Player};
use crate::config::{GameConfig, GameMode};
use crate::error::{InvalidMove, UndoError};
use crate::moves::{Move, MoveHistory};
use crate::win::{WinningLine, winning_line};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Win(Player),
    /// Board is full without a winner.
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    AwaitingMove(Player),
    GameOver(Outcome),
}

/// Result of [`Game::play_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Row the chip of the requested move landed in.
    pub applied_row: usize,
    pub outcome: Outcome,
    /// `None` once the game is over.
    pub next_player: Option<Player>,
    /// The computer's answer, if it moved right after.
    pub ai_move: Option<Move>,
    /// Set if the game was won by this move or the computer's answer.
    pub winning_line: Option<WinningLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoResult {
    /// Taken back moves, most recent first.
    pub undone: Vec<Move>,
    pub current_player: Player,
}

/// Game with all its state.
#[derive(Debug, Clone)]
pub struct Game<const W: usize = 7, const H: usize = 6> {
    board: Gameboard<W, H>,
    history: MoveHistory,
    state: GameState,
    winning_line: Option<WinningLine>,
    config: GameConfig,
    ai: AiPlayer,
}

impl<const W: usize, const H: usize> Game<W, H> {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let ai = AiPlayer::from_config(&config);
        Self::with_ai(config, ai)
    }

    /// Creates a game whose computer player uses the given random source.
    #[must_use]
    pub fn with_ai(config: GameConfig, ai: AiPlayer) -> Self {
        Self {
            board: Gameboard::new(),
            history: MoveHistory::new(),
            state: GameState::AwaitingMove(Player::Player1),
            winning_line: None,
            config,
            ai,
        }
    }

    /// Starts over with an empty board, keeping config and random source.
    pub fn reset(&mut self) {
        self.board = Gameboard::new();
        self.history.clear();
        self.state = GameState::AwaitingMove(Player::Player1);
        self.winning_line = None;
        debug!("new game");
    }

    /// Drops a chip of the current player into `column`.
    ///
    /// If the game goes on and the next player is controlled by the
    /// computer, its move is played right away.
    pub fn play_move(&mut self, column: usize) -> Result<MoveResult, InvalidMove> {
        let GameState::AwaitingMove(player) = self.state else {
            return Err(InvalidMove::GameAlreadyOver);
        };
        let mv = self.apply_move(column, player)?;

        let mut ai_move = None;
        if let GameState::AwaitingMove(next) = self.state {
            if self.config.is_ai(next) {
                match self.play_ai_move() {
                    Ok(mv) => ai_move = Some(mv),
                    Err(err) => warn!(%err, ?next, "computer could not answer"),
                }
            }
        }

        Ok(MoveResult {
            applied_row: mv.row,
            outcome: self.outcome(),
            next_player: self.current_player(),
            ai_move,
            winning_line: self.winning_line.clone(),
        })
    }

    /// Lets the computer play for the current player at the configured
    /// difficulty.
    pub fn play_ai_move(&mut self) -> Result<Move, InvalidMove> {
        let column = self.get_ai_move(self.config.difficulty)?;
        let player = self.current_player().ok_or(InvalidMove::GameAlreadyOver)?;
        self.apply_move(column, player)
    }

    /// Column the computer would play for the current player. Doesn't
    /// change the game.
    pub fn get_ai_move(&mut self, difficulty: Difficulty) -> Result<usize, InvalidMove> {
        let player = self.current_player().ok_or(InvalidMove::GameAlreadyOver)?;
        self.ai
            .choose_column(&self.board, player, difficulty)
            .map(|decision| decision.column)
            .ok_or(InvalidMove::GameAlreadyOver)
    }

    /// Takes back the last move; against the computer the last two, so
    /// that it's the human's turn again.
    pub fn undo(&mut self) -> Result<UndoResult, UndoError> {
        if matches!(self.state, GameState::GameOver(_)) {
            return Err(UndoError::GameAlreadyOver);
        }
        if self.history.is_empty() {
            return Err(UndoError::EmptyHistory);
        }

        let count = match self.config.mode {
            GameMode::HumanVsHuman => 1,
            GameMode::HumanVsAi => 2,
        };
        let mut undone = Vec::with_capacity(count);
        while undone.len() < count {
            let Some(mv) = self.history.pop() else {
                break;
            };
            self.board.remove_chip(mv.row, mv.column);
            undone.push(mv);
        }

        let current_player = self.history.next_player();
        self.state = GameState::AwaitingMove(current_player);
        debug!(moves = undone.len(), ?current_player, "undo");
        Ok(UndoResult {
            undone,
            current_player,
        })
    }

    fn apply_move(&mut self, column: usize, player: Player) -> Result<Move, InvalidMove> {
        let row = self.board.insert_player_chip(column, player)?;
        let mv = Move {
            column,
            row,
            player,
        };
        self.history.push(mv);
        debug!(column, row, ?player, "move");

        if let Some(line) = winning_line(&self.board, row, column) {
            self.winning_line = Some(line);
            self.state = GameState::GameOver(Outcome::Win(player));
            info!(?player, moves = self.history.len(), "game won");
        } else if self.board.is_full() {
            self.state = GameState::GameOver(Outcome::Draw);
            info!("game drawn");
        } else {
            self.state = GameState::AwaitingMove(player.opponent());
        }
        Ok(mv)
    }

    /// Copy of the board, e.g. for rendering.
    #[must_use]
    pub fn board_snapshot(&self) -> Gameboard<W, H> {
        self.board.clone()
    }

    #[must_use]
    pub const fn board(&self) -> &Gameboard<W, H> {
        &self.board
    }

    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        match self.state {
            GameState::AwaitingMove(_) => Outcome::InProgress,
            GameState::GameOver(outcome) => outcome,
        }
    }

    /// Player to move, `None` once the game is over.
    #[must_use]
    pub const fn current_player(&self) -> Option<Player> {
        match self.state {
            GameState::AwaitingMove(player) => Some(player),
            GameState::GameOver(_) => None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub const fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Chips of the winning run, once the game is won.
    #[must_use]
    pub const fn winning_line(&self) -> Option<&WinningLine> {
        self.winning_line.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn round(&self) -> usize {
        self.history.len()
    }
}

impl<const W: usize, const H: usize> Default for Game<W, H> {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn players_alternate() {
        let mut game = Game::<7, 6>::default();
        assert_eq!(game.state(), GameState::AwaitingMove(Player::Player1));

        let result = game.play_move(3).unwrap();
        assert_eq!(result.applied_row, 0);
        assert_eq!(result.outcome, Outcome::InProgress);
        assert_eq!(result.next_player, Some(Player::Player2));
        assert_eq!(result.ai_move, None);
        assert_eq!(result.winning_line, None);

        let result = game.play_move(3).unwrap();
        assert_eq!(result.applied_row, 1);
        assert_eq!(result.next_player, Some(Player::Player1));
        assert_eq!(game.round(), 2);
    }

    #[test]
    fn invalid_moves_leave_state_alone() {
        let mut game = Game::<4, 4>::default();
        assert_eq!(
            game.play_move(4),
            Err(InvalidMove::OutOfRange {
                column: 4,
                width: 4
            })
        );
        for _ in 0..4 {
            game.play_move(0).unwrap();
        }
        assert_eq!(
            game.play_move(0),
            Err(InvalidMove::ColumnFull { column: 0 })
        );
        assert_eq!(game.current_player(), Some(Player::Player1));
        assert_eq!(game.round(), 4);
    }

    #[test]
    fn moves_after_game_over_are_rejected() {
        let mut game = Game::<7, 6>::default();
        for col in [0, 6, 1, 6, 2, 6, 3] {
            game.play_move(col).unwrap();
        }
        assert_eq!(game.outcome(), Outcome::Win(Player::Player1));
        assert_eq!(game.current_player(), None);
        assert_eq!(game.play_move(4), Err(InvalidMove::GameAlreadyOver));
        assert_eq!(
            game.get_ai_move(Difficulty::Hard),
            Err(InvalidMove::GameAlreadyOver)
        );
        assert_eq!(game.undo(), Err(UndoError::GameAlreadyOver));

        let line = game.winning_line().unwrap();
        assert_eq!(line.cells, [(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn undo_on_empty_history() {
        let mut game = Game::<7, 6>::default();
        assert_eq!(game.undo(), Err(UndoError::EmptyHistory));
    }

    #[test]
    fn computer_answers_immediately() {
        let config = GameConfig::against_ai(Difficulty::Medium).with_seed(1);
        let mut game = Game::<7, 6>::new(config);

        let result = game.play_move(3).unwrap();
        let ai_move = result.ai_move.unwrap();
        assert_eq!(ai_move.player, Player::Player2);
        assert_eq!(result.next_player, Some(Player::Player1));
        assert_eq!(game.round(), 2);

        let undo = game.undo().unwrap();
        assert_eq!(undo.undone.len(), 2);
        assert_eq!(undo.undone[0], ai_move);
        assert_eq!(undo.current_player, Player::Player1);
        assert_eq!(game.board().chip_count(), 0);
    }

    #[test]
    fn computer_answers_until_the_game_ends() {
        let config = GameConfig::against_ai(Difficulty::Easy).with_seed(8);
        let mut game = Game::<4, 4>::new(config);

        while let Some(col) = { let next = game.board().available_columns_iter().next(); next } {
            let Ok(result) = game.play_move(col) else {
                break;
            };
            if result.ai_move.is_none() {
                assert_ne!(result.outcome, Outcome::InProgress);
            }
        }
        assert_ne!(game.outcome(), Outcome::InProgress);
    }

    #[test]
    fn computer_can_open_the_game() {
        let config = GameConfig {
            ai_player: Player::Player1,
            ..GameConfig::against_ai(Difficulty::Hard).with_seed(3)
        };
        let mut game = Game::<7, 6>::new(config);

        let mv = game.play_ai_move().unwrap();
        assert_eq!(mv.player, Player::Player1);
        assert_eq!(game.current_player(), Some(Player::Player2));
    }

    #[test]
    fn reset_starts_over() {
        let mut game = Game::<7, 6>::default();
        for col in [0, 6, 1, 6, 2, 6, 3] {
            game.play_move(col).unwrap();
        }
        game.reset();
        assert_eq!(game.outcome(), Outcome::InProgress);
        assert_eq!(game.current_player(), Some(Player::Player1));
        assert!(game.history().is_empty());
        assert!(game.winning_line().is_none());
        assert_eq!(game.board_snapshot(), Gameboard::new());
    }
}
