//! Moves, the move history and scoped move application.

use crate::board::{Gameboard, Player};
use crate::error::InvalidMove;
use core::ops::Deref;

/// A chip dropped by `player` into `column`, landing in `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub column: usize,
    pub row: usize,
    pub player: Player,
}

/// Ordered record of the moves of a game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory(Vec<Move>);

impl MoveHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    pub fn pop(&mut self) -> Option<Move> {
        self.0.pop()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Move> {
        self.0.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.0
    }

    /// Player whose turn follows the recorded moves.
    #[must_use]
    pub fn next_player(&self) -> Player {
        self.last().map_or(Player::Player1, |mv| mv.player.opponent())
    }
}

/// A move applied to a borrowed board that is taken back on drop.
///
/// Whatever way the scope is left (early return, pruning, unwinding), the
/// board is restored.
#[derive(Debug)]
pub struct ScopedMove<'a, const W: usize, const H: usize> {
    board: &'a mut Gameboard<W, H>,
    mv: Move,
}

impl<'a, const W: usize, const H: usize> ScopedMove<'a, W, H> {
    pub fn apply(
        board: &'a mut Gameboard<W, H>,
        column: usize,
        player: Player,
    ) -> Result<Self, InvalidMove> {
        let row = board.insert_player_chip(column, player)?;
        Ok(Self {
            board,
            mv: Move {
                column,
                row,
                player,
            },
        })
    }

    #[must_use]
    pub const fn applied(&self) -> Move {
        self.mv
    }

    /// Mutable access for nested scoped moves.
    pub fn board_mut(&mut self) -> &mut Gameboard<W, H> {
        self.board
    }
}

impl<const W: usize, const H: usize> Deref for ScopedMove<'_, W, H> {
    type Target = Gameboard<W, H>;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl<const W: usize, const H: usize> Drop for ScopedMove<'_, W, H> {
    fn drop(&mut self) {
        self.board.remove_chip(self.mv.row, self.mv.column);
    }
}
