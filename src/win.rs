//! Win detection around the most recently placed chip.

use crate::board::{Gameboard, Player, SERIES_LEN};
use crate::eval::windows;

/// Line direction on the board, as `(row step, column step)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// `/`: up and to the right.
    Diagonal,
    /// `\`: up and to the left.
    AntiDiagonal,
}

impl Axis {
    /// Axes in the order they are checked.
    pub const ALL: [Self; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::Diagonal,
        Self::AntiDiagonal,
    ];

    #[must_use]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Self::Horizontal => (0, 1),
            Self::Vertical => (1, 0),
            Self::Diagonal => (1, 1),
            Self::AntiDiagonal => (1, -1),
        }
    }
}

/// The run of chips that decided the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningLine {
    pub player: Player,
    pub axis: Axis,
    /// `(row, col)` positions, ordered along the axis.
    pub cells: Vec<(usize, usize)>,
}

impl WinningLine {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }
}

/// Walks from `(row, col)` in `step` while the chips belong to `player`.
fn walk<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    row: usize,
    col: usize,
    (dr, dc): (isize, isize),
    player: Player,
) -> impl Iterator<Item = (usize, usize)> + '_ {
    (1..)
        .map(move |i| {
            let r = row.checked_add_signed(dr * i)?;
            let c = col.checked_add_signed(dc * i)?;
            (r < H && c < W).then_some((r, c))
        })
        .take_while(move |pos| matches!(*pos, Some((r, c)) if board.cell(r, c) == Some(player)))
        .flatten()
}

/// Length of the run through `(row, col)` along `axis`, including the cell.
fn run_length<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    row: usize,
    col: usize,
    axis: Axis,
    player: Player,
) -> usize {
    let (dr, dc) = axis.step();
    1 + walk(board, row, col, (dr, dc), player).count()
        + walk(board, row, col, (-dr, -dc), player).count()
}

/// Returns the winning run through the chip at `(row, col)`, if any.
///
/// Axes are checked in [`Axis::ALL`] order; the first complete run is
/// reported. Runs longer than four count as well.
#[must_use]
pub fn winning_line<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    row: usize,
    col: usize,
) -> Option<WinningLine> {
    let player = board.cell(row, col)?;

    Axis::ALL.into_iter().find_map(|axis| {
        if run_length(board, row, col, axis, player) < SERIES_LEN {
            return None;
        }
        let (dr, dc) = axis.step();
        let mut cells = walk(board, row, col, (-dr, -dc), player).collect::<Vec<_>>();
        cells.reverse();
        cells.push((row, col));
        cells.extend(walk(board, row, col, (dr, dc), player));
        Some(WinningLine {
            player,
            axis,
            cells,
        })
    })
}

/// Returns whether the chip at `(row, col)` completes a run of four.
#[must_use]
pub fn check_win<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    row: usize,
    col: usize,
) -> bool {
    board.cell(row, col).is_some_and(|player| {
        Axis::ALL
            .into_iter()
            .any(|axis| run_length(board, row, col, axis, player) >= SERIES_LEN)
    })
}

/// Scans the whole board for a run of four of `player`.
///
/// Unlike [`check_win`] this needs no last move, so it also works on
/// boards built with [`Gameboard::from_rows`].
#[must_use]
pub fn has_winner<const W: usize, const H: usize>(board: &Gameboard<W, H>, player: Player) -> bool {
    windows::<W, H>().any(|window| {
        window
            .iter()
            .all(|&(row, col)| board.cell(row, col) == Some(player))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_winner_horizontally() {
        let mut board = Gameboard::<7, 6>::new();
        for col in 0..3 {
            board.insert_player_chip(col, Player::Player1).unwrap();
            assert!(!check_win(&board, 0, col));
        }
        assert!(!has_winner(&board, Player::Player1));

        let row = board.insert_player_chip(3, Player::Player1).unwrap();
        let line = winning_line(&board, row, 3).unwrap();
        assert_eq!(line.axis, Axis::Horizontal);
        assert_eq!(line.player, Player::Player1);
        assert_eq!(line.cells, [(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert!(has_winner(&board, Player::Player1));
        assert!(!has_winner(&board, Player::Player2));

        // the chip in the middle of the run also sees it
        assert!(check_win(&board, 0, 1));
    }

    #[test]
    fn find_winner_vertically() {
        let mut board = Gameboard::<4, 4>::new();
        for _ in 0..3 {
            board.insert_player_chip(0, Player::Player2).unwrap();
        }
        assert!(!check_win(&board, 2, 0));

        let row = board.insert_player_chip(0, Player::Player2).unwrap();
        assert_eq!(row, 3);
        let line = winning_line(&board, row, 0).unwrap();
        assert_eq!(line.axis, Axis::Vertical);
        assert_eq!(line.cells, [(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn find_winner_diagonally() {
        // direction=/
        let board = Gameboard::<7, 6>::from_rows(&[
            ".......", //
            ".......",
            "...X...",
            "..XO...",
            ".XOO...",
            "XOOX...",
        ])
        .unwrap();
        let line = winning_line(&board, 3, 3).unwrap();
        assert_eq!(line.axis, Axis::Diagonal);
        assert_eq!(line.cells, [(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert!(check_win(&board, 0, 0));

        // direction=\
        let board = Gameboard::<7, 6>::from_rows(&[
            ".......", //
            ".......",
            "...O...",
            "...XO..",
            "...XXO.",
            "...XXXO",
        ])
        .unwrap();
        let line = winning_line(&board, 0, 6).unwrap();
        assert_eq!(line.axis, Axis::AntiDiagonal);
        assert_eq!(line.cells, [(0, 6), (1, 5), (2, 4), (3, 3)]);
        assert!(has_winner(&board, Player::Player2));
    }

    #[test]
    fn longer_runs_are_wins() {
        let board = Gameboard::<7, 6>::from_rows(&[
            ".......", //
            ".......",
            ".......",
            ".......",
            ".......",
            "XXXXX..",
        ])
        .unwrap();
        let line = winning_line(&board, 0, 2).unwrap();
        assert_eq!(line.len(), 5);
        assert!(line.contains(0, 4));
    }

    #[test]
    fn broken_runs_are_no_wins() {
        let board = Gameboard::<7, 6>::from_rows(&[
            ".......", //
            ".......",
            ".......",
            ".......",
            ".......",
            "XXOXX..",
        ])
        .unwrap();
        for col in 0..5 {
            assert!(!check_win(&board, 0, col));
        }
        assert!(winning_line(&board, 0, 5).is_none());
    }
}
