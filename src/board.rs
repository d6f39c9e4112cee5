//! Game board and move execution.

use crate::error::{BoardParseError, InvalidMove};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of coins in a row to win the game.
pub const SERIES_LEN: usize = 4;

#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player1 => Self::Player2,
            Self::Player2 => Self::Player1,
        }
    }

    /// Symbol used in the text form of the board.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Player1 => 'X',
            Self::Player2 => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player1 => write!(f, "Player 1 ({})", self.symbol()),
            Self::Player2 => write!(f, "Player 2 ({})", self.symbol()),
        }
    }
}

/// Gameboard.
#[derive(PartialOrd, PartialEq, Clone, Eq, Hash)]
pub struct Gameboard<const W: usize = 7, const H: usize = 6>(
    /*
     * Board: rows --> col --> field
     * Technical indices correspond to the logical indices:
     * (row=0,col=0) <==> bottom left of game board
     */
    [[Option<Player>; W]; H],
);

impl<const W: usize, const H: usize> Default for Gameboard<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Gameboard<W, H> {
    #[must_use]
    pub const fn new() -> Self {
        assert!(W >= SERIES_LEN);
        assert!(H >= SERIES_LEN);

        Self([[None; W]; H])
    }

    /// Parses a board from text rows, top row first.
    ///
    /// `X` is [`Player::Player1`], `O` is [`Player::Player2`] and `.` marks an
    /// empty cell. Whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardParseError> {
        if rows.len() != H {
            return Err(BoardParseError::RowCount {
                expected: H,
                got: rows.len(),
            });
        }

        let mut board = Self::new();
        for (top_index, line) in rows.iter().enumerate() {
            let row = H - 1 - top_index;
            let cells = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    'X' | 'x' => Ok(Some(Player::Player1)),
                    'O' | 'o' => Ok(Some(Player::Player2)),
                    '.' => Ok(None),
                    other => Err(BoardParseError::InvalidCharacter {
                        character: other,
                        row,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            if cells.len() != W {
                return Err(BoardParseError::RowLength {
                    row,
                    expected: W,
                    got: cells.len(),
                });
            }
            board.0[row].copy_from_slice(&cells);
        }

        if let Some((row, column)) = board.first_floating_chip() {
            return Err(BoardParseError::FloatingChip { row, column });
        }
        Ok(board)
    }

    #[must_use]
    pub const fn rows(&self) -> &[[Option<Player>; W]; H] {
        &self.0
    }

    /// Returns the chip at the given position; `None` for empty or
    /// off-board positions.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        self.0.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Returns whether a chip can be dropped into the column.
    #[must_use]
    pub fn is_column_playable(&self, col: usize) -> bool {
        col < W && self.0[H - 1][col].is_none()
    }

    /// Returns the index of the bottom-most free slot in the selected column.
    ///
    /// Returns `None` if there are no more free slots or the column doesn't
    /// exist.
    #[must_use]
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= W {
            return None;
        }
        (0..H).find(|&row| self.0[row][col].is_none())
    }

    /// Emits the column indices where moves are legal, in increasing order.
    pub fn available_columns_iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..W).filter(|&col| self.is_column_playable(col))
    }

    /// Returns the number of free slots in the given column.
    #[must_use]
    pub fn free_slots_in_column(&self, col: usize) -> usize {
        self.lowest_empty_row(col).map_or(0, |row| H - row)
    }

    /// Returns the number of free slots in total.
    #[must_use]
    pub fn free_slots_in_total(&self) -> usize {
        (0..W).map(|col| self.free_slots_in_column(col)).sum()
    }

    /// Returns whether the top row is occupied everywhere.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0[H - 1].iter().all(Option::is_some)
    }

    /// Number of chips on the board.
    #[must_use]
    pub fn chip_count(&self) -> usize {
        self.0.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Returns whether every column is a gap-free stack starting at the
    /// bottom row.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.first_floating_chip().is_none()
    }

    fn first_floating_chip(&self) -> Option<(usize, usize)> {
        for col in 0..W {
            let height = self.lowest_empty_row(col).unwrap_or(H);
            if let Some(row) = (height..H).find(|&row| self.0[row][col].is_some()) {
                return Some((row, col));
            }
        }
        None
    }

    /// Drops a chip into the column and returns the row it landed in.
    ///
    /// Mutates the board in place; clone first if the board must stay
    /// untouched.
    pub fn insert_player_chip(&mut self, col: usize, player: Player) -> Result<usize, InvalidMove> {
        if col >= W {
            return Err(InvalidMove::OutOfRange {
                column: col,
                width: W,
            });
        }

        let row = self
            .lowest_empty_row(col)
            .ok_or(InvalidMove::ColumnFull { column: col })?;
        self.0[row][col] = Some(player);
        Ok(row)
    }

    /// Clears the given cell. The caller is responsible for passing the
    /// position of the topmost chip of that column.
    pub fn remove_chip(&mut self, row: usize, col: usize) {
        debug_assert!(row + 1 == H || self.0[row + 1][col].is_none());
        self.0[row][col] = None;
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        W
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }
}

impl<const W: usize, const H: usize> fmt::Display for Gameboard<W, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print rows reverted so that it appears naturally.
        for row in self.0.iter().rev() {
            let line = row
                .iter()
                .map(|cell| cell.map_or('.', Player::symbol).to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        writeln!(f, "{}", "-".repeat(2 * W - 1))?;
        let labels = (1..=W).map(|c| (c % 10).to_string()).collect::<Vec<_>>();
        write!(f, "{}", labels.join(" "))
    }
}

impl<const W: usize, const H: usize> fmt::Debug for Gameboard<W, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gameboard<{W}, {H}>")?;
        fmt::Display::fmt(self, f)
    }
}
