//! Error types of the engine.

use thiserror::Error;

/// A move that can't be applied to the board or game.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum InvalidMove {
    /// Column index is not on the board.
    #[error("column {column} is out of range (board has {width} columns)")]
    OutOfRange { column: usize, width: usize },
    /// Column is full.
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("game is already over")]
    GameAlreadyOver,
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum UndoError {
    #[error("no move to undo")]
    EmptyHistory,
    /// Finished games can't be rolled back; start a new game instead.
    #[error("game is already over")]
    GameAlreadyOver,
}

/// Failure while building a board from its text form.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BoardParseError {
    #[error("expected {expected} rows, got {got}")]
    RowCount { expected: usize, got: usize },
    #[error("row {row} has {got} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("invalid character '{character}' in row {row}")]
    InvalidCharacter { character: char, row: usize },
    #[error("floating chip at row {row}, column {column}")]
    FloatingChip { row: usize, column: usize },
}

#[derive(Debug, Error)]
pub enum ScoreboardError {
    #[error("failed to {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("scoreboard serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("easy blunder chance {0} must be within [0, 1]")]
    BlunderChance(f64),
}
