//! Minimax search with alpha-beta pruning.

use crate::board::{Gameboard, Player};
use crate::eval::evaluate;
use crate::moves::ScopedMove;
use crate::win::check_win;
use core::cmp::Ordering;
use rayon::prelude::*;
use tracing::trace;

/// Score of a position where the searching player has won. Losses score
/// the negated value.
pub const WIN_SCORE: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    /// `None` at the search horizon or when no move is left.
    pub column: Option<usize>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of visited search nodes.
    pub nodes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pruning {
    #[default]
    AlphaBeta,
    /// Plain minimax. Visits the full tree; only useful as a reference.
    Disabled,
}

/// Returns the lowest column in which `player` wins immediately.
///
/// The board is temporarily modified and restored before returning.
pub fn winning_move_in_place<const W: usize, const H: usize>(
    board: &mut Gameboard<W, H>,
    player: Player,
) -> Option<usize> {
    (0..W).find(|&col| {
        ScopedMove::apply(board, col, player)
            .is_ok_and(|mv| check_win(&*mv, mv.applied().row, col))
    })
}

/// Returns the lowest column in which `player` wins immediately.
#[must_use]
pub fn winning_move<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    player: Player,
) -> Option<usize> {
    winning_move_in_place(&mut board.clone(), player)
}

/// Minimax searcher scoring positions from the view of one player.
///
/// The player the searcher plays for maximizes, the opponent minimizes.
#[derive(Debug, Clone)]
pub struct Searcher {
    ai_player: Player,
    pruning: Pruning,
    stats: SearchStats,
}

impl Searcher {
    #[must_use]
    pub const fn new(ai_player: Player) -> Self {
        Self::with_pruning(ai_player, Pruning::AlphaBeta)
    }

    #[must_use]
    pub const fn with_pruning(ai_player: Player, pruning: Pruning) -> Self {
        Self {
            ai_player,
            pruning,
            stats: SearchStats { nodes: 0 },
        }
    }

    #[must_use]
    pub const fn ai_player(&self) -> Player {
        self.ai_player
    }

    /// Statistics accumulated since construction or the last reset.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Searches `depth` plies ahead with `to_move` to play.
    ///
    /// Every move tried on `board` is taken back before this returns, so
    /// the board is left as it was passed in.
    pub fn search<const W: usize, const H: usize>(
        &mut self,
        board: &mut Gameboard<W, H>,
        depth: usize,
        to_move: Player,
        mut alpha: i32,
        mut beta: i32,
    ) -> SearchResult {
        self.stats.nodes += 1;

        if depth == 0 {
            return SearchResult {
                score: evaluate(board, self.ai_player),
                column: None,
            };
        }

        let maximizing = to_move == self.ai_player;

        // All immediate wins are looked at before any child is expanded, so
        // a cutoff can never hide one.
        if let Some(col) = winning_move_in_place(board, to_move) {
            return SearchResult {
                score: if maximizing { WIN_SCORE } else { -WIN_SCORE },
                column: Some(col),
            };
        }

        let mut best = SearchResult {
            score: if maximizing { i32::MIN } else { i32::MAX },
            column: None,
        };

        for col in 0..W {
            let Ok(mut mv) = ScopedMove::apply(board, col, to_move) else {
                continue;
            };
            let score = self
                .search(mv.board_mut(), depth - 1, to_move.opponent(), alpha, beta)
                .score;
            drop(mv);

            if maximizing {
                if score > best.score {
                    best = SearchResult {
                        score,
                        column: Some(col),
                    };
                }
                alpha = alpha.max(score);
            } else {
                if score < best.score {
                    best = SearchResult {
                        score,
                        column: Some(col),
                    };
                }
                beta = beta.min(score);
            }

            if self.pruning == Pruning::AlphaBeta && beta <= alpha {
                break;
            }
        }

        if best.column.is_none() {
            // no legal move: draw
            return SearchResult {
                score: 0,
                column: None,
            };
        }
        best
    }

    /// Finds the best column for `to_move` without touching `board`.
    pub fn best_move<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        depth: usize,
        to_move: Player,
    ) -> SearchResult {
        let before = self.stats.nodes;
        let result = self.search(&mut board.clone(), depth, to_move, i32::MIN, i32::MAX);
        trace!(
            depth,
            nodes = self.stats.nodes - before,
            score = result.score,
            column = ?result.column,
            "search finished"
        );
        result
    }

    /// Like [`Self::best_move`], but searches the root moves in parallel.
    ///
    /// Each root move is searched on its own copy of the board with a full
    /// window. Ties go to the lowest column, as in the sequential search.
    pub fn best_move_parallel<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        depth: usize,
        to_move: Player,
    ) -> SearchResult {
        if depth == 0 || winning_move(board, to_move).is_some() {
            return self.best_move(board, depth, to_move);
        }
        self.stats.nodes += 1;

        let (ai_player, pruning) = (self.ai_player, self.pruning);
        let columns = board.available_columns_iter().collect::<Vec<_>>();
        let children = columns
            .into_par_iter()
            .filter_map(|col| {
                let mut child = board.clone();
                child.insert_player_chip(col, to_move).ok()?;
                let mut searcher = Self::with_pruning(ai_player, pruning);
                let score = searcher
                    .search(&mut child, depth - 1, to_move.opponent(), i32::MIN, i32::MAX)
                    .score;
                Some((col, score, searcher.stats.nodes))
            })
            .collect::<Vec<_>>();

        let maximizing = to_move == self.ai_player;
        let mut best: Option<SearchResult> = None;
        for (col, score, nodes) in children {
            self.stats.nodes += nodes;
            let better = best.is_none_or(|best| {
                let lower_column = best.column.is_some_and(|best_col| col < best_col);
                match score.cmp(&best.score) {
                    Ordering::Greater => maximizing,
                    Ordering::Less => !maximizing,
                    Ordering::Equal => lower_column,
                }
            });
            if better {
                best = Some(SearchResult {
                    score,
                    column: Some(col),
                });
            }
        }

        let result = best.unwrap_or(SearchResult {
            score: 0,
            column: None,
        });
        trace!(
            depth,
            nodes = self.stats.nodes,
            score = result.score,
            column = ?result.column,
            "parallel search finished"
        );
        result
    }
}
