//! Static evaluation of board positions.

use crate::board::{Gameboard, Player, SERIES_LEN};
use crate::win::Axis;

/// Score of a window holding `n` chips of a single player, indexed by `n`.
const WINDOW_SCORES: [i32; SERIES_LEN + 1] = [0, 1, 10, 50, 1000];

/// Four consecutive positions along one axis.
pub type Window = [(usize, usize); SERIES_LEN];

/// Emits every window of four on a `W`x`H` board: horizontal, vertical and
/// both diagonals.
pub fn windows<const W: usize, const H: usize>() -> impl Iterator<Item = Window> {
    (0..H)
        .flat_map(|row| (0..W).map(move |col| (row, col)))
        .flat_map(|(row, col)| {
            Axis::ALL
                .into_iter()
                .filter_map(move |axis| window_from(row, col, axis.step(), W, H))
        })
}

fn window_from(
    row: usize,
    col: usize,
    (dr, dc): (isize, isize),
    width: usize,
    height: usize,
) -> Option<Window> {
    let mut window = [(0, 0); SERIES_LEN];
    for (i, slot) in (0_isize..).zip(window.iter_mut()) {
        let r = row.checked_add_signed(dr * i).filter(|&r| r < height)?;
        let c = col.checked_add_signed(dc * i).filter(|&c| c < width)?;
        *slot = (r, c);
    }
    Some(window)
}

fn score_window<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    window: &Window,
    maximizing_player: Player,
) -> i32 {
    let (own, other) = window
        .iter()
        .filter_map(|&(row, col)| board.cell(row, col))
        .fold((0, 0), |(own, other), chip| {
            if chip == maximizing_player {
                (own + 1, other)
            } else {
                (own, other + 1)
            }
        });

    if own > 0 && other > 0 {
        // blocked
        0
    } else if other == 0 {
        WINDOW_SCORES[own]
    } else {
        -WINDOW_SCORES[other]
    }
}

/// Scores the board from the view of `maximizing_player`.
///
/// Sums over all windows of four: windows containing chips of both players
/// count nothing, otherwise 1, 10, 50 or 1000 for one to four chips,
/// negated for the opponent's chips.
#[must_use]
pub fn evaluate<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    maximizing_player: Player,
) -> i32 {
    windows::<W, H>()
        .map(|window| score_window(board, &window, maximizing_player))
        .sum()
}
