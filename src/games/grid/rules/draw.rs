//! Tie detection.

use super::super::BoardState;
use super::win::winner;
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
#[instrument(skip(board), fields(side = board.side()))]
pub fn is_full(board: &BoardState) -> bool {
    board.is_full()
}

/// A full board with no completed line.
#[instrument(skip(board), fields(side = board.side()))]
pub fn is_tie(board: &BoardState) -> bool {
    is_full(board) && winner(board).is_none()
}
