//! Win detection from the line counters.

use super::super::{BoardState, Piece};
use super::draw::is_full;
use tracing::{debug, instrument};

/// Outcome of a match after a move.
///
/// Derived from the board each time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchResult {
    /// The mover completed a line.
    Win(Piece),
    /// Board is full with no completed line.
    Tie,
    /// Play goes on.
    Continue,
}

impl MatchResult {
    /// Returns true for `Win` and `Tie`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, MatchResult::Continue)
    }
}

/// Checks whether any row, column or diagonal holds exactly `length` of `piece`.
///
/// `length == N` is a win; `length == N - 1` is one move away from one.
#[instrument(skip(board), fields(side = board.side()))]
pub fn has_line_of(board: &BoardState, piece: Piece, length: usize) -> bool {
    board.lines().any(|line| board.count(line, piece) == length)
}

/// Returns the piece that has filled a line, if any.
///
/// Placements are exclusive and play halts on the first win, so two winners
/// would mean the engine kept playing past a terminal state.
#[instrument(skip(board), fields(side = board.side()))]
pub fn winner(board: &BoardState) -> Option<Piece> {
    let side = board.side();
    let mut found = board
        .lines()
        .flat_map(|line| board.line_pieces(line).collect::<Vec<_>>())
        .filter(|&(_, count)| count == side)
        .map(|(piece, _)| piece);

    let first = found.next();
    debug_assert!(
        found.all(|other| Some(other) == first),
        "more than one piece completed a line"
    );
    first
}

/// Evaluates the match right after `current` has moved.
///
/// Only the mover can complete a line on their own move.
#[instrument(skip(board), fields(side = board.side()))]
pub fn outcome(board: &BoardState, current: Piece) -> MatchResult {
    let result = if has_line_of(board, current, board.side()) {
        MatchResult::Win(current)
    } else if is_full(board) {
        MatchResult::Tie
    } else {
        MatchResult::Continue
    };
    debug!(?result, "Evaluated match");
    result
}
