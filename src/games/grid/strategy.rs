//! One-ply move heuristic for automated players.
//!
//! Priority: complete an own line, else block any other piece's line, else a
//! uniformly random empty cell. Lines are scanned rows, columns, diagonal,
//! anti-diagonal, lowest index first; the first hit is played.

use super::board::{BoardState, Line};
use super::types::Piece;
use rand::Rng;
use tracing::{debug, instrument};

/// Why the AI picked a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Completes a line of the AI's own piece.
    Win(usize),
    /// Denies another piece a completed line.
    Block(usize),
    /// Nothing urgent; picked at random.
    Random(usize),
}

impl Decision {
    /// Linear index of the chosen cell.
    pub fn cell(self) -> usize {
        match self {
            Decision::Win(cell) | Decision::Block(cell) | Decision::Random(cell) => cell,
        }
    }
}

/// Finds the empty cell on the first line holding `side - 1` of a piece
/// accepted by `matches`, with its last cell still empty.
fn imminent_cell(board: &BoardState, matches: impl Fn(Piece) -> bool) -> Option<(Line, usize)> {
    let target = board.side() - 1;
    board.lines().find_map(|line| {
        let threatened = board
            .line_pieces(line)
            .any(|(piece, count)| count == target && matches(piece));
        if threatened && board.counter(line).total() == target {
            board.first_empty_on(line).map(|cell| (line, cell))
        } else {
            None
        }
    })
}

/// Cell that completes a line of `piece`, if one exists.
#[instrument(skip(board), fields(side = board.side()))]
pub fn winning_cell(board: &BoardState, piece: Piece) -> Option<usize> {
    imminent_cell(board, |p| p == piece).map(|(line, cell)| {
        debug!(%line, cell, "Found winning cell");
        cell
    })
}

/// Cell that stops any other piece from completing a line, if one exists.
#[instrument(skip(board), fields(side = board.side()))]
pub fn blocking_cell(board: &BoardState, piece: Piece) -> Option<usize> {
    imminent_cell(board, |p| p != piece).map(|(line, cell)| {
        debug!(%line, cell, "Found blocking cell");
        cell
    })
}

/// Chooses a move for `piece`. Returns `None` only on a full board.
#[instrument(skip(board, rng), fields(side = board.side()))]
pub fn choose_move<R: Rng>(board: &BoardState, piece: Piece, rng: &mut R) -> Option<Decision> {
    if let Some(cell) = winning_cell(board, piece) {
        return Some(Decision::Win(cell));
    }
    if let Some(cell) = blocking_cell(board, piece) {
        return Some(Decision::Block(cell));
    }

    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }
    let cell = empty[rng.random_range(0..empty.len())];
    debug!(cell, candidates = empty.len(), "No threats, picking at random");
    Some(Decision::Random(cell))
}
