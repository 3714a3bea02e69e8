//! Core domain types for the N x N grid game.

use serde::{Deserialize, Serialize};

/// A single-character piece symbol, unique to one player for a whole series.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct Piece(char);

impl Piece {
    /// Creates a piece from its symbol.
    pub const fn new(symbol: char) -> Self {
        Self(symbol)
    }

    /// Returns the symbol drawn on the board.
    pub fn symbol(self) -> char {
        self.0
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    #[default]
    Empty,
    /// Cell holding a piece. Never reassigned within a match.
    Occupied(Piece),
}

impl Cell {
    /// Returns true if nothing has been placed here.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the piece in this cell, if any.
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(piece) => Some(piece),
        }
    }
}

/// A `(row, col)` coordinate on a board of a given side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Coord {
    /// Row, counted from the top.
    pub row: usize,
    /// Column, counted from the left.
    pub col: usize,
}

impl Coord {
    /// Converts a linear index into a coordinate.
    pub fn from_index(index: usize, side: usize) -> Self {
        Self {
            row: index / side,
            col: index % side,
        }
    }

    /// Converts this coordinate into a linear index.
    pub fn to_index(self, side: usize) -> usize {
        self.row * side + self.col
    }

    /// Returns true if this coordinate lies on the top-left to bottom-right diagonal.
    pub fn on_diagonal(self) -> bool {
        self.row == self.col
    }

    /// Returns true if this coordinate lies on the top-right to bottom-left diagonal.
    pub fn on_anti_diagonal(self, side: usize) -> bool {
        self.row + self.col + 1 == side
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_conversion_is_total() {
        for side in 2..=16 {
            for index in 0..side * side {
                let coord = Coord::from_index(index, side);
                assert!(coord.row < side && coord.col < side);
                assert_eq!(coord.to_index(side), index);
            }
        }
    }

    #[test]
    fn test_center_is_on_both_diagonals() {
        let center = Coord::new(1, 1);
        assert!(center.on_diagonal());
        assert!(center.on_anti_diagonal(3));
        assert!(!Coord::new(0, 1).on_diagonal());
        assert!(Coord::new(0, 2).on_anti_diagonal(3));
    }

    #[test]
    fn test_cell_piece() {
        assert_eq!(Cell::Empty.piece(), None);
        assert_eq!(Cell::Occupied(Piece::new('X')).piece(), Some(Piece::new('X')));
        assert!(Cell::default().is_empty());
    }
}
