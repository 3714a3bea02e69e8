//! Board storage with incremental per-line piece counters.
//!
//! Every placement bumps the counter of its row, its column and any diagonal
//! it sits on, so win and threat queries only read `2N + 2` counters instead
//! of rescanning cells.

use super::invariants::{BoardInvariants, InvariantSet};
use super::types::{Cell, Coord, Piece};
use crate::config::EngineConfig;
use crate::error::EngineError;
use tracing::{debug, instrument};

/// One of the `2N + 2` lines a win can be made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    /// A row, by index from the top.
    Row(usize),
    /// A column, by index from the left.
    Col(usize),
    /// Top-left to bottom-right diagonal.
    Diagonal,
    /// Top-right to bottom-left diagonal.
    AntiDiagonal,
}

impl Line {
    /// Returns every line of a board in scan order: rows, columns, diagonal, anti-diagonal.
    pub fn all(side: usize) -> impl Iterator<Item = Line> {
        (0..side)
            .map(Line::Row)
            .chain((0..side).map(Line::Col))
            .chain([Line::Diagonal, Line::AntiDiagonal])
    }

    /// Returns the linear indices of the cells on this line, in order.
    pub fn cells(self, side: usize) -> impl Iterator<Item = usize> {
        (0..side).map(move |k| match self {
            Line::Row(row) => Coord::new(row, k).to_index(side),
            Line::Col(col) => Coord::new(k, col).to_index(side),
            Line::Diagonal => Coord::new(k, k).to_index(side),
            Line::AntiDiagonal => Coord::new(k, side - 1 - k).to_index(side),
        })
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Row(row) => write!(f, "row {}", row),
            Line::Col(col) => write!(f, "column {}", col),
            Line::Diagonal => write!(f, "diagonal"),
            Line::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

/// Piece counts for one line, one slot per palette piece, all zero at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCounter {
    counts: Vec<usize>,
}

impl LineCounter {
    fn new(slots: usize) -> Self {
        Self {
            counts: vec![0; slots],
        }
    }

    fn clear(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
    }

    /// Sum of all piece counts, i.e. the occupied cells on the line.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// The grid buffer plus the line counters kept in lock-step with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    side: usize,
    palette: Vec<Piece>,
    cells: Vec<Cell>,
    rows: Vec<LineCounter>,
    cols: Vec<LineCounter>,
    diagonal: LineCounter,
    anti_diagonal: LineCounter,
    filled: usize,
}

impl BoardState {
    /// Allocates an empty board of the given side.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the side is below the configured
    /// minimum or larger than the number of distinct pieces available.
    #[instrument(skip(config))]
    pub fn new(side: usize, config: &EngineConfig) -> Result<Self, EngineError> {
        let max = config.max_board_side();
        if side < *config.min_board_side() || side > max {
            return Err(EngineError::invalid_config(format!(
                "board side {} must be between {} and {}",
                side,
                config.min_board_side(),
                max
            )));
        }

        let slots = config.palette().len();
        debug!(side, slots, "Creating board");
        Ok(Self {
            side,
            palette: config.palette().clone(),
            cells: vec![Cell::Empty; side * side],
            rows: vec![LineCounter::new(slots); side],
            cols: vec![LineCounter::new(slots); side],
            diagonal: LineCounter::new(slots),
            anti_diagonal: LineCounter::new(slots),
            filled: 0,
        })
    }

    /// Returns the side length.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Gets the cell at a linear index.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Gets the cell at a coordinate.
    pub fn at(&self, coord: Coord) -> Option<Cell> {
        if coord.row >= self.side || coord.col >= self.side {
            return None;
        }
        self.get(coord.to_index(self.side))
    }

    /// Checks if the cell at a linear index is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Number of occupied cells.
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Places a piece, updating the row, column and diagonal counters.
    ///
    /// The center of an odd board sits on both diagonals and bumps both.
    ///
    /// # Errors
    ///
    /// - [`EngineError::OutOfBounds`] if the index is off the board.
    /// - [`EngineError::OccupiedCell`] if the cell already holds a piece.
    /// - [`EngineError::UnknownPiece`] if the piece is not in the palette.
    #[instrument(skip(self), fields(side = self.side))]
    pub fn place(&mut self, index: usize, piece: Piece) -> Result<Coord, EngineError> {
        let cell = self.get(index).ok_or(EngineError::OutOfBounds {
            index,
            side: self.side,
        })?;
        if !cell.is_empty() {
            return Err(EngineError::OccupiedCell(index));
        }
        let slot = self.slot(piece)?;
        let coord = Coord::from_index(index, self.side);

        self.cells[index] = Cell::Occupied(piece);
        self.filled += 1;
        self.rows[coord.row].counts[slot] += 1;
        self.cols[coord.col].counts[slot] += 1;
        if coord.on_diagonal() {
            self.diagonal.counts[slot] += 1;
        }
        if coord.on_anti_diagonal(self.side) {
            self.anti_diagonal.counts[slot] += 1;
        }

        debug!(%coord, %piece, filled = self.filled, "Placed piece");
        debug_assert!(BoardInvariants::check_all(self).is_ok());
        Ok(coord)
    }

    /// Returns true iff no empty cells remain.
    pub fn is_full(&self) -> bool {
        self.filled == self.cells.len()
    }

    /// Empties every cell and zeroes every counter, keeping the allocation.
    #[instrument(skip(self), fields(side = self.side))]
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = Cell::Empty);
        self.rows.iter_mut().for_each(LineCounter::clear);
        self.cols.iter_mut().for_each(LineCounter::clear);
        self.diagonal.clear();
        self.anti_diagonal.clear();
        self.filled = 0;
    }

    /// Linear indices of all empty cells, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Rows that still have at least one empty cell, ascending.
    pub fn open_rows(&self) -> Vec<usize> {
        (0..self.side)
            .filter(|&row| self.rows[row].total() < self.side)
            .collect()
    }

    /// Columns that still have at least one empty cell, ascending.
    pub fn open_cols(&self) -> Vec<usize> {
        (0..self.side)
            .filter(|&col| self.cols[col].total() < self.side)
            .collect()
    }

    /// Counter for a line.
    pub fn counter(&self, line: Line) -> &LineCounter {
        match line {
            Line::Row(row) => &self.rows[row],
            Line::Col(col) => &self.cols[col],
            Line::Diagonal => &self.diagonal,
            Line::AntiDiagonal => &self.anti_diagonal,
        }
    }

    /// How many of `piece` sit on `line`. Pieces outside the palette count zero.
    pub fn count(&self, line: Line, piece: Piece) -> usize {
        match self.slot(piece) {
            Ok(slot) => self.counter(line).counts[slot],
            Err(_) => 0,
        }
    }

    /// Pieces with a non-zero count on `line`, with their counts.
    pub fn line_pieces(&self, line: Line) -> impl Iterator<Item = (Piece, usize)> + '_ {
        self.palette
            .iter()
            .copied()
            .zip(self.counter(line).counts.iter().copied())
            .filter(|(_, count)| *count > 0)
    }

    /// First empty cell on `line`, scanning in line order.
    pub fn first_empty_on(&self, line: Line) -> Option<usize> {
        line.cells(self.side).find(|&index| self.is_empty(index))
    }

    /// Every line of this board in scan order.
    pub fn lines(&self) -> impl Iterator<Item = Line> {
        Line::all(self.side)
    }

    fn slot(&self, piece: Piece) -> Result<usize, EngineError> {
        self.palette
            .iter()
            .position(|&p| p == piece)
            .ok_or(EngineError::UnknownPiece(piece))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Piece = Piece::new('X');
    const O: Piece = Piece::new('O');

    fn board(side: usize) -> BoardState {
        BoardState::new(side, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_side_bounds() {
        let config = EngineConfig::default();
        assert!(matches!(
            BoardState::new(1, &config),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            BoardState::new(17, &config),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(BoardState::new(2, &config).is_ok());
        assert!(BoardState::new(16, &config).is_ok());
    }

    #[test]
    fn test_place_updates_row_and_column() {
        let mut board = board(3);
        board.place(5, X).unwrap();
        assert_eq!(board.count(Line::Row(1), X), 1);
        assert_eq!(board.count(Line::Col(2), X), 1);
        assert_eq!(board.count(Line::Diagonal, X), 0);
        assert_eq!(board.count(Line::AntiDiagonal, X), 0);
        assert_eq!(board.count(Line::Row(1), O), 0);
    }

    #[test]
    fn test_center_counts_on_both_diagonals() {
        let mut board = board(3);
        board.place(4, O).unwrap();
        assert_eq!(board.count(Line::Diagonal, O), 1);
        assert_eq!(board.count(Line::AntiDiagonal, O), 1);
    }

    #[test]
    fn test_even_board_has_no_shared_center() {
        let mut board = board(4);
        for index in [0, 5, 10, 15] {
            board.place(index, X).unwrap();
        }
        assert_eq!(board.count(Line::Diagonal, X), 4);
        assert_eq!(board.count(Line::AntiDiagonal, X), 0);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut board = board(3);
        board.place(0, X).unwrap();
        assert_eq!(board.place(0, O), Err(EngineError::OccupiedCell(0)));
        assert_eq!(board.count(Line::Row(0), O), 0);
    }

    #[test]
    fn test_out_of_bounds_and_unknown_piece() {
        let mut board = board(2);
        assert_eq!(
            board.place(4, X),
            Err(EngineError::OutOfBounds { index: 4, side: 2 })
        );
        let stranger = Piece::new('Z');
        assert_eq!(board.place(0, stranger), Err(EngineError::UnknownPiece(stranger)));
        assert_eq!(board.filled(), 0);
    }

    #[test]
    fn test_clear_resets_cells_and_counters() {
        let mut board = board(3);
        board.place(4, X).unwrap();
        board.place(0, O).unwrap();
        board.clear();
        assert_eq!(board.empty_cells().len(), 9);
        assert!(board.lines().all(|line| board.counter(line).total() == 0));
        assert_eq!(board.filled(), 0);
    }

    #[test]
    fn test_open_rows_and_cols() {
        let mut board = board(2);
        board.place(0, X).unwrap();
        board.place(1, O).unwrap();
        assert_eq!(board.open_rows(), vec![1]);
        assert_eq!(board.open_cols(), vec![0, 1]);
    }

    #[test]
    fn test_line_cells_in_scan_order() {
        let lines: Vec<Line> = Line::all(2).collect();
        assert_eq!(
            lines,
            vec![
                Line::Row(0),
                Line::Row(1),
                Line::Col(0),
                Line::Col(1),
                Line::Diagonal,
                Line::AntiDiagonal
            ]
        );
        assert_eq!(Line::AntiDiagonal.cells(3).collect::<Vec<_>>(), vec![2, 4, 6]);
        assert_eq!(Line::Col(1).cells(3).collect::<Vec<_>>(), vec![1, 4, 7]);
    }
}
