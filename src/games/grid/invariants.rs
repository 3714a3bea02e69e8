//! Checkable board invariants.
//!
//! The line counters are a cache over the cells. These invariants recompute
//! them from scratch and compare; `BoardState::place` checks them in debug builds.

use super::board::{BoardState, Line};
use super::types::Cell;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Each line's counter total equals the occupied cells on that line, per piece.
pub struct CountersMatchCells;

impl Invariant<BoardState> for CountersMatchCells {
    fn holds(board: &BoardState) -> bool {
        let side = board.side();
        Line::all(side).all(|line| {
            let occupied = line
                .cells(side)
                .filter(|&index| !board.is_empty(index))
                .count();
            let per_piece_ok = board.line_pieces(line).all(|(piece, count)| {
                line.cells(side)
                    .filter(|&index| board.get(index) == Some(Cell::Occupied(piece)))
                    .count()
                    == count
            });
            board.counter(line).total() == occupied && per_piece_ok
        })
    }

    fn description() -> &'static str {
        "Line counters match the occupied cells on every line"
    }
}

/// The fill count equals the number of non-empty cells.
pub struct FillCountMatches;

impl Invariant<BoardState> for FillCountMatches {
    fn holds(board: &BoardState) -> bool {
        board.cells().iter().filter(|c| !c.is_empty()).count() == board.filled()
    }

    fn description() -> &'static str {
        "Fill count equals the number of occupied cells"
    }
}

/// All board invariants.
pub type BoardInvariants = (CountersMatchCells, FillCountMatches);
