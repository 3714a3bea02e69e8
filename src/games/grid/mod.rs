//! N x N tic-tac-toe for any number of human and AI players.
//!
//! A board of side `N` is played by up to `N` players, each with their own
//! piece. A line (row, column or full diagonal) filled with one piece wins
//! the match; the first player to win the configured number of matches takes
//! the series.

mod board;
mod invariants;
mod roster;
mod scheduler;
mod setup;
mod types;

pub mod rules;
pub mod strategy;

pub use board::{BoardState, Line, LineCounter};
pub use invariants::{
    BoardInvariants, CountersMatchCells, FillCountMatches, Invariant, InvariantSet,
    InvariantViolation,
};
pub use roster::{Player, PlayerKind, PlayerRoster};
pub use rules::MatchResult;
pub use scheduler::{SeriesStatus, TurnScheduler};
pub use setup::{FirstPlayer, PiecePool, SeriesSetup, ai_count_bounds, build_roster};
pub use strategy::Decision;
pub use types::{Cell, Coord, Piece};
