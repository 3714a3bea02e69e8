//! Game rules over a board.
//!
//! Pure, read-only functions over [`BoardState`](super::BoardState) and its
//! line counters. Rules are separated from board storage so the AI and the
//! orchestrator share a single evaluator.

pub mod draw;
pub mod win;

pub use draw::{is_full, is_tie};
pub use win::{MatchResult, has_line_of, outcome, winner};
