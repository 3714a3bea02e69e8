//! Error types for the grid engine.

use crate::games::grid::Piece;

/// Error raised by the core engine.
///
/// Input validation never surfaces here: the console re-prompts until it
/// has a legal value. Reaching [`EngineError::OccupiedCell`] therefore means
/// the move-selection path is broken, and callers abort the run.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// Board side or player counts are out of bounds.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// A placement targeted a cell that already holds a piece.
    #[display("Cell {} is already occupied", _0)]
    OccupiedCell(usize),

    /// A placement targeted a cell outside the board.
    #[display("Cell {} is outside a board of side {}", index, side)]
    OutOfBounds {
        /// Linear index requested.
        index: usize,
        /// Side of the board.
        side: usize,
    },

    /// A piece that is not part of the configured palette.
    #[display("Piece '{}' is not in the palette", _0)]
    UnknownPiece(Piece),
}

impl std::error::Error for EngineError {}

impl EngineError {
    /// Creates an [`EngineError::InvalidConfig`].
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
