//! Strictly Grid library - N x N tic-tac-toe engine
//!
//! Any number of human and AI players share an N x N board, each with a
//! distinct piece. Filling a row, column or full diagonal wins the match;
//! the first player to win the configured number of matches takes the series.
//!
//! # Architecture
//!
//! - **Board**: cell storage with incremental per-line piece counters
//! - **Rules**: win and tie evaluation from the counters
//! - **Strategy**: win-else-block-else-random AI
//! - **Scheduler**: roster rotation across moves, matches and series
//! - **Console**: validated prompts and text rendering
//! - **GameLoop**: fixes the call order between all of the above
//!
//! # Example
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use strictly_grid::{EngineConfig, GameLoop, LinePrompter};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = EngineConfig::default();
//! let mut game = GameLoop::new(config, LinePrompter::stdio(), StdRng::seed_from_u64(7));
//! game.run()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod console;
mod error;
mod games;
mod orchestrator;

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig, MAX_PALETTE_SIZE, Messages};

// Crate-level exports - Errors
pub use error::EngineError;

// Crate-level exports - Grid engine
pub use games::grid::{
    BoardInvariants, BoardState, Cell, Coord, CountersMatchCells, Decision, FillCountMatches,
    FirstPlayer, Invariant, InvariantSet, InvariantViolation, Line, LineCounter, MatchResult,
    Piece, PiecePool, Player, PlayerKind, PlayerRoster, SeriesSetup, SeriesStatus,
    TurnScheduler, ai_count_bounds, build_roster,
};

// Crate-level exports - Rules and AI
pub use games::grid::rules::{has_line_of, is_full, is_tie, outcome, winner};
pub use games::grid::strategy::{blocking_cell, choose_move, winning_cell};

// Crate-level exports - Console
pub use console::{
    Console, ConsoleError, LinePrompter, Prompter, join_or, kind_label, player_label,
    render_board, render_scores,
};

// Crate-level exports - Orchestration
pub use orchestrator::{GameLoop, SeriesReport};
