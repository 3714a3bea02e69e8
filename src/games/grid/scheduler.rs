//! Turn rotation and score bookkeeping across moves, matches and a series.
//!
//! Three nested cycles drive the roster:
//!
//! - **Move**: each non-terminal move rotates the roster by one.
//! - **Match**: at match end the move rotations are undone, restoring the
//!   match-start order, then the roster rotates one more so a different player
//!   leads the next match.
//! - **Series**: once someone reaches the win threshold, the match rotations
//!   are undone as well, restoring the order the series started with.
//!
//! Rotation amounts are kept as explicit counters and inverted exactly.

use super::roster::{Player, PlayerRoster};
use super::rules::MatchResult;
use tracing::{debug, info, instrument, warn};

/// Where the series stands after a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesStatus {
    /// Another match follows.
    Continue,
    /// Someone reached the threshold. Winners in seating order.
    Over(Vec<Player>),
}

/// Owns the roster and the rotation counters for one series.
#[derive(Debug, Clone)]
pub struct TurnScheduler {
    roster: PlayerRoster,
    win_threshold: u32,
    first_player_shift: usize,
    match_rotations: usize,
    series_rotations: usize,
    matches_played: usize,
}

impl TurnScheduler {
    /// Starts a series, rotating the roster so the chosen first player leads.
    #[instrument(skip(roster), fields(players = roster.len()))]
    pub fn new(mut roster: PlayerRoster, win_threshold: u32, first_player_shift: usize) -> Self {
        roster.reset_scores();
        roster.rotate(first_player_shift as isize);
        info!(first = %roster.current().name(), "Series scheduled");
        Self {
            roster,
            win_threshold,
            first_player_shift,
            match_rotations: 0,
            series_rotations: 0,
            matches_played: 0,
        }
    }

    /// The player to move.
    pub fn current(&self) -> &Player {
        self.roster.current()
    }

    /// The roster, for rendering.
    pub fn roster(&self) -> &PlayerRoster {
        &self.roster
    }

    /// Match wins needed to take the series.
    pub fn win_threshold(&self) -> u32 {
        self.win_threshold
    }

    /// Shift applied before the first match.
    pub fn first_player_shift(&self) -> usize {
        self.first_player_shift
    }

    /// Rotations made by moves in the current match.
    pub fn match_rotations(&self) -> usize {
        self.match_rotations
    }

    /// Rotations made between matches in this series.
    pub fn series_rotations(&self) -> usize {
        self.series_rotations
    }

    /// Matches finished in this series.
    pub fn matches_played(&self) -> usize {
        self.matches_played
    }

    /// Passes the turn after a non-terminal move.
    #[instrument(skip(self), fields(match_rotations = self.match_rotations))]
    pub fn advance_turn(&mut self) {
        self.roster.rotate(1);
        self.match_rotations += 1;
    }

    /// Records a finished match and sets up the roster for what comes next.
    ///
    /// A win credits the player to move, who made the winning placement.
    /// A `Continue` result is not a finished match and is ignored.
    #[instrument(skip(self), fields(matches_played = self.matches_played))]
    pub fn finish_match(&mut self, result: MatchResult) -> SeriesStatus {
        match result {
            MatchResult::Continue => {
                warn!("finish_match called on a match still in progress");
                return SeriesStatus::Continue;
            }
            MatchResult::Win(piece) => {
                debug_assert_eq!(*self.current().piece(), piece, "winner must be the mover");
                self.roster.current_mut().award_match();
                info!(
                    winner = %self.current().name(),
                    score = *self.current().score(),
                    "Match won"
                );
            }
            MatchResult::Tie => info!("Match tied"),
        }
        self.matches_played += 1;

        self.roster.rotate(-(self.match_rotations as isize));
        self.match_rotations = 0;

        if self.is_series_over() {
            self.roster.rotate(-(self.series_rotations as isize));
            self.series_rotations = 0;
            let winners = self.series_winners();
            info!(winners = winners.len(), "Series over");
            return SeriesStatus::Over(winners);
        }

        self.roster.rotate(1);
        self.series_rotations += 1;
        debug!(leader = %self.current().name(), "Next match scheduled");
        SeriesStatus::Continue
    }

    /// True once any score reaches the threshold.
    pub fn is_series_over(&self) -> bool {
        self.roster
            .seating()
            .iter()
            .any(|p| *p.score() >= self.win_threshold)
    }

    /// Players at or past the threshold, in seating order.
    pub fn series_winners(&self) -> Vec<Player> {
        self.roster
            .seating()
            .iter()
            .filter(|p| *p.score() >= self.win_threshold)
            .cloned()
            .collect()
    }
}
