//! Players and the rotating turn order.

use super::types::Piece;
use crate::error::EngineError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Who decides a player's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Moves are typed in at the console.
    #[strum(to_string = "human")]
    Human,
    /// Moves come from the built-in heuristic.
    #[strum(to_string = "AI")]
    Ai,
}

/// A seat in the series.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Sequence number within this player's kind.
    number: usize,
    /// Piece placed by this player.
    piece: Piece,
    /// Human or automated.
    kind: PlayerKind,
    /// Display name, e.g. `"human 0"`.
    name: String,
    /// Matches won in the current series.
    score: u32,
}

impl Player {
    /// Creates a player with a zero score.
    #[instrument]
    pub fn new(number: usize, piece: Piece, kind: PlayerKind) -> Self {
        Self {
            number,
            piece,
            kind,
            name: format!("{} {}", kind, number),
            score: 0,
        }
    }

    /// Returns true if moves come from the console.
    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    /// Adds one match win.
    #[instrument(skip(self), fields(player = %self.name))]
    pub fn award_match(&mut self) {
        self.score += 1;
        debug!(score = self.score, "Awarded match");
    }

    /// Zeroes the score for a fresh series.
    pub fn reset_score(&mut self) {
        self.score = 0;
    }
}

/// Fixed seating plus a start offset; the player at the offset is to move.
///
/// Rotating moves the offset instead of the players, so rotating by `k` is
/// undone exactly by rotating by `-k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRoster {
    players: Vec<Player>,
    offset: usize,
}

impl PlayerRoster {
    /// Creates a roster in seating order, first seat to move.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] for an empty roster or duplicate pieces.
    #[instrument(skip(players), fields(count = players.len()))]
    pub fn new(players: Vec<Player>) -> Result<Self, EngineError> {
        if players.is_empty() {
            return Err(EngineError::invalid_config("roster has no players"));
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].iter().any(|p| p.piece == player.piece) {
                return Err(EngineError::invalid_config(format!(
                    "piece '{}' assigned twice",
                    player.piece
                )));
            }
        }
        Ok(Self { players, offset: 0 })
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always false; a roster holds at least one player.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player to move.
    pub fn current(&self) -> &Player {
        &self.players[self.offset]
    }

    /// Player to move, mutably.
    pub fn current_mut(&mut self) -> &mut Player {
        &mut self.players[self.offset]
    }

    /// Left-shifts the turn order by `k` (negative `k` shifts right).
    #[instrument(skip(self), fields(from = self.offset))]
    pub fn rotate(&mut self, k: isize) {
        let len = self.players.len() as isize;
        self.offset = (self.offset as isize + k).rem_euclid(len) as usize;
        debug!(to = self.offset, "Rotated roster");
    }

    /// Players in turn order, starting with the one to move.
    pub fn turn_order(&self) -> impl Iterator<Item = &Player> {
        self.players[self.offset..]
            .iter()
            .chain(self.players[..self.offset].iter())
    }

    /// Players in seating order (humans then AIs), independent of rotation.
    pub fn seating(&self) -> &[Player] {
        &self.players
    }

    /// Finds the player holding `piece`.
    pub fn by_piece(&self, piece: Piece) -> Option<&Player> {
        self.players.iter().find(|p| p.piece == piece)
    }

    /// Zeroes every score.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.players.iter_mut().for_each(Player::reset_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> PlayerRoster {
        PlayerRoster::new(vec![
            Player::new(0, Piece::new('A'), PlayerKind::Human),
            Player::new(1, Piece::new('B'), PlayerKind::Human),
            Player::new(0, Piece::new('C'), PlayerKind::Ai),
        ])
        .unwrap()
    }

    fn order(roster: &PlayerRoster) -> String {
        roster.turn_order().map(|p| p.piece().symbol()).collect()
    }

    #[test]
    fn test_rotate_left_and_back() {
        let mut roster = roster();
        roster.rotate(1);
        assert_eq!(order(&roster), "BCA");
        roster.rotate(1);
        assert_eq!(order(&roster), "CAB");
        roster.rotate(-2);
        assert_eq!(order(&roster), "ABC");
    }

    #[test]
    fn test_rotate_wraps_past_length() {
        let mut roster = roster();
        roster.rotate(7);
        assert_eq!(order(&roster), "BCA");
        roster.rotate(-8);
        assert_eq!(order(&roster), "CAB");
    }

    #[test]
    fn test_seating_ignores_rotation() {
        let mut roster = roster();
        roster.rotate(2);
        let seats: String = roster.seating().iter().map(|p| p.piece().symbol()).collect();
        assert_eq!(seats, "ABC");
        assert_eq!(roster.current().name(), "AI 0");
    }

    #[test]
    fn test_duplicate_piece_rejected() {
        let result = PlayerRoster::new(vec![
            Player::new(0, Piece::new('X'), PlayerKind::Human),
            Player::new(0, Piece::new('X'), PlayerKind::Ai),
        ]);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_scores() {
        let mut roster = roster();
        roster.current_mut().award_match();
        roster.current_mut().award_match();
        assert_eq!(*roster.current().score(), 2);
        roster.reset_scores();
        assert_eq!(*roster.current().score(), 0);
    }
}
