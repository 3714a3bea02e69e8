//! Series setup: player counts, piece assignment and first-player choice.

use super::roster::{Player, PlayerKind, PlayerRoster};
use super::types::Piece;
use crate::config::EngineConfig;
use crate::error::EngineError;
use derive_getters::Getters;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, info, instrument};

/// Allowed AI counts once the human count is known, as an inclusive range.
///
/// Enough AIs are required to reach the minimum player count, and no more
/// players than the board side fit in total.
#[instrument]
pub fn ai_count_bounds(side: usize, humans: usize, min_players: usize) -> (usize, usize) {
    let min = min_players.saturating_sub(humans);
    let max = side.saturating_sub(humans);
    (min.min(max), max)
}

/// Validated board side and player counts for one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct SeriesSetup {
    side: usize,
    humans: usize,
    ais: usize,
}

impl SeriesSetup {
    /// Validates a board side and player composition.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when the side is out of bounds or
    /// the player total is below the minimum or above the side.
    #[instrument(skip(config))]
    pub fn new(
        side: usize,
        humans: usize,
        ais: usize,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        if side < *config.min_board_side() || side > config.max_board_side() {
            return Err(EngineError::invalid_config(format!(
                "board side {} must be between {} and {}",
                side,
                config.min_board_side(),
                config.max_board_side()
            )));
        }
        let total = humans + ais;
        if total < *config.min_players() || total > side {
            return Err(EngineError::invalid_config(format!(
                "{} players cannot play on a board of side {} (need {} to {})",
                total,
                side,
                config.min_players(),
                side
            )));
        }
        Ok(Self { side, humans, ais })
    }

    /// Total number of players.
    pub fn players(&self) -> usize {
        self.humans + self.ais
    }
}

/// Pieces not yet taken by a player. Shrinks as pieces are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiecePool {
    available: Vec<Piece>,
}

impl PiecePool {
    /// Starts from the full palette.
    pub fn new(palette: &[Piece]) -> Self {
        Self {
            available: palette.to_vec(),
        }
    }

    /// Pieces still free, in palette order.
    pub fn available(&self) -> &[Piece] {
        &self.available
    }

    /// Finds a free piece by symbol, ignoring ASCII case.
    pub fn find(&self, symbol: char) -> Option<Piece> {
        let wanted = symbol.to_ascii_uppercase();
        self.available
            .iter()
            .copied()
            .find(|p| p.symbol().to_ascii_uppercase() == wanted)
    }

    /// Removes a specific piece.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownPiece`] if it is not free.
    #[instrument(skip(self))]
    pub fn take(&mut self, piece: Piece) -> Result<Piece, EngineError> {
        let index = self
            .available
            .iter()
            .position(|&p| p == piece)
            .ok_or(EngineError::UnknownPiece(piece))?;
        Ok(self.available.remove(index))
    }

    /// Removes a uniformly random free piece.
    #[instrument(skip(self, rng), fields(available = self.available.len()))]
    pub fn take_random<R: Rng>(&mut self, rng: &mut R) -> Option<Piece> {
        let piece = *self.available.choose(rng)?;
        self.take(piece).ok()
    }
}

/// Category of the player who moves first in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum FirstPlayer {
    /// A human picked by number.
    #[strum(to_string = "human")]
    Human,
    /// An AI picked by number.
    #[strum(to_string = "AI")]
    Ai,
    /// Any player, uniformly at random.
    #[strum(to_string = "random")]
    Random,
}

impl FirstPlayer {
    /// Categories that can be offered: a kind only if it has players, random always.
    #[instrument]
    pub fn available(humans: usize, ais: usize) -> Vec<FirstPlayer> {
        let mut choices = Vec::new();
        if humans > 0 {
            choices.push(FirstPlayer::Human);
        }
        if ais > 0 {
            choices.push(FirstPlayer::Ai);
        }
        choices.push(FirstPlayer::Random);
        choices
    }

    /// Largest player number that can be picked in this category.
    pub fn max_number(self, setup: &SeriesSetup) -> Option<usize> {
        match self {
            FirstPlayer::Human => setup.humans.checked_sub(1),
            FirstPlayer::Ai => setup.ais.checked_sub(1),
            FirstPlayer::Random => None,
        }
    }

    /// Rotation that brings the chosen player to the head of the seating order.
    ///
    /// `number` is the player number within the category; ignored for `Random`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the category has no player with that number.
    #[instrument(skip(rng))]
    pub fn shift<R: Rng>(
        self,
        number: usize,
        setup: &SeriesSetup,
        rng: &mut R,
    ) -> Result<usize, EngineError> {
        let shift = match self {
            FirstPlayer::Random => rng.random_range(0..setup.players()),
            FirstPlayer::Human | FirstPlayer::Ai => {
                let max = self.max_number(setup).ok_or_else(|| {
                    EngineError::invalid_config(format!("there are no {} players", self))
                })?;
                if number > max {
                    return Err(EngineError::invalid_config(format!(
                        "{} player {} does not exist",
                        self, number
                    )));
                }
                let offset = if self == FirstPlayer::Ai { setup.humans } else { 0 };
                offset + number
            }
        };
        debug!(shift, "First player shift");
        Ok(shift)
    }
}

/// Builds a roster in seating order: humans `0..humans`, then AIs `0..ais`.
///
/// `human_pieces` holds one piece per human in order; AIs draw theirs at
/// random from what is left in `pool`.
///
/// # Errors
///
/// Returns an error if a human piece is not free, the piece count does not
/// match the setup, or the pool runs dry.
#[instrument(skip(pool, rng))]
pub fn build_roster<R: Rng>(
    setup: &SeriesSetup,
    human_pieces: &[Piece],
    pool: &mut PiecePool,
    rng: &mut R,
) -> Result<PlayerRoster, EngineError> {
    if human_pieces.len() != setup.humans {
        return Err(EngineError::invalid_config(format!(
            "{} pieces given for {} humans",
            human_pieces.len(),
            setup.humans
        )));
    }

    let mut players = Vec::with_capacity(setup.players());
    for (number, &piece) in human_pieces.iter().enumerate() {
        pool.take(piece)?;
        players.push(Player::new(number, piece, PlayerKind::Human));
    }
    for number in 0..setup.ais {
        let piece = pool
            .take_random(rng)
            .ok_or_else(|| EngineError::invalid_config("ran out of pieces for AI players"))?;
        players.push(Player::new(number, piece, PlayerKind::Ai));
    }

    info!(humans = setup.humans, ais = setup.ais, "Roster built");
    PlayerRoster::new(players)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_ai_count_bounds() {
        assert_eq!(ai_count_bounds(3, 0, 2), (2, 3));
        assert_eq!(ai_count_bounds(3, 1, 2), (1, 2));
        assert_eq!(ai_count_bounds(3, 3, 2), (0, 0));
        assert_eq!(ai_count_bounds(2, 1, 2), (1, 1));
        assert_eq!(ai_count_bounds(5, 4, 2), (0, 1));
    }

    #[test]
    fn test_setup_rejects_bad_counts() {
        let config = EngineConfig::default();
        assert!(SeriesSetup::new(3, 1, 1, &config).is_ok());
        assert!(SeriesSetup::new(3, 1, 0, &config).is_err());
        assert!(SeriesSetup::new(3, 2, 2, &config).is_err());
        assert!(SeriesSetup::new(1, 1, 0, &config).is_err());
        assert!(SeriesSetup::new(17, 2, 0, &config).is_err());
    }

    #[test]
    fn test_pool_shrinks() {
        let mut pool = PiecePool::new(EngineConfig::default().palette());
        assert_eq!(pool.find('x'), Some(Piece::new('X')));
        pool.take(Piece::new('X')).unwrap();
        assert_eq!(pool.find('X'), None);
        assert!(pool.take(Piece::new('X')).is_err());
        assert_eq!(pool.available().len(), 15);
    }

    #[test]
    fn test_first_player_shift() {
        let config = EngineConfig::default();
        let setup = SeriesSetup::new(5, 2, 3, &config).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(FirstPlayer::Human.shift(1, &setup, &mut rng), Ok(1));
        assert_eq!(FirstPlayer::Ai.shift(0, &setup, &mut rng), Ok(2));
        assert_eq!(FirstPlayer::Ai.shift(2, &setup, &mut rng), Ok(4));
        assert!(FirstPlayer::Ai.shift(3, &setup, &mut rng).is_err());
        for _ in 0..20 {
            let shift = FirstPlayer::Random.shift(0, &setup, &mut rng).unwrap();
            assert!(shift < 5);
        }
    }

    #[test]
    fn test_available_categories() {
        assert_eq!(
            FirstPlayer::available(0, 2),
            vec![FirstPlayer::Ai, FirstPlayer::Random]
        );
        assert_eq!(
            FirstPlayer::available(2, 0),
            vec![FirstPlayer::Human, FirstPlayer::Random]
        );
    }

    #[test]
    fn test_build_roster_seats_humans_first() {
        let config = EngineConfig::default();
        let setup = SeriesSetup::new(4, 1, 2, &config).unwrap();
        let mut pool = PiecePool::new(config.palette());
        let mut rng = StdRng::seed_from_u64(11);
        let roster = build_roster(&setup, &[Piece::new('O')], &mut pool, &mut rng).unwrap();

        let kinds: Vec<PlayerKind> = roster.seating().iter().map(|p| *p.kind()).collect();
        assert_eq!(kinds, vec![PlayerKind::Human, PlayerKind::Ai, PlayerKind::Ai]);
        assert_eq!(*roster.seating()[0].piece(), Piece::new('O'));
        assert_eq!(roster.seating()[2].name(), "AI 1");
        assert_eq!(pool.available().len(), 13);
        assert!(roster.by_piece(Piece::new('O')).is_some());
    }
}
