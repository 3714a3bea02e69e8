//! Game loop: series setup, the move loop and series bookkeeping.

use crate::config::EngineConfig;
use crate::console::{Console, Prompter, join_or};
use crate::error::EngineError;
use crate::games::grid::{
    BoardState, FirstPlayer, MatchResult, Piece, PiecePool, Player, SeriesSetup, SeriesStatus,
    TurnScheduler, ai_count_bounds, build_roster, rules, strategy,
};
use anyhow::{Context, Result};
use derive_getters::Getters;
use rand::Rng;
use tracing::{debug, info, instrument};

/// Outcome of one finished series.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SeriesReport {
    /// Players who reached the win threshold, in seating order.
    winners: Vec<Player>,
    /// Matches played, ties included.
    matches_played: usize,
}

/// Drives series after series until the operator stops.
#[derive(Debug)]
pub struct GameLoop<P, R> {
    config: EngineConfig,
    console: Console<P>,
    rng: R,
}

impl<P: Prompter, R: Rng> GameLoop<P, R> {
    /// Creates a game loop. The config must already be validated.
    pub fn new(config: EngineConfig, io: P, rng: R) -> Self {
        let console = Console::new(io, config.messages().clone());
        Self {
            config,
            console,
            rng,
        }
    }

    /// Consumes the loop, returning the prompter.
    pub fn into_prompter(self) -> P {
        self.console.into_inner()
    }

    /// Plays series until the operator declines another one.
    ///
    /// # Errors
    ///
    /// Fails on terminal I/O errors, closed input, or an engine error that
    /// validated input should have made impossible.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<Vec<SeriesReport>> {
        info!("Game loop started");
        self.console.clear()?;
        let welcome = self.config.messages().welcome().clone();
        self.console.prompt(&welcome)?;

        let mut reports = Vec::new();
        loop {
            let (mut board, mut scheduler) = self.setup_series()?;
            let report = self.play_series(&mut board, &mut scheduler)?;
            reports.push(report);

            if !self.console.request_play_again()? {
                break;
            }
            let msg = self.config.messages().new_series().clone();
            self.console.prompt(&msg)?;
        }

        let goodbye = self.config.messages().goodbye().clone();
        self.console.prompt(&goodbye)?;
        info!(series = reports.len(), "Game loop finished");
        Ok(reports)
    }

    /// Runs the setup dialogue and returns the board and a scheduler ready
    /// for match one.
    #[instrument(skip(self))]
    pub fn setup_series(&mut self) -> Result<(BoardState, TurnScheduler)> {
        let messages = self.config.messages().clone();

        let low = (*self.config.min_board_side()).max(*self.config.min_players());
        let high = self.config.max_board_side();
        let msg = format!("{} ({} to {}):", messages.enter_board_size(), low, high);
        let side = self.console.request_int_in_range(&msg, low, high)?;

        let msg = format!(
            "{} {} {} (0 to {}):",
            messages.enter_player_count(),
            messages.human(),
            messages.players(),
            side
        );
        let humans = self.console.request_int_in_range(&msg, 0, side)?;

        let (min_ai, max_ai) = ai_count_bounds(side, humans, *self.config.min_players());
        let ais = if min_ai == max_ai {
            debug!(ais = min_ai, "AI count fixed by bounds");
            min_ai
        } else {
            let msg = format!(
                "{} {} {} ({} to {}):",
                messages.enter_player_count(),
                messages.ai(),
                messages.players(),
                min_ai,
                max_ai
            );
            self.console.request_int_in_range(&msg, min_ai, max_ai)?
        };

        let setup = SeriesSetup::new(side, humans, ais, &self.config)?;

        let mut offered = PiecePool::new(self.config.palette());
        let mut human_pieces: Vec<Piece> = Vec::with_capacity(humans);
        for number in 0..humans {
            let piece = self.console.request_piece(number, &offered)?;
            offered.take(piece)?;
            human_pieces.push(piece);
        }
        let mut pool = PiecePool::new(self.config.palette());
        let roster = build_roster(&setup, &human_pieces, &mut pool, &mut self.rng)?;

        let shift = self.request_first_player(&setup)?;
        let board = BoardState::new(side, &self.config)?;
        info!(side, humans, ais, shift, "Series set up");
        let scheduler = TurnScheduler::new(roster, *self.config.win_threshold(), shift);
        Ok((board, scheduler))
    }

    /// Asks who leads the series and turns the answer into a roster shift.
    #[instrument(skip(self))]
    fn request_first_player(&mut self, setup: &SeriesSetup) -> Result<usize> {
        let messages = self.config.messages().clone();
        let categories = FirstPlayer::available(*setup.humans(), *setup.ais());

        let label = |category: FirstPlayer| match category {
            FirstPlayer::Human => messages.human().clone(),
            FirstPlayer::Ai => messages.ai().clone(),
            FirstPlayer::Random => messages.random().clone(),
        };
        let names: Vec<String> = categories.iter().map(|&c| label(c)).collect();
        let mut options = names.clone();
        options.push(messages.random_abbreviated().clone());

        let msg = format!("{} {}", messages.who_first(), join_or(&names, "or"));
        let answer = self.console.request_choice(&msg, &options)?;
        let category = categories
            .iter()
            .copied()
            .find(|&c| label(c) == answer)
            .unwrap_or(FirstPlayer::Random);

        let number = match category.max_number(setup) {
            Some(0) | None => 0,
            Some(max) => {
                let msg = format!(
                    "{} {} {} (0 to {})",
                    messages.enter_the(),
                    label(category),
                    messages.first_player_number(),
                    max
                );
                self.console.request_int_in_range(&msg, 0, max)?
            }
        };

        Ok(category.shift(number, setup, &mut self.rng)?)
    }

    /// Plays matches until the scheduler reports the series over.
    #[instrument(skip(self, board, scheduler), fields(side = board.side()))]
    pub fn play_series(
        &mut self,
        board: &mut BoardState,
        scheduler: &mut TurnScheduler,
    ) -> Result<SeriesReport> {
        loop {
            let result = self.play_match(board, scheduler)?;
            let mover = *scheduler.current().piece();
            let status = scheduler.finish_match(result);

            // Redraw once the match point is on the score table.
            self.console.show(board, scheduler.roster(), &self.config)?;
            if let Some(finisher) = scheduler.roster().by_piece(mover).cloned() {
                self.console.announce_match(&finisher, result)?;
            }

            match status {
                SeriesStatus::Continue => {
                    let msg = self.config.messages().next_match().clone();
                    self.console.acknowledge(&msg)?;
                }
                SeriesStatus::Over(winners) => {
                    self.console.announce_winners(&winners)?;
                    let report = SeriesReport {
                        winners,
                        matches_played: scheduler.matches_played(),
                    };
                    info!(matches = report.matches_played, "Series finished");
                    return Ok(report);
                }
            }
        }
    }

    /// Plays one match from an empty board to a win or a tie.
    ///
    /// The final position is not drawn here; [`GameLoop::play_series`] draws
    /// it after the result is scored.
    ///
    /// # Errors
    ///
    /// An [`EngineError`] from a placement aborts the run; the move sources
    /// only ever offer empty cells.
    #[instrument(skip(self, board, scheduler), fields(side = board.side()))]
    pub fn play_match(
        &mut self,
        board: &mut BoardState,
        scheduler: &mut TurnScheduler,
    ) -> Result<MatchResult> {
        board.clear();
        loop {
            self.console.show(board, scheduler.roster(), &self.config)?;
            let player = scheduler.current().clone();
            let index = self.next_move(board, &player)?;

            board
                .place(index, *player.piece())
                .with_context(|| format!("{} played an invalid move", player.name()))?;
            let result = rules::outcome(board, *player.piece());
            debug!(index, ?result, player = %player.name(), "Move applied");

            if result.is_terminal() {
                return Ok(result);
            }
            scheduler.advance_turn();
        }
    }

    /// Gets the next move from a human through the console or from the AI.
    fn next_move(&mut self, board: &BoardState, player: &Player) -> Result<usize> {
        if player.is_human() {
            return Ok(self.console.request_human_move(board, player)?);
        }

        self.console.announce_ai_turn(player)?;
        let decision = strategy::choose_move(board, *player.piece(), &mut self.rng)
            .ok_or_else(|| EngineError::invalid_config("AI asked to move on a full board"))?;
        debug!(?decision, player = %player.name(), "AI decided");
        let msg = self.config.messages().press_to_continue().clone();
        self.console.acknowledge(&msg)?;
        Ok(decision.cell())
    }
}
