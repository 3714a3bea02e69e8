//! Terminal collaborators: validated prompts, rendering and announcements.
//!
//! Every request loops until the answer is valid, so the engine only ever
//! sees in-range values.

mod input;
mod render;

pub use input::{ConsoleError, LinePrompter, Prompter};
pub use render::{join_or, kind_label, player_label, render_board, render_scores};

use crate::config::{EngineConfig, Messages};
use crate::games::grid::{BoardState, Coord, MatchResult, Piece, PiecePool, Player, PlayerRoster};
use tracing::{debug, instrument};

/// Validated prompts and rendering over a [`Prompter`].
#[derive(Debug)]
pub struct Console<P> {
    io: P,
    messages: Messages,
}

impl<P: Prompter> Console<P> {
    /// Creates a console printing strings from `messages`.
    pub fn new(io: P, messages: Messages) -> Self {
        Self { io, messages }
    }

    /// Consumes the console, returning the prompter.
    pub fn into_inner(self) -> P {
        self.io
    }

    /// The message table.
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Prints `=> msg`.
    pub fn prompt(&mut self, msg: &str) -> Result<(), ConsoleError> {
        self.io.say(&format!("=> {}", msg))
    }

    /// Prints text as is.
    pub fn say(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.io.say(text)
    }

    fn invalid(&mut self) -> Result<(), ConsoleError> {
        let msg = self.messages.invalid_choice().clone();
        self.prompt(&msg)
    }

    /// Parses a canonical non-negative integer: no sign, no padding, no leading zeros.
    fn parse_exact(input: &str) -> Option<usize> {
        input
            .parse::<usize>()
            .ok()
            .filter(|n| n.to_string() == input)
    }

    /// Asks for an integer in `low..=high`.
    #[instrument(skip(self))]
    pub fn request_int_in_range(
        &mut self,
        msg: &str,
        low: usize,
        high: usize,
    ) -> Result<usize, ConsoleError> {
        self.prompt(msg)?;
        loop {
            let input = self.io.read_line()?;
            match Self::parse_exact(&input) {
                Some(n) if (low..=high).contains(&n) => return Ok(n),
                _ => self.invalid()?,
            }
        }
    }

    /// Asks for an integer that appears in `list`.
    #[instrument(skip(self))]
    pub fn request_int_from_list(
        &mut self,
        msg: &str,
        list: &[usize],
    ) -> Result<usize, ConsoleError> {
        self.prompt(msg)?;
        loop {
            let input = self.io.read_line()?;
            match Self::parse_exact(&input) {
                Some(n) if list.contains(&n) => return Ok(n),
                _ => self.invalid()?,
            }
        }
    }

    /// Asks for one of `options`, case-insensitively. Returns the option as listed.
    #[instrument(skip(self))]
    pub fn request_choice(
        &mut self,
        msg: &str,
        options: &[String],
    ) -> Result<String, ConsoleError> {
        self.prompt(msg)?;
        loop {
            let input = self.io.read_line()?.to_lowercase();
            if let Some(found) = options.iter().find(|o| o.to_lowercase() == input) {
                return Ok(found.clone());
            }
            self.invalid()?;
        }
    }

    /// Asks human `number` to pick a piece from the pool.
    #[instrument(skip(self, pool))]
    pub fn request_piece(
        &mut self,
        number: usize,
        pool: &PiecePool,
    ) -> Result<Piece, ConsoleError> {
        let msg = format!(
            "{} {} {} {}",
            self.messages.human(),
            number,
            self.messages.piece_choice(),
            join_or(pool.available(), "or")
        );
        loop {
            self.prompt(&msg)?;
            let input = self.io.read_line()?;
            let mut chars = input.chars();
            if let (Some(symbol), None) = (chars.next(), chars.next())
                && let Some(piece) = pool.find(symbol)
            {
                return Ok(piece);
            }
            self.invalid()?;
        }
    }

    /// Waits for any non-empty line.
    #[instrument(skip(self))]
    pub fn acknowledge(&mut self, msg: &str) -> Result<(), ConsoleError> {
        loop {
            self.prompt(msg)?;
            if !self.io.read_line()?.is_empty() {
                return Ok(());
            }
        }
    }

    /// Asks whether to play another series (`y`/`n`).
    #[instrument(skip(self))]
    pub fn request_play_again(&mut self) -> Result<bool, ConsoleError> {
        loop {
            let msg = self.messages.play_again().clone();
            self.prompt(&msg)?;
            match self.io.read_line()?.to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => {}
            }
        }
    }

    /// Asks a human for a move: a column, then a row, each from those with an
    /// empty cell. Repeats while the chosen cell is taken. Returns the linear index.
    #[instrument(skip(self, board, player), fields(player = %player.name()))]
    pub fn request_human_move(
        &mut self,
        board: &BoardState,
        player: &Player,
    ) -> Result<usize, ConsoleError> {
        loop {
            let cols = board.open_cols();
            let msg = format!(
                "{} {} {} {}",
                self.messages.human(),
                player.number(),
                self.messages.choose_column(),
                join_or(&cols, "or")
            );
            let col = self.request_int_from_list(&msg, &cols)?;

            let rows = board.open_rows();
            let msg = format!(
                "{} {} {} {}",
                self.messages.human(),
                player.number(),
                self.messages.choose_row(),
                join_or(&rows, "or")
            );
            let row = self.request_int_from_list(&msg, &rows)?;

            let index = Coord::new(row, col).to_index(board.side());
            if board.is_empty(index) {
                debug!(row, col, index, "Human move accepted");
                return Ok(index);
            }
            let msg = self.messages.cell_occupied().clone();
            self.prompt(&msg)?;
        }
    }

    /// Clears the screen and draws the board and score table.
    pub fn show(
        &mut self,
        board: &BoardState,
        roster: &PlayerRoster,
        config: &EngineConfig,
    ) -> Result<(), ConsoleError> {
        self.io.clear_screen()?;
        self.io.say(&render_board(board, config))?;
        self.io.say(&render_scores(roster, config))
    }

    /// Clears the screen.
    pub fn clear(&mut self) -> Result<(), ConsoleError> {
        self.io.clear_screen()
    }

    /// Announces an AI's turn.
    pub fn announce_ai_turn(&mut self, player: &Player) -> Result<(), ConsoleError> {
        let msg = format!(
            "{} {} {}",
            self.messages.ai(),
            player.number(),
            self.messages.ai_turn()
        );
        self.prompt(&msg)
    }

    /// Announces a match result. Nothing is printed for `Continue`.
    pub fn announce_match(
        &mut self,
        player: &Player,
        result: MatchResult,
    ) -> Result<(), ConsoleError> {
        let msg = match result {
            MatchResult::Win(_) => format!(
                "{} {}",
                player_label(player, &self.messages),
                self.messages.won_match()
            ),
            MatchResult::Tie => self.messages.tie().clone(),
            MatchResult::Continue => return Ok(()),
        };
        self.prompt(&msg)
    }

    /// Announces every series winner.
    pub fn announce_winners(&mut self, winners: &[Player]) -> Result<(), ConsoleError> {
        for winner in winners {
            let msg = format!(
                "{} {}",
                player_label(winner, &self.messages),
                self.messages.won_series()
            );
            self.prompt(&msg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::grid::PlayerKind;
    use std::io::Cursor;

    fn console(script: &str) -> Console<LinePrompter<Cursor<String>, Vec<u8>>> {
        Console::new(
            LinePrompter::new(Cursor::new(script.to_string()), Vec::new()),
            Messages::default(),
        )
    }

    fn output(console: Console<LinePrompter<Cursor<String>, Vec<u8>>>) -> String {
        String::from_utf8(console.into_inner().into_writer()).unwrap()
    }

    #[test]
    fn test_int_in_range_reprompts() {
        let mut console = console("abc\n07\n9\n 3\n3\n");
        assert_eq!(console.request_int_in_range("size?", 2, 4).unwrap(), 3);
        let text = output(console);
        assert_eq!(text.matches("not a valid choice").count(), 4);
    }

    #[test]
    fn test_choice_is_case_insensitive() {
        let mut console = console("maybe\nAI\n");
        let options = vec!["human".to_string(), "ai".to_string(), "r".to_string()];
        assert_eq!(console.request_choice("who?", &options).unwrap(), "ai");
    }

    #[test]
    fn test_piece_from_pool() {
        let config = EngineConfig::default();
        let mut pool = PiecePool::new(config.palette());
        pool.take(Piece::new('X')).unwrap();
        let mut console = console("x\nXO\no\n");
        assert_eq!(console.request_piece(0, &pool).unwrap(), Piece::new('O'));
    }

    #[test]
    fn test_human_move_retries_occupied_cell() {
        let config = EngineConfig::default();
        let mut board = BoardState::new(2, &config).unwrap();
        board.place(0, Piece::new('O')).unwrap();
        let player = Player::new(0, Piece::new('X'), PlayerKind::Human);
        // column 0 row 0 is taken; then column 1 row 0 is free
        let mut console = console("0\n0\n1\n0\n");
        assert_eq!(console.request_human_move(&board, &player).unwrap(), 1);
        assert!(output(console).contains("That square is taken"));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut console = console("");
        assert!(matches!(
            console.acknowledge("go"),
            Err(ConsoleError::InputClosed)
        ));
    }

    #[test]
    fn test_play_again() {
        let mut console = console("x\n\nY\n");
        assert!(console.request_play_again().unwrap());
    }
}
