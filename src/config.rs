//! Engine configuration: numeric limits, the piece palette and the message table.
//!
//! Loaded once at process start and passed by reference into the engine;
//! nothing mutates it afterwards.

use crate::games::grid::Piece;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Largest palette the renderer and input layer support.
pub const MAX_PALETTE_SIZE: usize = 16;

/// Immutable engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Width of dividers printed between screens.
    #[serde(default = "default_screen_width")]
    screen_width: usize,

    /// Match wins needed to take a series.
    #[serde(default = "default_win_threshold")]
    win_threshold: u32,

    /// Smallest board side that can be chosen.
    #[serde(default = "default_min_board_side")]
    min_board_side: usize,

    /// Fewest players in a series.
    #[serde(default = "default_min_players")]
    min_players: usize,

    /// Rendered width of one cell.
    #[serde(default = "default_square_width")]
    square_width: usize,

    /// Distinct piece symbols players draw from.
    #[serde(default = "default_palette")]
    palette: Vec<Piece>,

    /// Prompt and announcement strings.
    #[serde(default)]
    messages: Messages,
}

#[instrument]
fn default_screen_width() -> usize {
    80
}

#[instrument]
fn default_win_threshold() -> u32 {
    5
}

#[instrument]
fn default_min_board_side() -> usize {
    2
}

#[instrument]
fn default_min_players() -> usize {
    2
}

#[instrument]
fn default_square_width() -> usize {
    5
}

#[instrument]
fn default_palette() -> Vec<Piece> {
    "XO~!@#$%^&*-+=:?".chars().map(Piece::new).collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            win_threshold: default_win_threshold(),
            min_board_side: default_min_board_side(),
            min_players: default_min_players(),
            square_width: default_square_width(),
            palette: default_palette(),
            messages: Messages::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(
            palette = config.palette.len(),
            win_threshold = config.win_threshold,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Serializes the configuration back to TOML.
    #[instrument(skip(self))]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Returns a copy with a different series win threshold.
    #[instrument(skip(self))]
    pub fn with_win_threshold(mut self, win_threshold: u32) -> Result<Self, ConfigError> {
        self.win_threshold = win_threshold;
        self.validate()?;
        Ok(self)
    }

    /// Largest board side: one distinct piece per possible player.
    pub fn max_board_side(&self) -> usize {
        self.palette.len()
    }

    /// Checks the limits are mutually consistent.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() || self.palette.len() > MAX_PALETTE_SIZE {
            return Err(ConfigError::new(format!(
                "Palette must hold between 1 and {} pieces, found {}",
                MAX_PALETTE_SIZE,
                self.palette.len()
            )));
        }
        let distinct: HashSet<Piece> = self.palette.iter().copied().collect();
        if distinct.len() != self.palette.len() {
            return Err(ConfigError::new("Palette pieces must be distinct".to_string()));
        }
        if let Some(blank) = self.palette.iter().find(|p| p.symbol().is_whitespace()) {
            return Err(ConfigError::new(format!(
                "Palette piece {:?} is blank",
                blank.symbol()
            )));
        }
        if self.min_board_side < 2 {
            return Err(ConfigError::new("Minimum board side must be at least 2".to_string()));
        }
        if self.palette.len() < self.min_board_side {
            return Err(ConfigError::new(format!(
                "Palette of {} pieces cannot fill a board of side {}",
                self.palette.len(),
                self.min_board_side
            )));
        }
        if self.min_players < 2 || self.min_players > self.palette.len() {
            return Err(ConfigError::new(format!(
                "Minimum players must be between 2 and {}",
                self.palette.len()
            )));
        }
        if self.win_threshold == 0 {
            return Err(ConfigError::new("Win threshold must be at least 1".to_string()));
        }
        if self.square_width < 3 {
            return Err(ConfigError::new("Square width must be at least 3".to_string()));
        }
        Ok(())
    }
}

/// Every string the console prints.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    welcome: String,
    enter_board_size: String,
    human: String,
    ai: String,
    random: String,
    random_abbreviated: String,
    enter_player_count: String,
    players: String,
    player: String,
    who_first: String,
    enter_the: String,
    first_player_number: String,
    piece_choice: String,
    choose_column: String,
    choose_row: String,
    cell_occupied: String,
    invalid_choice: String,
    ai_turn: String,
    score: String,
    won_match: String,
    tie: String,
    won_series: String,
    press_to_continue: String,
    next_match: String,
    play_again: String,
    new_series: String,
    goodbye: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            welcome: "Welcome to N x N Tic Tac Toe!".to_string(),
            enter_board_size: "Enter the board size".to_string(),
            human: "human".to_string(),
            ai: "AI".to_string(),
            random: "random".to_string(),
            random_abbreviated: "r".to_string(),
            enter_player_count: "Enter the number of".to_string(),
            players: "players".to_string(),
            player: "player".to_string(),
            who_first: "Who goes first?".to_string(),
            enter_the: "Enter the".to_string(),
            first_player_number: "player number to go first:".to_string(),
            piece_choice: "choose your piece:".to_string(),
            choose_column: "choose a column:".to_string(),
            choose_row: "choose a row:".to_string(),
            cell_occupied: "That square is taken, choose again.".to_string(),
            invalid_choice: "Sorry, that's not a valid choice.".to_string(),
            ai_turn: "is moving...".to_string(),
            score: "score".to_string(),
            won_match: "won the match!".to_string(),
            tie: "It's a tie!".to_string(),
            won_series: "won the series!".to_string(),
            press_to_continue: "Enter anything to continue...".to_string(),
            next_match: "Enter anything to start the next match...".to_string(),
            play_again: "Would you like to play another series? (y/n)".to_string(),
            new_series: "Let's play again!".to_string(),
            goodbye: "Thanks for playing! Goodbye!".to_string(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
