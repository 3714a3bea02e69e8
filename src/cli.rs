//! Command-line interface for strictly_grid.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Grid - N x N tic-tac-toe for humans and AI players
#[derive(Parser, Debug)]
#[command(name = "strictly_grid")]
#[command(about = "N x N tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play series of matches in the terminal
    Play(PlayArgs),

    /// Print the effective configuration as TOML
    Config {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Options for `play`.
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the number of match wins needed to take a series
    #[arg(short, long)]
    pub win_threshold: Option<u32>,

    /// Seed for the AI and random first-player choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// File that receives log output
    #[arg(long, default_value = "strictly_grid.log")]
    pub log_file: PathBuf,

    /// Keep previous output instead of clearing the screen
    #[arg(long)]
    pub no_clear: bool,
}

impl Cli {
    /// The command to run, `play` with defaults when none was given.
    pub fn command(self) -> Command {
        self.command.unwrap_or_else(|| {
            Command::Play(PlayArgs {
                log_file: PathBuf::from("strictly_grid.log"),
                ..PlayArgs::default()
            })
        })
    }
}
