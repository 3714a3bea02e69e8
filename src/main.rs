//! Strictly Grid - terminal entry point
//!
//! Plays N x N tic-tac-toe series on stdin/stdout, logging to a file.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use strictly_grid::{ConsoleError, EngineConfig, GameLoop, LinePrompter};
use tracing::{info, instrument, warn};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command() {
        Command::Play(args) => run_play(args),
        Command::Config { config } => print_config(config.as_deref()),
    }
}

/// Play series in the terminal until the operator stops
fn run_play(args: PlayArgs) -> Result<()> {
    initialize_tracing(&args.log_file)?;
    info!("Starting Strictly Grid");

    let mut config = load_config(args.config.as_deref())?;
    if let Some(threshold) = args.win_threshold {
        info!(threshold, "Overriding win threshold");
        config = config.with_win_threshold(threshold)?;
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let io = LinePrompter::stdio().with_clear(!args.no_clear);
    let mut game = GameLoop::new(config, io, rng);

    match game.run() {
        Ok(reports) => {
            info!(series = reports.len(), "Exiting");
            Ok(())
        }
        Err(e) if matches!(e.downcast_ref::<ConsoleError>(), Some(ConsoleError::InputClosed)) => {
            warn!("Input closed, exiting");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Print the effective configuration as TOML
fn print_config(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    println!("{}", config.to_toml_string()?);
    Ok(())
}

#[instrument]
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            info!("No config file given, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

/// Send logs to a file so they never mix with the game on the terminal
fn initialize_tracing(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}
