//! Checkers CLI - Command-line interface
//!
//! Commands:
//! - play: Hot-seat game on the terminal
//! - board: Print the opening layout

mod board;
mod play;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "checkers")]
#[command(about = "Two-player checkers")]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a hot-seat game
    Play(play::PlayArgs),
    /// Print the opening layout
    Board(board::BoardArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr so the board stays readable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Board(args) => board::run(args),
    }
}
