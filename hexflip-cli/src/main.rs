//! HEXFLIP CLI - Command-line interface
//!
//! Commands:
//! - play: Play an interactive game against a human or the computer
//! - match: Run a computer-vs-computer series between two difficulties

mod match_cmd;
mod play;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use match_cmd::MatchArgs;
use play::PlayArgs;

#[derive(Parser)]
#[command(name = "hexflip")]
#[command(about = "HEXFLIP hexagonal Reversi")]
struct Cli {
    /// Random seed for reproducible computer play
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play(PlayArgs),
    /// Play computer-vs-computer games
    Match(MatchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}

/// Logs go to stderr so board output and JSON reports stay clean
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
