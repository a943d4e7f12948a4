//! Play command - interactive game on stdin/stdout
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: game_loop()
//! - Level 3: computer_turn(), human_turn()
//! - Level 4: command parsing, stdin reader, thinking delay

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tokio::sync::mpsc;

use hexflip_core::{
    Difficulty, GameError, GameState, HeuristicAI, Hex, MoveOutcome, Player, StrategyConfig,
};

use crate::render::{render_board, render_status, symbol};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Which side(s) the computer plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ComputerSide {
    None,
    Black,
    White,
    Both,
}

impl ComputerSide {
    fn controls(self, player: Player) -> bool {
        match self {
            ComputerSide::None => false,
            ComputerSide::Black => player == Player::Black,
            ComputerSide::White => player == Player::White,
            ComputerSide::Both => true,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    /// Side played by the computer
    #[arg(long, value_enum, default_value = "white")]
    pub computer: ComputerSide,

    /// Computer difficulty (easy, medium, hard)
    #[arg(long, default_value = "medium")]
    pub difficulty: Difficulty,

    /// Thinking delay before each computer move, in milliseconds
    #[arg(long, default_value = "600")]
    pub think_ms: u64,

    /// Strategy JSON file overriding the built-in heuristics
    #[arg(long, value_name = "FILE")]
    pub strategy: Option<PathBuf>,
}

/// A line of user input
#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Place(Hex),
    Moves,
    Reset,
    Quit,
    Help,
    Invalid(String),
}

/// Result of waiting out the computer's thinking delay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Thinking {
    Done,
    Cancelled,
}

const HELP: &str = "Enter a cell as `q,r,s`, `q r s` or `q,r`. \
Other commands: moves, reset, help, quit.";

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = StrategyConfig::load_or_default(args.strategy.as_deref())?;
    let seed = seed.unwrap_or_else(rand::random);
    let ai = config.selector(args.difficulty, seed);

    tracing::info!(
        "Starting game: computer={:?}, difficulty={}, seed={}",
        args.computer,
        args.difficulty,
        seed
    );

    let input = spawn_stdin_reader();
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(game_loop(&args, ai, input, tokio::signal::ctrl_c))?;
    Ok(())
}

// ============================================================================
// LEVEL 2 - GAME LOOP
// ============================================================================

/// Drive one session until quit, end of input, or `cancel` fires.
/// `cancel` is called afresh for every wait. Returns the final game state.
async fn game_loop<C, F>(
    args: &PlayArgs,
    mut ai: HeuristicAI,
    mut input: mpsc::Receiver<String>,
    mut cancel: C,
) -> Result<GameState>
where
    C: FnMut() -> F,
    F: Future,
{
    let mut game = GameState::new();
    let delay = Duration::from_millis(args.think_ms);

    println!("{HELP}");
    print_position(&game);

    loop {
        let computer_to_move = game
            .current_player()
            .map_or(false, |player| args.computer.controls(player));

        if computer_to_move {
            match think(delay, cancel()).await {
                Thinking::Done => {
                    let outcome = computer_turn(&mut game, &mut ai)?;
                    report_move(&outcome);
                    print_position(&game);
                }
                Thinking::Cancelled => {
                    tracing::info!("Computer move cancelled, leaving game");
                    break;
                }
            }
            continue;
        }

        if game.is_finished() && args.computer == ComputerSide::Both {
            break;
        }

        let line = tokio::select! {
            line = input.recv() => line,
            _ = cancel() => {
                tracing::info!("Interrupted, leaving game");
                None
            }
        };
        let Some(line) = line else {
            break;
        };

        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Reset => {
                game.reset();
                print_position(&game);
            }
            Command::Moves => print_moves(&game),
            Command::Place(hex) => {
                if human_turn(&mut game, hex)? {
                    print_position(&game);
                }
            }
            Command::Invalid(msg) => println!("{msg}"),
        }
    }

    Ok(game)
}

// ============================================================================
// LEVEL 3 - TURNS
// ============================================================================

fn computer_turn(game: &mut GameState, ai: &mut HeuristicAI) -> Result<MoveOutcome> {
    let hex = game.request_computer_move(ai)?;
    let outcome = game.attempt_move(hex)?;
    Ok(outcome)
}

/// Apply a human placement; returns whether the board changed
fn human_turn(game: &mut GameState, hex: Hex) -> Result<bool> {
    match game.attempt_move(hex) {
        Ok(outcome) => {
            report_move(&outcome);
            Ok(true)
        }
        Err(err @ (GameError::IllegalMove { .. } | GameError::GameOver)) => {
            println!("{err}");
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Read stdin lines on a plain thread so a pending read never holds up
/// runtime shutdown. The channel closes at end of input.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    tracing::warn!("Failed to read stdin: {}", err);
                    break;
                }
            };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Wait out the thinking delay unless `cancel` fires first.
/// The board is untouched either way.
async fn think<F: Future>(delay: Duration, cancel: F) -> Thinking {
    tokio::select! {
        _ = tokio::time::sleep(delay) => Thinking::Done,
        _ = cancel => Thinking::Cancelled,
    }
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => Command::Quit,
        "reset" | "new" => Command::Reset,
        "moves" | "m" => Command::Moves,
        "help" | "?" | "" => Command::Help,
        _ => match trimmed.parse::<Hex>() {
            Ok(hex) => Command::Place(hex),
            Err(err) => Command::Invalid(err.to_string()),
        },
    }
}

fn print_position(game: &GameState) {
    println!();
    print!("{}", render_board(game.board(), &game.legal_moves()));
    println!("{}", render_status(game));
}

fn print_moves(game: &GameState) {
    let moves: Vec<String> = game.legal_moves().iter().map(Hex::to_string).collect();
    if moves.is_empty() {
        println!("No legal moves");
    } else {
        println!("Legal moves: {}", moves.join(" "));
    }
}

fn report_move(outcome: &MoveOutcome) {
    println!(
        "{} ({}) plays {}, flipping {}",
        outcome.player,
        symbol(outcome.player),
        outcome.hex,
        outcome.flipped.len()
    );
    if let Some(skipped) = outcome.passed {
        println!("{skipped} has no legal move and passes");
    }
}

// ============================================================================
// TESTS
// ============================================================================
