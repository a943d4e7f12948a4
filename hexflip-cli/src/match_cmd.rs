//! Match command - computer-vs-computer series between two difficulties
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: seeding, formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use hexflip_core::{Difficulty, GameResult, GameState, HeuristicAI, Player, Score, StrategyConfig};

use crate::render::describe_result;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Difficulty of the black player (moves first)
    #[arg(long, default_value = "hard")]
    pub black: Difficulty,

    /// Difficulty of the white player
    #[arg(long, default_value = "medium")]
    pub white: Difficulty,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Play games in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Strategy JSON file overriding the built-in heuristics
    #[arg(long, value_name = "FILE")]
    pub strategy: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    score: Score,
    moves: usize,
    passes: usize,
}

/// Aggregated match results
#[derive(Clone, Debug, Serialize)]
struct MatchResults {
    black: Difficulty,
    white: Difficulty,
    games: Vec<GameRecord>,
    black_wins: usize,
    white_wins: usize,
    draws: usize,
    /// Mean of black minus white final piece count
    avg_margin: f32,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Load strategies
/// 2. Play the match (multiple games)
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let config = StrategyConfig::load_or_default(args.strategy.as_deref())?;
    let base_seed = seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Starting match: {} (black) vs {} (white), {} games, seed={}",
        args.black,
        args.white,
        args.games,
        base_seed
    );

    let results = play_match(&config, &args, base_seed)?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(config: &StrategyConfig, args: &MatchArgs, base_seed: u64) -> Result<MatchResults> {
    let games = if args.parallel {
        (1..=args.games)
            .into_par_iter()
            .map(|n| play_single_game(config, args.black, args.white, n, base_seed))
            .collect::<Result<Vec<_>>>()?
    } else {
        let progress = create_progress_bar(args.games, args.json);
        let mut games = Vec::with_capacity(args.games);
        for n in 1..=args.games {
            let record = play_single_game(config, args.black, args.white, n, base_seed)?;
            tracing::debug!(
                "Game {}: {:?} ({}-{})",
                record.game_number,
                record.result,
                record.score.black,
                record.score.white
            );
            games.push(record);
            progress.inc(1);
        }
        progress.finish_and_clear();
        games
    };

    Ok(compute_match_statistics(args.black, args.white, games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game to completion
fn play_single_game(
    config: &StrategyConfig,
    black: Difficulty,
    white: Difficulty,
    game_number: usize,
    base_seed: u64,
) -> Result<GameRecord> {
    let mut rng = game_rng(base_seed, game_number);
    let mut black_ai = config.selector(black, rng.gen());
    let mut white_ai = config.selector(white, rng.gen());
    let mut game = GameState::new();

    while let Some(player) = game.current_player() {
        let ai: &mut HeuristicAI = match player {
            Player::Black => &mut black_ai,
            Player::White => &mut white_ai,
        };
        game.play_computer_move(ai)?;
    }

    Ok(GameRecord {
        game_number,
        result: game.result().unwrap_or(GameResult::Draw),
        score: game.score(),
        moves: game.moves_played(),
        passes: game.history().iter().filter(|m| m.passed.is_some()).count(),
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(
    black: Difficulty,
    white: Difficulty,
    games: Vec<GameRecord>,
) -> MatchResults {
    let count_result = |result: GameResult| games.iter().filter(|g| g.result == result).count();
    let black_wins = count_result(GameResult::BlackWins);
    let white_wins = count_result(GameResult::WhiteWins);
    let draws = count_result(GameResult::Draw);

    let (avg_margin, avg_moves) = if games.is_empty() {
        (0.0, 0.0)
    } else {
        let n = games.len() as f32;
        let margin: i64 = games
            .iter()
            .map(|g| g.score.black as i64 - g.score.white as i64)
            .sum();
        let moves: usize = games.iter().map(|g| g.moves).sum();
        (margin as f32 / n, moves as f32 / n)
    };

    MatchResults {
        black,
        white,
        games,
        black_wins,
        white_wins,
        draws,
        avg_margin,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Per-game rng so sequential and parallel runs agree
fn game_rng(base_seed: u64, game_number: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(game_number as u64))
}

fn create_progress_bar(games: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new(games as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} games") {
        progress.set_style(style);
    }
    progress
}

fn percent(part: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        part as f32 / total as f32 * 100.0
    }
}

fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Black ({}) vs White ({})", results.black, results.white);
    println!("Games:       {}", total);
    println!(
        "Black wins:  {} ({:.1}%)",
        results.black_wins,
        percent(results.black_wins, total)
    );
    println!(
        "White wins:  {} ({:.1}%)",
        results.white_wins,
        percent(results.white_wins, total)
    );
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Avg margin:  {:+.1}", results.avg_margin);
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} ({}-{}, {} moves, {} passes)",
            game.game_number,
            describe_result(game.result),
            game.score.black,
            game.score.white,
            game.moves,
            game.passes
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
