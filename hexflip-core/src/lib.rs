//! HEXFLIP Core - Game engine and AI
//!
//! This crate provides the core game logic for HEXFLIP, a Reversi-style game
//! on a hexagonal board:
//! - Board geometry (hex grid with cube coordinates)
//! - Board model (sparse disc occupancy)
//! - Capture computation and legal move generation
//! - Turn progression with automatic passes and game-end detection
//! - Single-ply heuristic AI keyed by difficulty

pub mod board;
pub mod position;
pub mod rules;
pub mod game;
pub mod eval;
pub mod ai;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Hex, DIRECTIONS, BOARD_RADIUS};
pub use position::{Board, Player, Score};
pub use rules::{capture_chain, flips_for, legal_moves};
pub use game::{GameState, GameResult, MoveOutcome, Status, EndReason, FIRST_PLAYER};
pub use eval::{Heuristics, evaluate_move, positional_value};
pub use ai::{Difficulty, HeuristicAI, MoveSelector, FirstLegal};
pub use config::StrategyConfig;
pub use error::{GameError, HexError};
