//! Error types for the rules engine

use crate::board::Hex;
use crate::position::Player;

/// Errors returned by game commands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("illegal move at {hex} for {player}")]
    IllegalMove { hex: Hex, player: Player },

    #[error("game is already over")]
    GameOver,

    #[error("coordinate {0} is outside the board")]
    OutOfBounds(Hex),

    #[error("move selector returned no move although legal moves exist")]
    NoMoveSelected,
}

/// Coordinate parsing and validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("cube coordinate ({q},{r},{s}) does not sum to zero")]
    NotZeroSum { q: i8, r: i8, s: i8 },

    #[error("cannot parse coordinate: {0:?}")]
    Parse(String),
}

/// Raised inside the turn controller when a side has nothing to play.
/// Resolved into a pass or the end of the game; never returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} has no legal moves")]
pub(crate) struct NoLegalMoves(pub Player);
