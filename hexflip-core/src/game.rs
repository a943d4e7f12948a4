//! Game state and turn progression

use serde::{Deserialize, Serialize};

use crate::ai::MoveSelector;
use crate::board::Hex;
use crate::error::{GameError, NoLegalMoves};
use crate::position::{Board, Player, Score};
use crate::rules;

/// Black always opens
pub const FIRST_PLAYER: Player = Player::Black;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Final outcome of a finished game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    BlackWins,
    WhiteWins,
    Draw,
}

impl GameResult {
    /// Strictly greater piece count wins
    pub fn from_score(score: Score) -> Self {
        match score.leader() {
            Some(Player::Black) => GameResult::BlackWins,
            Some(Player::White) => GameResult::WhiteWins,
            None => GameResult::Draw,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::BlackWins => Some(Player::Black),
            GameResult::WhiteWins => Some(Player::White),
            GameResult::Draw => None,
        }
    }
}

/// Why a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Neither side has a legal placement
    BothBlocked,
}

/// Turn state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    AwaitingMove(Player),
    Finished { reason: EndReason, result: GameResult },
}

/// Record of one applied placement
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub player: Player,
    pub hex: Hex,
    pub flipped: Vec<Hex>,
    /// Side skipped because it had no legal reply
    pub passed: Option<Player>,
    pub score: Score,
    pub status: Status,
}

// ============================================================================
// TURN RESOLUTION
// ============================================================================

fn require_moves(board: &Board, player: Player) -> Result<Player, NoLegalMoves> {
    if rules::has_legal_move(board, player) {
        Ok(player)
    } else {
        Err(NoLegalMoves(player))
    }
}

/// Decide who moves next on `board` when it is nominally `to_move`'s turn.
///
/// A blocked side is skipped in favour of its opponent; when both sides are
/// blocked the game ends on piece count.
pub fn resolve_turn(board: &Board, to_move: Player) -> Status {
    let next = require_moves(board, to_move).or_else(|blocked| {
        tracing::debug!("{}, passing", blocked);
        require_moves(board, blocked.0.opponent())
    });

    match next {
        Ok(player) => Status::AwaitingMove(player),
        Err(_) => Status::Finished {
            reason: EndReason::BothBlocked,
            result: GameResult::from_score(board.score()),
        },
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Authoritative game state, mutated only through its commands
#[derive(Clone, Debug, Serialize)]
pub struct GameState {
    board: Board,
    status: Status,
    score: Score,
    history: Vec<MoveOutcome>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// New game from the opening position
    pub fn new() -> Self {
        Self::from_board(Board::initial(), FIRST_PLAYER)
    }

    /// Start from an arbitrary position with `to_move` nominally on turn
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let status = resolve_turn(&board, to_move);
        let score = board.score();
        Self {
            board,
            status,
            score,
            history: Vec::new(),
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Player to move, `None` once the game is over
    pub fn current_player(&self) -> Option<Player> {
        match self.status {
            Status::AwaitingMove(player) => Some(player),
            Status::Finished { .. } => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, Status::Finished { .. })
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.status {
            Status::Finished { result, .. } => Some(result),
            Status::AwaitingMove(_) => None,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        self.result().and_then(GameResult::winner)
    }

    /// Legal placements for the player to move
    pub fn legal_moves(&self) -> Vec<Hex> {
        match self.status {
            Status::AwaitingMove(player) => rules::legal_moves(&self.board, player),
            Status::Finished { .. } => Vec::new(),
        }
    }

    pub fn history(&self) -> &[MoveOutcome] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveOutcome> {
        self.history.last()
    }

    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    // ========================================================================
    // COMMANDS
    // ========================================================================

    /// Place a disc for the player to move.
    ///
    /// On error the state is unchanged.
    pub fn attempt_move(&mut self, hex: Hex) -> Result<MoveOutcome, GameError> {
        let player = self.current_player().ok_or(GameError::GameOver)?;

        let flipped = rules::flips_for(&self.board, hex, player);
        if flipped.is_empty() {
            return Err(GameError::IllegalMove { hex, player });
        }

        let board = self.board.with_placement(hex, player, &flipped)?;
        let score = board.score();
        let status = resolve_turn(&board, player.opponent());
        let passed = match status {
            Status::AwaitingMove(next) if next == player => Some(player.opponent()),
            _ => None,
        };

        self.board = board;
        self.score = score;
        self.status = status;

        let outcome = MoveOutcome {
            player,
            hex,
            flipped,
            passed,
            score,
            status,
        };
        self.history.push(outcome.clone());

        tracing::debug!(
            "{} played {} flipping {} (black {}, white {})",
            player,
            hex,
            outcome.flipped.len(),
            score.black,
            score.white
        );
        if let Some(skipped) = passed {
            tracing::debug!("{} has no reply, turn passes back to {}", skipped, player);
        }
        if let Some(result) = self.result() {
            tracing::info!(
                "Game over after {} moves: {:?} ({}-{})",
                self.history.len(),
                result,
                score.black,
                score.white
            );
        }

        Ok(outcome)
    }

    /// Ask `selector` for a move for the player to move without applying it
    pub fn request_computer_move<S: MoveSelector + ?Sized>(
        &self,
        selector: &mut S,
    ) -> Result<Hex, GameError> {
        let player = self.current_player().ok_or(GameError::GameOver)?;
        let legal = self.legal_moves();
        selector
            .select_move(&self.board, player, &legal)
            .ok_or(GameError::NoMoveSelected)
    }

    /// Select a move with `selector` and apply it through `attempt_move`
    pub fn play_computer_move<S: MoveSelector + ?Sized>(
        &mut self,
        selector: &mut S,
    ) -> Result<MoveOutcome, GameError> {
        let hex = self.request_computer_move(selector)?;
        self.attempt_move(hex)
    }

    /// Discard everything and return to the opening position
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

// ============================================================================
// TESTS
// ============================================================================
