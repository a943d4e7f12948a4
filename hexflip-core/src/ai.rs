//! Scripted opponent: single-ply heuristic move selection

use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::Hex;
use crate::eval::{evaluate_move, Heuristics};
use crate::position::{Board, Player};

/// Default seed, matching `HeuristicAI::new`
const DEFAULT_SEED: u64 = 42;

// ============================================================================
// DIFFICULTY
// ============================================================================

/// Strength tiers of the scripted opponent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Built-in policy for this tier
    pub fn heuristics(self) -> Heuristics {
        match self {
            // Mostly greedy with plenty of noise
            Difficulty::Easy => Heuristics {
                capture_weight: 1.0,
                position_weight: 0.25,
                mobility_weight: 0.0,
                noise: 4.0,
            },
            Difficulty::Medium => Heuristics::default(),
            // Only tier with look-ahead; noise-free
            Difficulty::Hard => Heuristics {
                capture_weight: 2.0,
                position_weight: 1.5,
                mobility_weight: 3.0,
                noise: 0.0,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Medium => f.write_str("medium"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other} (expected easy, medium or hard)")),
        }
    }
}

// ============================================================================
// MOVE SELECTION
// ============================================================================

/// Strategy seam for computer players
pub trait MoveSelector {
    /// Pick one of `legal` for `player`, or `None` when `legal` is empty
    fn select_move(&mut self, board: &Board, player: Player, legal: &[Hex]) -> Option<Hex>;
}

/// Always plays the first candidate
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl MoveSelector for FirstLegal {
    fn select_move(&mut self, _board: &Board, _player: Player, legal: &[Hex]) -> Option<Hex> {
        legal.first().copied()
    }
}

/// Highest-scoring candidate; ties go to the earliest in `legal`
pub fn best_move(
    board: &Board,
    player: Player,
    legal: &[Hex],
    heuristics: &Heuristics,
    rng: &mut ChaCha8Rng,
) -> Option<Hex> {
    let mut best: Option<(Hex, f32)> = None;

    for &hex in legal {
        let score = evaluate_move(board, hex, player, heuristics, rng);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((hex, score)),
        }
    }

    best.map(|(hex, _)| hex)
}

/// Heuristic computer player
pub struct HeuristicAI {
    pub heuristics: Heuristics,
    rng: ChaCha8Rng,
}

impl HeuristicAI {
    pub fn new(heuristics: Heuristics) -> Self {
        Self::with_seed(heuristics, DEFAULT_SEED)
    }

    pub fn with_seed(heuristics: Heuristics, seed: u64) -> Self {
        Self {
            heuristics,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn for_difficulty(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_seed(difficulty.heuristics(), seed)
    }

    /// Score one candidate (consumes randomness on noisy tiers)
    pub fn score_move(&mut self, board: &Board, hex: Hex, player: Player) -> f32 {
        evaluate_move(board, hex, player, &self.heuristics, &mut self.rng)
    }
}

impl MoveSelector for HeuristicAI {
    fn select_move(&mut self, board: &Board, player: Player, legal: &[Hex]) -> Option<Hex> {
        best_move(board, player, legal, &self.heuristics, &mut self.rng)
    }
}

// ============================================================================
// TESTS
// ============================================================================
