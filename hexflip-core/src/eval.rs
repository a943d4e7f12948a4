//! Single-ply move evaluation

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Hex, BOARD_RADIUS};
use crate::error::GameError;
use crate::position::{Board, Player};
use crate::rules::{flips_for, mobility};

/// Outermost ring: hardest cells to recapture
pub const OUTER_RING_VALUE: f32 = 10.0;
/// One ring inside the edge
pub const INNER_RING_VALUE: f32 = 5.0;
pub const CENTER_VALUE: f32 = 3.0;
pub const INTERIOR_VALUE: f32 = 1.0;

/// Heuristic weights for move evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Heuristics {
    /// Weight per flipped disc
    pub capture_weight: f32,
    /// Weight for the positional tier of the placed cell
    pub position_weight: f32,
    /// Weight for the opponent's reply count after the placement (subtracted).
    /// Zero disables the look-ahead entirely.
    pub mobility_weight: f32,
    /// Upper bound of uniform noise added to every score
    pub noise: f32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            capture_weight: 2.0,
            position_weight: 1.0,
            mobility_weight: 0.0,
            noise: 1.0,
        }
    }
}

impl Heuristics {
    /// True unless `noise` is a positive finite bound
    pub fn is_deterministic(&self) -> bool {
        !(self.noise.is_finite() && self.noise > 0.0)
    }

    pub fn uses_lookahead(&self) -> bool {
        self.mobility_weight.abs() > f32::EPSILON
    }
}

/// Positional tier of a cell
pub fn positional_value(hex: Hex) -> f32 {
    let dist = hex.distance_to_center();
    if dist == BOARD_RADIUS {
        OUTER_RING_VALUE
    } else if dist + 1 == BOARD_RADIUS {
        INNER_RING_VALUE
    } else if dist == 0 {
        CENTER_VALUE
    } else {
        INTERIOR_VALUE
    }
}

/// Score a candidate placement from `player`'s perspective (higher = better).
///
/// Illegal candidates score negative infinity.
pub fn evaluate_move<R: Rng>(
    board: &Board,
    hex: Hex,
    player: Player,
    heuristics: &Heuristics,
    rng: &mut R,
) -> f32 {
    let flips = flips_for(board, hex, player);
    if flips.is_empty() {
        return f32::NEG_INFINITY;
    }

    let mut score = heuristics.capture_weight * flips.len() as f32
        + heuristics.position_weight * positional_value(hex);

    if heuristics.uses_lookahead() {
        match opponent_replies(board, hex, player, &flips) {
            Ok(replies) => score -= heuristics.mobility_weight * replies as f32,
            Err(err) => {
                tracing::warn!("Discarding candidate {}: {}", hex, err);
                return f32::NEG_INFINITY;
            }
        }
    }

    if !heuristics.is_deterministic() {
        score += rng.gen_range(0.0..heuristics.noise);
    }

    score
}

/// Legal replies left to the opponent once `hex` is played with `flips`
fn opponent_replies(
    board: &Board,
    hex: Hex,
    player: Player,
    flips: &[Hex],
) -> Result<usize, GameError> {
    let next = board.with_placement(hex, player, flips)?;
    Ok(mobility(&next, player.opponent()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn quiet(capture_weight: f32, position_weight: f32, mobility_weight: f32) -> Heuristics {
        Heuristics {
            capture_weight,
            position_weight,
            mobility_weight,
            noise: 0.0,
        }
    }

    #[test]
    fn test_unusable_noise_is_ignored() {
        let board = Board::initial();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let base = evaluate_move(&board, Hex::new(2, 0), Player::Black, &quiet(1.0, 1.0, 0.0), &mut rng);

        for noise in [f32::NAN, f32::INFINITY, -1.0] {
            let h = Heuristics { noise, ..quiet(1.0, 1.0, 0.0) };
            assert!(h.is_deterministic());
            let score = evaluate_move(&board, Hex::new(2, 0), Player::Black, &h, &mut rng);
            assert_eq!(score, base);
        }
    }

    #[test]
    fn test_opponent_replies_reports_bad_placement() {
        let board = Board::initial();
        let flips = flips_for(&board, Hex::new(2, 0), Player::Black);
        assert!(opponent_replies(&board, Hex::new(2, 0), Player::Black, &flips).is_ok());

        let stray = Hex::new(9, 0);
        assert_eq!(
            opponent_replies(&board, Hex::new(2, 0), Player::Black, &[stray]),
            Err(GameError::OutOfBounds(stray))
        );
    }

    #[test]
    fn test_positional_ordering() {
        let outer = positional_value(Hex::new(4, -2));
        let inner = positional_value(Hex::new(3, 0));
        let center = positional_value(Hex::origin());
        let interior = positional_value(Hex::new(1, 1));
        assert!(outer > inner);
        assert!(inner > center);
        assert!(center > interior);
        assert!(interior > 0.0);
    }

    #[test]
    fn test_capture_count_scoring() {
        let board = Board::from_cells([
            (Hex::new(1, 0), Player::White),
            (Hex::new(2, 0), Player::Black),
            (Hex::new(0, 1), Player::White),
            (Hex::new(0, 2), Player::White),
            (Hex::new(0, 3), Player::Black),
        ])
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let h = quiet(1.0, 0.0, 0.0);

        let illegal = evaluate_move(&board, Hex::new(-1, 0), Player::Black, &h, &mut rng);
        let three = evaluate_move(&board, Hex::origin(), Player::Black, &h, &mut rng);
        assert_eq!(illegal, f32::NEG_INFINITY);
        assert_eq!(three, 3.0);
    }

    #[test]
    fn test_lookahead_penalizes_replies() {
        let board = Board::initial();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let hex = Hex::new(2, 0);

        let plain = evaluate_move(&board, hex, Player::Black, &quiet(1.0, 0.0, 0.0), &mut rng);
        let ahead = evaluate_move(&board, hex, Player::Black, &quiet(1.0, 0.0, 1.0), &mut rng);

        let next = board.with_placement(hex, Player::Black, &[Hex::new(1, 0)]).unwrap();
        let replies = mobility(&next, Player::White) as f32;
        assert!(replies > 0.0);
        assert_eq!(ahead, plain - replies);
    }

    #[test]
    fn test_noise_is_bounded() {
        let board = Board::initial();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let h = Heuristics {
            capture_weight: 1.0,
            position_weight: 0.0,
            mobility_weight: 0.0,
            noise: 0.5,
        };
        for _ in 0..50 {
            let score = evaluate_move(&board, Hex::new(2, 0), Player::Black, &h, &mut rng);
            assert!((1.0..1.5).contains(&score));
        }
    }
}
