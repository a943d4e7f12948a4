//! Move generation and capture computation
//!
//! Legality is derived entirely from captures: a placement is legal iff it
//! flips at least one opposing disc along one of the six hex directions.

use crate::board::{all_hexes, Hex, DIRECTIONS};
use crate::position::{Board, Player};

/// Opposing discs flipped along one direction from `origin`.
///
/// The run must end on one of `player`'s own discs; an empty cell or the
/// board edge yields no flips.
pub fn capture_chain(board: &Board, origin: Hex, direction: Hex, player: Player) -> Vec<Hex> {
    let mut chain = Vec::new();
    let mut current = origin;

    while let Some(next) = current.checked_add(direction).filter(Hex::is_valid) {
        match board.get(next) {
            None => return Vec::new(),
            Some(owner) if owner == player => return chain,
            Some(_) => chain.push(next),
        }
        current = next;
    }

    Vec::new()
}

/// All discs flipped by placing at `hex`; empty when the cell is taken or off-board
pub fn flips_for(board: &Board, hex: Hex, player: Player) -> Vec<Hex> {
    if !hex.is_valid() || board.is_occupied(hex) {
        return Vec::new();
    }

    DIRECTIONS
        .iter()
        .flat_map(|&dir| capture_chain(board, hex, dir, player))
        .collect()
}

pub fn is_legal(board: &Board, hex: Hex, player: Player) -> bool {
    !flips_for(board, hex, player).is_empty()
}

/// Every legal placement, in board enumeration order
pub fn legal_moves(board: &Board, player: Player) -> Vec<Hex> {
    all_hexes()
        .filter(|&hex| is_legal(board, hex, player))
        .collect()
}

pub fn has_legal_move(board: &Board, player: Player) -> bool {
    all_hexes().any(|hex| is_legal(board, hex, player))
}

/// Count legal moves for a player (mobility heuristic)
pub fn mobility(board: &Board, player: Player) -> usize {
    all_hexes().filter(|&hex| is_legal(board, hex, player)).count()
}
