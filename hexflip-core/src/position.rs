//! Board model: sparse occupancy over the hex grid

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::board::{all_hexes, cell_count, Hex, DIRECTIONS};
use crate::error::GameError;

/// Disc color, doubling as the player identity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black = 0,
    White = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("black"),
            Player::White => f.write_str("white"),
        }
    }
}

/// Piece counts per side
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    pub fn total(&self) -> u32 {
        self.black + self.white
    }

    /// Side with strictly more pieces, `None` on a tie
    pub fn leader(&self) -> Option<Player> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Board: hex -> disc (absent key = empty cell)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: FxHashMap<Hex, Player>,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Opening position: black center, ring alternating black/white
    /// starting from `DIRECTIONS[0]`.
    pub fn initial() -> Self {
        let mut cells = FxHashMap::default();
        cells.insert(Hex::origin(), Player::Black);
        for (i, &dir) in DIRECTIONS.iter().enumerate() {
            let player = if i % 2 == 0 { Player::Black } else { Player::White };
            cells.insert(dir, player);
        }
        Self { cells }
    }

    /// Build an arbitrary position, rejecting off-board cells
    pub fn from_cells(cells: impl IntoIterator<Item = (Hex, Player)>) -> Result<Self, GameError> {
        let mut board = Self::empty();
        for (hex, player) in cells {
            if !hex.is_valid() {
                return Err(GameError::OutOfBounds(hex));
            }
            board.cells.insert(hex, player);
        }
        Ok(board)
    }

    /// Get disc at hex
    pub fn get(&self, hex: Hex) -> Option<Player> {
        self.cells.get(&hex).copied()
    }

    pub fn is_occupied(&self, hex: Hex) -> bool {
        self.cells.contains_key(&hex)
    }

    /// Return a new board with `hex` and every captured cell set to `player`.
    ///
    /// Emptiness of `hex` and ownership of `captured` are the move engine's
    /// responsibility; only bounds are checked here.
    pub fn with_placement(
        &self,
        hex: Hex,
        player: Player,
        captured: &[Hex],
    ) -> Result<Board, GameError> {
        let mut next = self.clone();
        for &cell in std::iter::once(&hex).chain(captured) {
            if !cell.is_valid() {
                return Err(GameError::OutOfBounds(cell));
            }
            next.cells.insert(cell, player);
        }
        Ok(next)
    }

    /// Count discs with a full scan
    pub fn score(&self) -> Score {
        self.cells.values().fold(Score::default(), |mut score, player| {
            match player {
                Player::Black => score.black += 1,
                Player::White => score.white += 1,
            }
            score
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_full(&self) -> bool {
        self.cells.len() == cell_count()
    }

    /// Occupied cells in board enumeration order
    pub fn cells(&self) -> impl Iterator<Item = (Hex, Player)> + '_ {
        all_hexes().filter_map(move |hex| self.get(hex).map(|player| (hex, player)))
    }
}

#[derive(Serialize)]
struct CellView {
    hex: Hex,
    player: Player,
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.cells().map(|(hex, player)| CellView { hex, player }))
    }
}
