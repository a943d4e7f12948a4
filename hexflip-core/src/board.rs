//! Hex board geometry with cube coordinates

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HexError;

/// Board radius (distance from center to edge)
pub const BOARD_RADIUS: u8 = 4;

/// Cube hex coordinates, always satisfying `q + r + s == 0`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawHex")]
pub struct Hex {
    q: i8,
    r: i8,
    s: i8,
}

#[derive(Deserialize)]
struct RawHex {
    q: i8,
    r: i8,
    s: i8,
}

impl TryFrom<RawHex> for Hex {
    type Error = HexError;

    fn try_from(raw: RawHex) -> Result<Self, Self::Error> {
        Hex::try_new(raw.q, raw.r, raw.s)
    }
}

impl Hex {
    /// Build from the two axial components; `s` is derived.
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Build from all three components, rejecting triples that do not sum to zero
    pub fn try_new(q: i8, r: i8, s: i8) -> Result<Self, HexError> {
        if q as i16 + r as i16 + s as i16 != 0 {
            return Err(HexError::NotZeroSum { q, r, s });
        }
        Ok(Self { q, r, s })
    }

    pub const fn origin() -> Self {
        Self { q: 0, r: 0, s: 0 }
    }

    pub fn q(&self) -> i8 {
        self.q
    }

    pub fn r(&self) -> i8 {
        self.r
    }

    pub fn s(&self) -> i8 {
        self.s
    }

    /// Check if this hex is on the board
    pub fn is_valid(&self) -> bool {
        self.distance_to_center() <= BOARD_RADIUS
    }

    /// Distance from center (0,0,0)
    pub fn distance_to_center(&self) -> u8 {
        self.q
            .unsigned_abs()
            .max(self.r.unsigned_abs())
            .max(self.s.unsigned_abs())
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Hex) -> u8 {
        let dq = (self.q as i16 - other.q as i16).unsigned_abs();
        let dr = (self.r as i16 - other.r as i16).unsigned_abs();
        let ds = (self.s as i16 - other.s as i16).unsigned_abs();
        dq.max(dr).max(ds) as u8
    }

    /// Component-wise sum, `None` if any component leaves the `i8` range
    pub fn checked_add(self, other: Hex) -> Option<Hex> {
        Some(Hex {
            q: self.q.checked_add(other.q)?,
            r: self.r.checked_add(other.r)?,
            s: self.s.checked_add(other.s)?,
        })
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: usize) -> Option<Hex> {
        self.checked_add(DIRECTIONS[direction % 6])
    }
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, other: Hex) -> Hex {
        Hex {
            q: self.q + other.q,
            r: self.r + other.r,
            s: self.s + other.s,
        }
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.q, self.r, self.s)
    }
}

impl FromStr for Hex {
    type Err = HexError;

    /// Accepts `q,r,s`, `q r s`, or the axial pair `q,r`, optionally parenthesized.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<i8> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<i8>())
            .collect::<Result<_, _>>()
            .map_err(|_| HexError::Parse(input.to_string()))?;

        match parts.as_slice() {
            &[q, r] => {
                let s = i8::try_from(-(q as i16) - r as i16)
                    .map_err(|_| HexError::Parse(input.to_string()))?;
                Hex::try_new(q, r, s)
            }
            &[q, r, s] => Hex::try_new(q, r, s),
            _ => Err(HexError::Parse(input.to_string())),
        }
    }
}

/// Unit vectors for the six hexagonal neighbours
pub const DIRECTIONS: [Hex; 6] = [
    Hex::new(1, -1),
    Hex::new(1, 0),
    Hex::new(0, 1),
    Hex::new(-1, 1),
    Hex::new(-1, 0),
    Hex::new(0, -1),
];

/// Every on-board hex, q-major then r ascending
pub fn all_hexes() -> impl Iterator<Item = Hex> {
    let radius = BOARD_RADIUS as i8;
    (-radius..=radius).flat_map(move |q| {
        let r_min = (-radius).max(-q - radius);
        let r_max = radius.min(-q + radius);
        (r_min..=r_max).map(move |r| Hex::new(q, r))
    })
}

/// Number of cells on the board
pub const fn cell_count() -> usize {
    let r = BOARD_RADIUS as usize;
    3 * r * (r + 1) + 1
}
