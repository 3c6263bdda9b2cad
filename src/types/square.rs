//! Squares of the 9x9 board.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Square on the board (0-80), stored as `rank * 9 + file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square(u8);

impl Square {
    /// Number of squares on the board
    pub const NUM: usize = 81;

    /// Create square from file and rank
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 9 && rank < 9);
        Square(rank * 9 + file)
    }

    /// Get file (0-8)
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 9
    }

    /// Get rank (0-8, rank 0 is White's home edge)
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 9
    }

    /// Get index (0-80)
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Create from a raw index, if in range
    #[inline]
    pub const fn from_index(index: usize) -> Option<Square> {
        if index < Self::NUM {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    /// Step by a (file, rank) delta, returning `None` off the board
    #[inline]
    pub fn offset(self, dfile: i8, drank: i8) -> Option<Square> {
        let file = self.file() as i8 + dfile;
        let rank = self.rank() as i8 + drank;
        if (0..9).contains(&file) && (0..9).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Iterate over all squares in index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM as u8).map(Square)
    }
}

impl TryFrom<u8> for Square {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < Self::NUM as u8 {
            Ok(Square(value))
        } else {
            Err(format!("square index out of range: {value}"))
        }
    }
}

impl From<Square> for u8 {
    #[inline]
    fn from(sq: Square) -> u8 {
        sq.0
    }
}

/// Display in USI-like notation: file counted from the right (9..1),
/// rank as a letter ('a' at rank 0). `Square::new(4, 4)` prints "5e".
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = b'9' - self.file();
        let rank = b'a' + self.rank();
        write!(f, "{}{}", file as char, rank as char)
    }
}
