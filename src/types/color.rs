//! Side to move.

use serde::{Deserialize, Serialize};

/// One of the two players. Black (sente) starts on ranks 6-8 and moves
/// toward rank 0; White (gote) mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    /// Number of sides
    pub const NUM: usize = 2;

    /// Get the opposing side
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Array index for per-side tables
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank delta of one forward step for this side
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Black => -1,
            Color::White => 1,
        }
    }

    /// The rank this side's pieces start from (pawns one step short of mid-board)
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::Black => 8,
            Color::White => 0,
        }
    }

    /// The rank nearest the opponent; pawns and lances may never rest here
    #[inline]
    pub const fn last_rank(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::White => 8,
        }
    }

    /// Whether `rank` lies in this side's promotion zone (the three ranks
    /// nearest the opponent's edge)
    #[inline]
    pub const fn promotion_zone(self, rank: u8) -> bool {
        match self {
            Color::Black => rank <= 2,
            Color::White => rank >= 6,
        }
    }

    /// Whether `rank` is within the two farthest ranks (knights may never rest here)
    #[inline]
    pub const fn last_two_ranks(self, rank: u8) -> bool {
        match self {
            Color::Black => rank <= 1,
            Color::White => rank >= 7,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}
