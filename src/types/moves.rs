//! Move representation.
//!
//! A move is either a board move (with an optional promotion) or a drop
//! from hand. Both are immutable value objects once constructed.

use super::{Color, PieceType, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A legal or candidate action for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Move {
    /// Move a piece already on the board, promoting it if `promote` is set
    Board {
        from: Square,
        to: Square,
        promote: bool,
    },
    /// Place a held piece on an empty square; dropped pieces are always unpromoted
    Drop {
        piece: PieceType,
        to: Square,
        owner: Color,
    },
}

impl Move {
    /// Create a board move
    #[inline]
    pub const fn board(from: Square, to: Square, promote: bool) -> Self {
        Move::Board { from, to, promote }
    }

    /// Create a drop move
    #[inline]
    pub const fn drop(piece: PieceType, to: Square, owner: Color) -> Self {
        debug_assert!(!matches!(piece, PieceType::King));
        Move::Drop { piece, to, owner }
    }

    /// Get the destination square
    #[inline]
    pub const fn to(self) -> Square {
        match self {
            Move::Board { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    /// Get the source square (`None` for drops)
    #[inline]
    pub const fn from(self) -> Option<Square> {
        match self {
            Move::Board { from, .. } => Some(from),
            Move::Drop { .. } => None,
        }
    }

    /// Check if this is a drop
    #[inline]
    pub const fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    /// Check if this is a promoting board move
    #[inline]
    pub const fn is_promote(self) -> bool {
        matches!(self, Move::Board { promote: true, .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Board { from, to, promote } => {
                if promote {
                    write!(f, "{from}{to}+")
                } else {
                    write!(f, "{from}{to}")
                }
            }
            Move::Drop { piece, to, .. } => write!(f, "{piece:?}*{to}"),
        }
    }
}
