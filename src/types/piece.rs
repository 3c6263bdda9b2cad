//! Piece types and pieces.

use super::Color;
use serde::{Deserialize, Serialize};

/// Piece types (8 types)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceType {
    King = 0,
    Rook = 1,
    Bishop = 2,
    Gold = 3,
    Silver = 4,
    Knight = 5,
    Lance = 6,
    Pawn = 7,
}

/// All piece types that can be held in hand, in hand-index order
pub const HAND_PIECE_TYPES: [PieceType; 7] = [
    PieceType::Rook,   // index 0
    PieceType::Bishop, // index 1
    PieceType::Gold,   // index 2
    PieceType::Silver, // index 3
    PieceType::Knight, // index 4
    PieceType::Lance,  // index 5
    PieceType::Pawn,   // index 6
];

/// Number of droppable piece types
pub const NUM_HAND_PIECE_TYPES: usize = 7;

impl PieceType {
    /// Check if the piece type can promote (king and gold never do)
    #[inline]
    pub const fn can_promote(self) -> bool {
        matches!(
            self,
            PieceType::Rook
                | PieceType::Bishop
                | PieceType::Silver
                | PieceType::Knight
                | PieceType::Lance
                | PieceType::Pawn
        )
    }

    /// Get hand array index for a piece type; the king cannot be in hand
    #[inline]
    pub const fn hand_index(self) -> Option<usize> {
        match self {
            PieceType::King => None,
            PieceType::Rook => Some(0),
            PieceType::Bishop => Some(1),
            PieceType::Gold => Some(2),
            PieceType::Silver => Some(3),
            PieceType::Knight => Some(4),
            PieceType::Lance => Some(5),
            PieceType::Pawn => Some(6),
        }
    }

    /// Base material value, hand or board
    #[inline]
    pub const fn base_value(self) -> f64 {
        match self {
            PieceType::King => 10000.0,
            PieceType::Rook => 10.0,
            PieceType::Bishop => 8.0,
            PieceType::Gold => 6.0,
            PieceType::Silver => 5.0,
            PieceType::Knight => 3.0,
            PieceType::Lance => 3.0,
            PieceType::Pawn => 1.0,
        }
    }

    /// Extra material value a promoted piece of this base type carries
    #[inline]
    pub const fn promotion_bonus(self) -> f64 {
        match self {
            PieceType::Rook | PieceType::Bishop => 1.5,
            PieceType::Silver => 0.6,
            PieceType::Knight | PieceType::Lance | PieceType::Pawn => 0.8,
            PieceType::King | PieceType::Gold => 0.0,
        }
    }
}

/// Complete piece representation including promotion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    pub color: Color,
    pub promoted: bool,
}

impl Piece {
    /// Create a new unpromoted piece
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece {
            piece_type,
            color,
            promoted: false,
        }
    }

    /// Create a promoted piece
    #[inline]
    pub const fn promoted(piece_type: PieceType, color: Color) -> Self {
        debug_assert!(piece_type.can_promote());
        Piece {
            piece_type,
            color,
            promoted: true,
        }
    }

    /// Material value including the promotion bonus
    #[inline]
    pub fn value(self) -> f64 {
        let base = self.piece_type.base_value();
        if self.promoted {
            base + self.piece_type.promotion_bonus()
        } else {
            base
        }
    }
}
