//! Snapshot records for the presentation boundary.
//!
//! A snapshot is the full game state as nested primitive records, suitable
//! for persistence and undo history. Restoring validates structure; a
//! malformed blob is rejected with a [`SnapshotError`] rather than being
//! silently replaced by a fresh game.

use super::{Board, Position};
use crate::types::{Color, Move, Piece, PieceType, Square, NUM_HAND_PIECE_TYPES};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced when restoring a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("board must have 81 squares, got {0}")]
    BoardSize(usize),
    #[error("{0:?} must have exactly one king, found {1}")]
    KingCount(Color, usize),
    #[error("{0:?} cannot carry a promotion flag")]
    InvalidPromotion(PieceType),
}

/// Serialized form of a [`Position`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// 81 squares in index order (`rank * 9 + file`)
    pub board: Vec<Option<Piece>>,
    /// Held counts `[color][hand index]`
    pub hands: [[u8; NUM_HAND_PIECE_TYPES]; Color::NUM],
    /// Side to move
    pub turn: Color,
    /// Last applied action, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_move: Option<Move>,
}

impl Snapshot {
    /// Capture the full state of a position
    pub fn capture(pos: &Position) -> Self {
        Snapshot {
            board: Square::all().map(|sq| pos.board.piece_on(sq)).collect(),
            hands: pos.hands,
            turn: pos.side_to_move,
            last_move: pos.last_move,
        }
    }

    /// Rebuild a position, validating structural invariants
    pub fn restore(&self) -> Result<Position, SnapshotError> {
        if self.board.len() != Square::NUM {
            return Err(SnapshotError::BoardSize(self.board.len()));
        }

        let mut board = Board::empty();
        let mut kings = [0usize; Color::NUM];
        for (sq, piece) in Square::all().zip(self.board.iter()) {
            let Some(piece) = *piece else { continue };
            if piece.promoted && !piece.piece_type.can_promote() {
                return Err(SnapshotError::InvalidPromotion(piece.piece_type));
            }
            if piece.piece_type == PieceType::King {
                kings[piece.color.index()] += 1;
            }
            board.put_piece(sq, piece);
        }
        for color in [Color::Black, Color::White] {
            if kings[color.index()] != 1 {
                return Err(SnapshotError::KingCount(color, kings[color.index()]));
            }
        }

        Ok(Position {
            board,
            hands: self.hands,
            side_to_move: self.turn,
            last_move: self.last_move,
        })
    }
}

impl Position {
    /// Serialize the full state to JSON
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(&Snapshot::capture(self))?)
    }

    /// Restore a state previously produced by [`to_json`](Position::to_json)
    pub fn from_json(blob: &str) -> Result<Position, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(blob)?;
        snapshot.restore()
    }
}
