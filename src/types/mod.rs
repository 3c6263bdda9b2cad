//! Basic value types: sides, squares, pieces and moves.

mod color;
mod moves;
mod piece;
mod square;

pub use color::Color;
pub use moves::Move;
pub use piece::{Piece, PieceType, HAND_PIECE_TYPES, NUM_HAND_PIECE_TYPES};
pub use square::Square;
