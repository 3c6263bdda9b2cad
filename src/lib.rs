//! # banshogi
//!
//! Rules engine and move search for a two-player shogi game.
//!
//! ## Module layout
//!
//! - `types`: basic types (Color, Square, Piece, Move)
//! - `position`: board and game state with do_move/undo_move and snapshots
//! - `movegen`: legal move and drop generation
//! - `eval`: heuristic evaluation
//! - `search`: move choice at three difficulty levels
//!
//! The crate owns rules and search only; rendering, input handling, and
//! match flow live with the caller.

pub mod eval;
pub mod movegen;
pub mod position;
pub mod search;
pub mod types;

pub use position::{Position, Snapshot, SnapshotError, UndoInfo};
pub use search::{choose_move, choose_move_with, Level};
pub use types::{Color, Move, Piece, PieceType, Square};
