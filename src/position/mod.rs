//! Board and game state, with exact, reversible move application.

mod snapshot;

pub use snapshot::{Snapshot, SnapshotError};

use crate::types::{Color, Move, Piece, PieceType, Square, NUM_HAND_PIECE_TYPES};

/// 9x9 mailbox board: at most one piece per square.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    squares: [Option<Piece>; Square::NUM],
}

impl Board {
    /// Create an empty board
    pub fn empty() -> Self {
        Board {
            squares: [None; Square::NUM],
        }
    }

    /// Place a piece
    #[inline]
    pub fn put_piece(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.squares[sq.index()].is_none());
        self.squares[sq.index()] = Some(piece);
    }

    /// Remove and return the piece on a square, if any
    #[inline]
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Get the piece on a square
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Find the king of a side. `None` violates the game invariants and is
    /// only reachable on hand-built boards.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| {
            matches!(
                self.squares[sq.index()],
                Some(p) if p.color == color && p.piece_type == PieceType::King
            )
        })
    }
}

/// Everything needed to invert exactly one `Position::do_move`.
#[derive(Debug, Clone, Copy)]
pub struct UndoInfo {
    /// Captured piece with its original promotion flag (board moves only)
    pub captured: Option<Piece>,
    /// Whether the moving piece was promoted before the move
    pub moved_was_promoted: bool,
    /// Last-action field before the move
    pub prev_last_move: Option<Move>,
}

/// Full game state: board, hands, side to move.
///
/// Mutated only through [`do_move`](Position::do_move) /
/// [`undo_move`](Position::undo_move) (strict LIFO pairing) or the
/// committing [`apply`](Position::apply); never shared for concurrent
/// mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// The board
    pub board: Board,
    /// Pieces in hand `[color][hand index]`, see [`PieceType::hand_index`]
    pub hands: [[u8; NUM_HAND_PIECE_TYPES]; Color::NUM],
    /// Side to move
    pub side_to_move: Color,
    /// Last applied action, kept for the presentation layer; the core
    /// records and restores it but never reads it
    pub last_move: Option<Move>,
}

impl Position {
    /// Create an empty position (no pieces, empty hands, Black to move)
    pub fn empty() -> Self {
        Position {
            board: Board::empty(),
            hands: [[0; NUM_HAND_PIECE_TYPES]; Color::NUM],
            side_to_move: Color::Black,
            last_move: None,
        }
    }

    /// Standard opening arrangement with empty hands, `starting_side` to move
    pub fn new(starting_side: Color) -> Self {
        let mut pos = Self::startpos();
        pos.side_to_move = starting_side;
        pos
    }

    /// Standard opening arrangement, Black to move
    pub fn startpos() -> Self {
        let mut pos = Self::empty();

        let back_rank = [
            PieceType::Lance,
            PieceType::Knight,
            PieceType::Silver,
            PieceType::Gold,
            PieceType::King,
            PieceType::Gold,
            PieceType::Silver,
            PieceType::Knight,
            PieceType::Lance,
        ];

        // White occupies ranks 0-2, Black mirrors on ranks 6-8.
        for (file, &pt) in back_rank.iter().enumerate() {
            let file = file as u8;
            pos.board.put_piece(Square::new(file, 0), Piece::new(pt, Color::White));
            pos.board.put_piece(Square::new(file, 8), Piece::new(pt, Color::Black));
        }
        pos.board
            .put_piece(Square::new(1, 1), Piece::new(PieceType::Bishop, Color::White));
        pos.board
            .put_piece(Square::new(7, 1), Piece::new(PieceType::Rook, Color::White));
        pos.board
            .put_piece(Square::new(7, 7), Piece::new(PieceType::Bishop, Color::Black));
        pos.board
            .put_piece(Square::new(1, 7), Piece::new(PieceType::Rook, Color::Black));
        for file in 0..9 {
            pos.board
                .put_piece(Square::new(file, 2), Piece::new(PieceType::Pawn, Color::White));
            pos.board
                .put_piece(Square::new(file, 6), Piece::new(PieceType::Pawn, Color::Black));
        }

        pos
    }

    /// Get the piece on a square
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_on(sq)
    }

    /// Number of `piece_type` held by `side`
    #[inline]
    pub fn hand_count(&self, side: Color, piece_type: PieceType) -> u8 {
        match piece_type.hand_index() {
            Some(idx) => self.hands[side.index()][idx],
            None => 0,
        }
    }

    /// Whether `side`'s king is currently attacked
    pub fn is_in_check(&self, side: Color) -> bool {
        crate::movegen::is_in_check(&self.board, side)
    }

    /// All legal actions for the side to move
    pub fn legal_moves(&mut self) -> Vec<Move> {
        crate::movegen::all_legal_moves(self)
    }

    /// Apply a move in place and return the record needed to undo it.
    ///
    /// A capture demotes the captured piece to its unpromoted base type and
    /// adds it to the mover's hand; the turn flips.
    pub fn do_move(&mut self, mv: Move) -> UndoInfo {
        let us = self.side_to_move;
        let mut undo = UndoInfo {
            captured: None,
            moved_was_promoted: false,
            prev_last_move: self.last_move,
        };

        match mv {
            Move::Drop { piece, to, owner } => {
                debug_assert_eq!(owner, us, "drop for the side not to move");
                let idx = piece.hand_index().expect("a king cannot be dropped");
                debug_assert!(self.hands[us.index()][idx] > 0, "drop from an empty hand");
                self.hands[us.index()][idx] -= 1;
                self.board.put_piece(to, Piece::new(piece, owner));
            }
            Move::Board { from, to, promote } => {
                let mut piece = self
                    .board
                    .remove_piece(from)
                    .expect("board move from an empty square");
                debug_assert_eq!(piece.color, us);
                undo.moved_was_promoted = piece.promoted;

                if let Some(captured) = self.board.remove_piece(to) {
                    debug_assert_ne!(captured.color, us, "capture of an own piece");
                    // Kings are never banked. Legality and mobility probes
                    // simulate king captures while the opponent is in check.
                    if let Some(idx) = captured.piece_type.hand_index() {
                        self.hands[us.index()][idx] += 1;
                    }
                    undo.captured = Some(captured);
                }

                if promote {
                    debug_assert!(piece.piece_type.can_promote() && !piece.promoted);
                    piece.promoted = true;
                }
                self.board.put_piece(to, piece);
            }
        }

        self.side_to_move = us.opponent();
        self.last_move = Some(mv);
        undo
    }

    /// Invert exactly one `do_move`. Pairs must nest strictly LIFO.
    pub fn undo_move(&mut self, mv: Move, undo: UndoInfo) {
        let us = self.side_to_move.opponent();
        self.side_to_move = us;
        self.last_move = undo.prev_last_move;

        match mv {
            Move::Drop { piece, to, .. } => {
                self.board.remove_piece(to);
                let idx = piece.hand_index().expect("a king cannot be dropped");
                self.hands[us.index()][idx] += 1;
            }
            Move::Board { from, to, .. } => {
                let mut piece = self
                    .board
                    .remove_piece(to)
                    .expect("undo of a move with an empty destination");
                piece.promoted = undo.moved_was_promoted;
                self.board.put_piece(from, piece);

                if let Some(captured) = undo.captured {
                    self.board.put_piece(to, captured);
                    if let Some(idx) = captured.piece_type.hand_index() {
                        self.hands[us.index()][idx] -= 1;
                    }
                }
            }
        }
    }

    /// Commit an action to the authoritative state, discarding the undo record
    pub fn apply(&mut self, mv: Move) {
        let _ = self.do_move(mv);
    }
}
