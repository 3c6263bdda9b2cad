//! Move generation: per-piece destinations, attack testing, the legality
//! filter and drop enumeration.
//!
//! Destination generation is a pure function of (board, square) and ignores
//! self-check; legality is established afterwards by simulating each
//! candidate with a paired do/undo and rejecting those that leave the
//! mover's own king attacked.

use crate::position::{Board, Position};
use crate::types::{Color, Move, PieceType, Square, HAND_PIECE_TYPES};

const ORTHO_DELTAS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAG_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Push `from + delta` if it is on the board and not occupied by `owner`
#[inline]
fn push_step(board: &Board, owner: Color, from: Square, delta: (i8, i8), out: &mut Vec<Square>) {
    if let Some(to) = from.offset(delta.0, delta.1) {
        match board.piece_on(to) {
            Some(p) if p.color == owner => {}
            _ => out.push(to),
        }
    }
}

/// Push squares along a ray until blocked; the blocker is included only
/// when it belongs to the opponent
fn push_ray(board: &Board, owner: Color, from: Square, delta: (i8, i8), out: &mut Vec<Square>) {
    let mut cur = from;
    while let Some(to) = cur.offset(delta.0, delta.1) {
        match board.piece_on(to) {
            None => out.push(to),
            Some(p) => {
                if p.color != owner {
                    out.push(to);
                }
                break;
            }
        }
        cur = to;
    }
}

fn gold_deltas(owner: Color) -> [(i8, i8); 6] {
    let d = owner.forward();
    [(0, d), (1, d), (-1, d), (1, 0), (-1, 0), (0, -d)]
}

fn silver_deltas(owner: Color) -> [(i8, i8); 5] {
    let d = owner.forward();
    [(0, d), (1, d), (-1, d), (1, -d), (-1, -d)]
}

/// Pseudo-legal destination squares for the piece on `from`, ignoring
/// self-check. Empty squares yield an empty list.
pub fn piece_destinations(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_on(from) else {
        return Vec::new();
    };
    let us = piece.color;
    let d = us.forward();
    let mut out = Vec::new();

    let mut steps = |board: &Board, deltas: &[(i8, i8)], out: &mut Vec<Square>| {
        for &delta in deltas {
            push_step(board, us, from, delta, out);
        }
    };

    match piece.piece_type {
        PieceType::King => steps(board, &KING_DELTAS, &mut out),
        PieceType::Gold => steps(board, &gold_deltas(us), &mut out),
        PieceType::Silver if piece.promoted => steps(board, &gold_deltas(us), &mut out),
        PieceType::Silver => steps(board, &silver_deltas(us), &mut out),
        PieceType::Knight if piece.promoted => steps(board, &gold_deltas(us), &mut out),
        PieceType::Knight => steps(board, &[(1, 2 * d), (-1, 2 * d)], &mut out),
        PieceType::Lance if piece.promoted => steps(board, &gold_deltas(us), &mut out),
        PieceType::Lance => push_ray(board, us, from, (0, d), &mut out),
        PieceType::Pawn if piece.promoted => steps(board, &gold_deltas(us), &mut out),
        PieceType::Pawn => push_step(board, us, from, (0, d), &mut out),
        PieceType::Bishop => {
            for delta in DIAG_DELTAS {
                push_ray(board, us, from, delta, &mut out);
            }
            if piece.promoted {
                steps(board, &ORTHO_DELTAS, &mut out);
            }
        }
        PieceType::Rook => {
            for delta in ORTHO_DELTAS {
                push_ray(board, us, from, delta, &mut out);
            }
            if piece.promoted {
                steps(board, &DIAG_DELTAS, &mut out);
            }
        }
    }

    out
}

/// Whether any piece of `by` attacks `target`. Reuses the destination
/// generator, so the cost is proportional to the attacker's mobility.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    Square::all().any(|sq| {
        matches!(board.piece_on(sq), Some(p) if p.color == by)
            && piece_destinations(board, sq).contains(&target)
    })
}

/// Whether `side`'s king is attacked. A missing king violates the game
/// invariants; it trips an assertion in development and degrades to
/// "no check possible" otherwise.
pub fn is_in_check(board: &Board, side: Color) -> bool {
    match board.king_square(side) {
        Some(king) => is_square_attacked(board, king, side.opponent()),
        None => {
            debug_assert!(false, "missing {side:?} king");
            log::warn!("missing {side:?} king, treating as not in check");
            false
        }
    }
}

/// Simulate `mv` with a paired do/undo and report whether it leaves the
/// mover's own king attacked
fn leaves_king_in_check(pos: &mut Position, mv: Move) -> bool {
    let us = pos.side_to_move;
    let undo = pos.do_move(mv);
    let checked = is_in_check(&pos.board, us);
    pos.undo_move(mv, undo);
    checked
}

/// Promotion is mandatory when the piece would otherwise never move again:
/// pawns and lances on the farthest rank, knights on the farthest two
fn must_promote(piece_type: PieceType, us: Color, to_rank: u8) -> bool {
    match piece_type {
        PieceType::Pawn | PieceType::Lance => to_rank == us.last_rank(),
        PieceType::Knight => us.last_two_ranks(to_rank),
        _ => false,
    }
}

/// Legal moves of the piece on `from`, with promotion expansion.
///
/// An empty origin or a piece not owned by the side to move yields an
/// empty list rather than an error.
pub fn legal_moves_from(pos: &mut Position, from: Square) -> Vec<Move> {
    let Some(piece) = pos.board.piece_on(from) else {
        return Vec::new();
    };
    let us = pos.side_to_move;
    if piece.color != us {
        return Vec::new();
    }

    let mut out = Vec::new();
    for to in piece_destinations(&pos.board, from) {
        let can_promote = !piece.promoted
            && piece.piece_type.can_promote()
            && (us.promotion_zone(from.rank()) || us.promotion_zone(to.rank()));

        if can_promote {
            let mv = Move::board(from, to, true);
            if !leaves_king_in_check(pos, mv) {
                out.push(mv);
            }
            if !must_promote(piece.piece_type, us, to.rank()) {
                let mv = Move::board(from, to, false);
                if !leaves_king_in_check(pos, mv) {
                    out.push(mv);
                }
            }
        } else {
            let mv = Move::board(from, to, false);
            if !leaves_king_in_check(pos, mv) {
                out.push(mv);
            }
        }
    }
    out
}

fn has_unpromoted_pawn_on_file(board: &Board, owner: Color, file: u8) -> bool {
    (0..9).any(|rank| {
        matches!(
            board.piece_on(Square::new(file, rank)),
            Some(p) if p.color == owner && p.piece_type == PieceType::Pawn && !p.promoted
        )
    })
}

/// Legal drop squares for one held piece type of `owner`.
///
/// Excludes occupied squares, squares the piece could never move from
/// (farthest rank for pawn/lance, farthest two for knight), nifu files for
/// pawns, and drops that leave the owner's king attacked. Returns an empty
/// list when `owner` is not the side to move or holds none of the type.
pub fn legal_drops(pos: &mut Position, owner: Color, piece_type: PieceType) -> Vec<Move> {
    let Some(idx) = piece_type.hand_index() else {
        return Vec::new();
    };
    if owner != pos.side_to_move || pos.hands[owner.index()][idx] == 0 {
        return Vec::new();
    }

    let mut out = Vec::new();
    for to in Square::all() {
        if pos.board.piece_on(to).is_some() {
            continue;
        }
        match piece_type {
            PieceType::Pawn | PieceType::Lance if to.rank() == owner.last_rank() => continue,
            PieceType::Knight if owner.last_two_ranks(to.rank()) => continue,
            PieceType::Pawn if has_unpromoted_pawn_on_file(&pos.board, owner, to.file()) => {
                continue
            }
            _ => {}
        }
        let mv = Move::drop(piece_type, to, owner);
        if !leaves_king_in_check(pos, mv) {
            out.push(mv);
        }
    }
    out
}

/// All legal actions (board moves and drops) for the side to move
pub fn all_legal_moves(pos: &mut Position) -> Vec<Move> {
    let us = pos.side_to_move;
    let mut out = Vec::new();
    for from in Square::all() {
        if matches!(pos.board.piece_on(from), Some(p) if p.color == us) {
            out.extend(legal_moves_from(pos, from));
        }
    }
    for &pt in &HAND_PIECE_TYPES {
        out.extend(legal_drops(pos, us, pt));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    fn bare_kings() -> Position {
        let mut pos = Position::empty();
        pos.board
            .put_piece(Square::new(4, 0), Piece::new(PieceType::King, Color::White));
        pos.board
            .put_piece(Square::new(4, 8), Piece::new(PieceType::King, Color::Black));
        pos
    }

    #[test]
    fn test_pawn_single_step() {
        let mut pos = bare_kings();
        pos.board
            .put_piece(Square::new(2, 4), Piece::new(PieceType::Pawn, Color::Black));
        let dests = piece_destinations(&pos.board, Square::new(2, 4));
        assert_eq!(dests, vec![Square::new(2, 3)]);

        pos.board
            .put_piece(Square::new(6, 4), Piece::new(PieceType::Pawn, Color::White));
        let dests = piece_destinations(&pos.board, Square::new(6, 4));
        assert_eq!(dests, vec![Square::new(6, 5)]);
    }

    #[test]
    fn test_lance_ray_blocked() {
        let mut pos = bare_kings();
        pos.board
            .put_piece(Square::new(0, 7), Piece::new(PieceType::Lance, Color::Black));
        pos.board
            .put_piece(Square::new(0, 3), Piece::new(PieceType::Pawn, Color::White));
        let dests = piece_destinations(&pos.board, Square::new(0, 7));
        // Runs up to and including the enemy pawn, not beyond.
        assert_eq!(
            dests,
            vec![
                Square::new(0, 6),
                Square::new(0, 5),
                Square::new(0, 4),
                Square::new(0, 3)
            ]
        );

        // An own piece blocks without being a destination.
        pos.board
            .put_piece(Square::new(0, 5), Piece::new(PieceType::Pawn, Color::Black));
        let dests = piece_destinations(&pos.board, Square::new(0, 7));
        assert_eq!(dests, vec![Square::new(0, 6)]);
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let mut pos = bare_kings();
        pos.board
            .put_piece(Square::new(4, 4), Piece::new(PieceType::Knight, Color::Black));
        // Squares directly ahead are occupied; the knight jumps anyway.
        pos.board
            .put_piece(Square::new(4, 3), Piece::new(PieceType::Pawn, Color::Black));
        pos.board
            .put_piece(Square::new(4, 2), Piece::new(PieceType::Pawn, Color::White));
        let dests = piece_destinations(&pos.board, Square::new(4, 4));
        assert_eq!(dests, vec![Square::new(5, 2), Square::new(3, 2)]);
    }

    #[test]
    fn test_silver_and_gold_steps() {
        let mut pos = bare_kings();
        pos.board
            .put_piece(Square::new(4, 4), Piece::new(PieceType::Silver, Color::Black));
        let silver: Vec<Square> = piece_destinations(&pos.board, Square::new(4, 4));
        assert_eq!(silver.len(), 5);
        assert!(silver.contains(&Square::new(4, 3)));
        assert!(silver.contains(&Square::new(3, 5)));
        assert!(!silver.contains(&Square::new(3, 4)));
        assert!(!silver.contains(&Square::new(4, 5)));

        pos.board.remove_piece(Square::new(4, 4));
        pos.board
            .put_piece(Square::new(4, 4), Piece::new(PieceType::Gold, Color::Black));
        let gold = piece_destinations(&pos.board, Square::new(4, 4));
        assert_eq!(gold.len(), 6);
        assert!(gold.contains(&Square::new(4, 5)));
        assert!(!gold.contains(&Square::new(3, 5)));
    }

    #[test]
    fn test_promoted_light_pieces_move_as_gold() {
        let base = bare_kings();
        for pt in [
            PieceType::Pawn,
            PieceType::Lance,
            PieceType::Knight,
            PieceType::Silver,
        ] {
            let mut board = base.board.clone();
            board.put_piece(Square::new(4, 4), Piece::promoted(pt, Color::Black));
            let dests = piece_destinations(&board, Square::new(4, 4));

            board.remove_piece(Square::new(4, 4));
            board.put_piece(Square::new(4, 4), Piece::new(PieceType::Gold, Color::Black));
            let expected = piece_destinations(&board, Square::new(4, 4));
            assert_eq!(dests, expected, "{pt:?}");
        }
    }

    #[test]
    fn test_horse_and_dragon() {
        let mut pos = bare_kings();
        pos.board
            .put_piece(Square::new(4, 4), Piece::promoted(PieceType::Bishop, Color::Black));
        let horse = piece_destinations(&pos.board, Square::new(4, 4));
        assert_eq!(horse.len(), 20); // 16 diagonal ray squares + 4 orthogonal steps
        assert!(horse.contains(&Square::new(4, 3)));
        assert!(horse.contains(&Square::new(0, 0)));

        pos.board.remove_piece(Square::new(4, 4));
        pos.board
            .put_piece(Square::new(4, 4), Piece::promoted(PieceType::Rook, Color::Black));
        let dragon = piece_destinations(&pos.board, Square::new(4, 4));
        // Up-ray captures the white king square; down-ray stops short of the
        // own king: 4 + 3 + 4 + 4 rays + 4 diagonal steps.
        assert_eq!(dragon.len(), 19);
        assert!(dragon.contains(&Square::new(3, 3)));
        assert!(dragon.contains(&Square::new(4, 0)));
        assert!(!dragon.contains(&Square::new(4, 8)));
    }

    #[test]
    fn test_is_square_attacked() {
        let mut pos = bare_kings();
        pos.board
            .put_piece(Square::new(0, 7), Piece::new(PieceType::Lance, Color::Black));
        assert!(is_square_attacked(&pos.board, Square::new(0, 2), Color::Black));
        assert!(!is_square_attacked(&pos.board, Square::new(1, 2), Color::Black));
        assert!(!is_square_attacked(&pos.board, Square::new(0, 8), Color::Black));
    }

    #[test]
    fn test_startpos_legal_move_count() {
        // Regression fixture: the standard opening position has exactly 30
        // legal moves for the side to move.
        let mut pos = Position::startpos();
        assert_eq!(all_legal_moves(&mut pos).len(), 30);

        pos.side_to_move = Color::White;
        assert_eq!(all_legal_moves(&mut pos).len(), 30);
    }

    #[test]
    fn test_empty_or_foreign_origin_yields_no_moves() {
        let mut pos = Position::startpos();
        assert!(legal_moves_from(&mut pos, Square::new(4, 4)).is_empty());
        // White piece while Black is to move.
        assert!(legal_moves_from(&mut pos, Square::new(4, 2)).is_empty());
    }

    #[test]
    fn test_forced_promotion_pawn() {
        let mut pos = bare_kings();
        pos.board
            .put_piece(Square::new(0, 1), Piece::new(PieceType::Pawn, Color::Black));
        let moves = legal_moves_from(&mut pos, Square::new(0, 1));
        assert_eq!(moves, vec![Move::board(Square::new(0, 1), Square::new(0, 0), true)]);
    }

    #[test]
    fn test_forced_promotion_knight() {
        let mut pos = bare_kings();
        pos.board
            .put_piece(Square::new(4, 3), Piece::new(PieceType::Knight, Color::Black));
        let moves = legal_moves_from(&mut pos, Square::new(4, 3));
        // Both jumps land on rank 1, inside the farthest two ranks.
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.is_promote()));
    }

    #[test]
    fn test_optional_promotion_yields_both() {
        let mut pos = bare_kings();
        pos.board
            .put_piece(Square::new(2, 3), Piece::new(PieceType::Pawn, Color::Black));
        let moves = legal_moves_from(&mut pos, Square::new(2, 3));
        // Entering the zone on rank 2: promoting candidate first.
        assert_eq!(
            moves,
            vec![
                Move::board(Square::new(2, 3), Square::new(2, 2), true),
                Move::board(Square::new(2, 3), Square::new(2, 2), false),
            ]
        );
    }

    #[test]
    fn test_gold_never_promotes() {
        let mut pos = bare_kings();
        pos.board
            .put_piece(Square::new(0, 2), Piece::new(PieceType::Gold, Color::Black));
        let moves = legal_moves_from(&mut pos, Square::new(0, 2));
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| !m.is_promote()));
    }

    #[test]
    fn test_pinned_piece_cannot_expose_king() {
        let mut pos = Position::empty();
        pos.board
            .put_piece(Square::new(0, 0), Piece::new(PieceType::King, Color::White));
        pos.board
            .put_piece(Square::new(4, 0), Piece::new(PieceType::Rook, Color::White));
        pos.board
            .put_piece(Square::new(4, 8), Piece::new(PieceType::King, Color::Black));
        pos.board
            .put_piece(Square::new(4, 6), Piece::new(PieceType::Silver, Color::Black));

        let moves = legal_moves_from(&mut pos, Square::new(4, 6));
        // Only the straight step keeps the rook line blocked.
        assert_eq!(moves, vec![Move::board(Square::new(4, 6), Square::new(4, 5), false)]);
    }

    #[test]
    fn test_nifu_blocks_pawn_drops_on_file() {
        let mut pos = bare_kings();
        pos.board
            .put_piece(Square::new(4, 6), Piece::new(PieceType::Pawn, Color::Black));
        pos.hands[Color::Black.index()][PieceType::Pawn.hand_index().unwrap()] = 1;

        let drops = legal_drops(&mut pos, Color::Black, PieceType::Pawn);
        assert!(!drops.is_empty());
        assert!(drops.iter().all(|m| m.to().file() != 4));

        // A promoted pawn does not count for nifu.
        pos.board.remove_piece(Square::new(4, 6));
        pos.board
            .put_piece(Square::new(4, 6), Piece::promoted(PieceType::Pawn, Color::Black));
        let drops = legal_drops(&mut pos, Color::Black, PieceType::Pawn);
        assert!(drops.iter().any(|m| m.to().file() == 4));
    }

    #[test]
    fn test_drop_rank_restrictions() {
        let mut pos = bare_kings();
        let black = Color::Black.index();
        pos.hands[black][PieceType::Pawn.hand_index().unwrap()] = 1;
        pos.hands[black][PieceType::Lance.hand_index().unwrap()] = 1;
        pos.hands[black][PieceType::Knight.hand_index().unwrap()] = 1;

        let pawn_drops = legal_drops(&mut pos, Color::Black, PieceType::Pawn);
        assert!(pawn_drops.iter().all(|m| m.to().rank() != 0));

        let lance_drops = legal_drops(&mut pos, Color::Black, PieceType::Lance);
        assert!(lance_drops.iter().all(|m| m.to().rank() != 0));

        let knight_drops = legal_drops(&mut pos, Color::Black, PieceType::Knight);
        assert!(knight_drops.iter().all(|m| m.to().rank() >= 2));
    }

    #[test]
    fn test_drops_must_resolve_check() {
        let mut pos = Position::empty();
        pos.board
            .put_piece(Square::new(0, 0), Piece::new(PieceType::King, Color::White));
        pos.board
            .put_piece(Square::new(4, 0), Piece::new(PieceType::Rook, Color::White));
        pos.board
            .put_piece(Square::new(4, 8), Piece::new(PieceType::King, Color::Black));
        pos.hands[Color::Black.index()][PieceType::Gold.hand_index().unwrap()] = 1;

        let drops = legal_drops(&mut pos, Color::Black, PieceType::Gold);
        // Only interpositions on the checking file survive the filter.
        assert_eq!(drops.len(), 7);
        assert!(drops.iter().all(|m| m.to().file() == 4));
    }

    #[test]
    fn test_legal_drops_empty_for_wrong_side_or_empty_hand() {
        let mut pos = bare_kings();
        assert!(legal_drops(&mut pos, Color::Black, PieceType::Gold).is_empty());
        pos.hands[Color::White.index()][PieceType::Gold.hand_index().unwrap()] = 1;
        assert!(legal_drops(&mut pos, Color::White, PieceType::Gold).is_empty());
        assert!(legal_drops(&mut pos, Color::Black, PieceType::King).is_empty());
    }
}
