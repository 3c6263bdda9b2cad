//! Heuristic position evaluation.
//!
//! Material + hand material + a small advancement bonus, plus mobility and
//! check terms. Scores are signed so positive favors the side passed in.
//! The constants are untuned hand choices; keep them stable for behavioral
//! parity across the search levels.

use crate::movegen;
use crate::position::Position;
use crate::types::{Color, PieceType, Square, HAND_PIECE_TYPES};

/// Bonus per rank advanced from the owner's home edge (unpromoted
/// pawn/knight/silver only)
const ADVANCE_WEIGHT: f64 = 0.05;

/// Weight per legal move of mobility difference
const MOBILITY_WEIGHT: f64 = 0.05;

/// Penalty while the evaluated side's own king is attacked
const OWN_CHECK_PENALTY: f64 = 1.2;

/// Bonus while the opponent's king is attacked
const OPP_CHECK_BONUS: f64 = 1.0;

/// Material balance from `side`'s point of view: board pieces (with
/// promotion bonuses and the advancement term) plus pieces in hand.
pub fn material_score(pos: &Position, side: Color) -> f64 {
    let mut score = 0.0;

    for sq in Square::all() {
        let Some(piece) = pos.board.piece_on(sq) else {
            continue;
        };
        let sign = if piece.color == side { 1.0 } else { -1.0 };
        score += sign * piece.value();

        if !piece.promoted
            && matches!(
                piece.piece_type,
                PieceType::Pawn | PieceType::Knight | PieceType::Silver
            )
        {
            let advanced = (sq.rank() as i16 - piece.color.home_rank() as i16).unsigned_abs();
            score += sign * ADVANCE_WEIGHT * advanced as f64;
        }
    }

    for owner in [side, side.opponent()] {
        let sign = if owner == side { 1.0 } else { -1.0 };
        for (idx, pt) in HAND_PIECE_TYPES.iter().enumerate() {
            let count = pos.hands[owner.index()][idx];
            score += sign * count as f64 * pt.base_value();
        }
    }

    score
}

/// Full heuristic score of `pos` from `side`'s point of view.
///
/// Mobility counts each side's full legal enumeration with the turn
/// temporarily set to that side, which dominates the cost; the turn is
/// restored before returning.
pub fn evaluate(pos: &mut Position, side: Color) -> f64 {
    let mut score = material_score(pos, side);

    let saved_turn = pos.side_to_move;
    pos.side_to_move = side;
    let my_moves = movegen::all_legal_moves(pos).len();
    pos.side_to_move = side.opponent();
    let opp_moves = movegen::all_legal_moves(pos).len();
    pos.side_to_move = saved_turn;
    score += MOBILITY_WEIGHT * (my_moves as f64 - opp_moves as f64);

    if movegen::is_in_check(&pos.board, side) {
        score -= OWN_CHECK_PENALTY;
    }
    if movegen::is_in_check(&pos.board, side.opponent()) {
        score += OPP_CHECK_BONUS;
    }

    score
}
