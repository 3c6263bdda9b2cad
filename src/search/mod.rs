//! Move choice at three difficulty levels.
//!
//! Every level operates on a private working copy, so the caller's state
//! is never mutated. A `None` result means no legal action exists; the
//! caller distinguishes checkmate from stalemate via
//! [`Position::is_in_check`].

use crate::eval::evaluate;
use crate::movegen;
use crate::position::Position;
use crate::types::{Color, Move};
use log::debug;
use rand::Rng;

/// Difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Uniform random choice among all legal actions
    Random,
    /// One-ply greedy: maximize the evaluation after each action
    Greedy,
    /// Alpha-beta minimax with capture-only quiescence at the leaves
    AlphaBeta,
}

/// Nominal search depth for [`Level::AlphaBeta`]
pub const SEARCH_DEPTH: i32 = 2;

/// Evaluation offset applied to a position whose side to move has no
/// legal action, in place of a distinct terminal-state code
const NO_MOVE_OFFSET: f64 = 2000.0;

/// Choose a move for `side` at the given level, or `None` if no legal
/// action exists.
pub fn choose_move(pos: &Position, side: Color, level: Level) -> Option<Move> {
    choose_move_with(pos, side, level, &mut rand::rng())
}

/// [`choose_move`] with a caller-supplied RNG (only Level 1 draws from it).
pub fn choose_move_with<R: Rng>(
    pos: &Position,
    side: Color,
    level: Level,
    rng: &mut R,
) -> Option<Move> {
    let chosen = match level {
        Level::Random => choose_random(pos, side, rng),
        Level::Greedy => choose_greedy(pos, side),
        Level::AlphaBeta => choose_alpha_beta(pos, side),
    };
    match chosen {
        Some(mv) => debug!("{level:?} chose {mv} for {side:?}"),
        None => debug!("{level:?} found no legal action for {side:?}"),
    }
    chosen
}

/// Clone the caller's state and put `side` on the move
fn working_copy(pos: &Position, side: Color) -> Position {
    let mut work = pos.clone();
    work.side_to_move = side;
    work
}

fn choose_random<R: Rng>(pos: &Position, side: Color, rng: &mut R) -> Option<Move> {
    let mut work = working_copy(pos, side);
    let moves = movegen::all_legal_moves(&mut work);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.random_range(0..moves.len())])
}

fn choose_greedy(pos: &Position, side: Color) -> Option<Move> {
    let mut work = working_copy(pos, side);
    let mut best = None;
    let mut best_score = f64::NEG_INFINITY;
    for mv in movegen::all_legal_moves(&mut work) {
        let undo = work.do_move(mv);
        let score = evaluate(&mut work, side);
        work.undo_move(mv, undo);
        // Strict comparison keeps the first-seen move on ties.
        if score > best_score {
            best_score = score;
            best = Some(mv);
        }
    }
    best
}

fn choose_alpha_beta(pos: &Position, side: Color) -> Option<Move> {
    let mut work = working_copy(pos, side);
    search_root(&mut work, side, SEARCH_DEPTH).map(|(mv, _)| mv)
}

/// Root of the alpha-beta search: each root move is searched with a fresh
/// full-width window; the best score and move win, first seen on ties.
pub(crate) fn search_root(pos: &mut Position, ai_side: Color, depth: i32) -> Option<(Move, f64)> {
    let mut best = None;
    let mut best_score = f64::NEG_INFINITY;
    for mv in movegen::all_legal_moves(pos) {
        let undo = pos.do_move(mv);
        let score = alpha_beta(pos, ai_side, depth - 1, f64::NEG_INFINITY, f64::INFINITY);
        pos.undo_move(mv, undo);
        if score > best_score {
            best_score = score;
            best = Some((mv, score));
        }
    }
    best
}

/// Minimax with fail-hard alpha-beta cutoffs: maximizing on `ai_side`'s
/// plies, minimizing on the opponent's.
fn alpha_beta(pos: &mut Position, ai_side: Color, depth: i32, mut alpha: f64, mut beta: f64) -> f64 {
    if depth == 0 {
        return quiescence(pos, alpha, beta, ai_side);
    }

    let to_move = pos.side_to_move;
    let moves = movegen::all_legal_moves(pos);
    if moves.is_empty() {
        // No legal action scores as the static evaluation shifted by a
        // large constant against the side that is stuck.
        let stand = evaluate(pos, ai_side);
        return if to_move == ai_side {
            stand - NO_MOVE_OFFSET
        } else {
            stand + NO_MOVE_OFFSET
        };
    }

    if to_move == ai_side {
        let mut value = f64::NEG_INFINITY;
        for mv in moves {
            let undo = pos.do_move(mv);
            let score = alpha_beta(pos, ai_side, depth - 1, alpha, beta);
            pos.undo_move(mv, undo);
            if score > value {
                value = score;
            }
            if value > alpha {
                alpha = value;
            }
            if alpha >= beta {
                break;
            }
        }
        value
    } else {
        let mut value = f64::INFINITY;
        for mv in moves {
            let undo = pos.do_move(mv);
            let score = alpha_beta(pos, ai_side, depth - 1, alpha, beta);
            pos.undo_move(mv, undo);
            if score < value {
                value = score;
            }
            if value < beta {
                beta = value;
            }
            if alpha >= beta {
                break;
            }
        }
        value
    }
}

/// Capture-only quiescence search (negamax) for the side to move.
///
/// The stand-pat score bounds the window; recursion is limited to moves
/// that capture, so it shrinks naturally with the capturable material.
fn quiescence(pos: &mut Position, mut alpha: f64, beta: f64, side: Color) -> f64 {
    let stand_pat = evaluate(pos, side);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let captures: Vec<Move> = movegen::all_legal_moves(pos)
        .into_iter()
        .filter(|mv| !mv.is_drop() && pos.board.piece_on(mv.to()).is_some())
        .collect();

    for mv in captures {
        let undo = pos.do_move(mv);
        let score = -quiescence(pos, -beta, -alpha, side.opponent());
        pos.undo_move(mv, undo);
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }
    alpha
}
