// Negamax Search with Alpha-Beta Pruning
//
// Negamax is a variant of the minimax algorithm that simplifies implementation
// by taking advantage of the zero-sum property of chess: max(a, b) = -min(-a, -b).
// Instead of separate maximizing and minimizing functions, we use one function
// that negates the score at each level.
//
// Alpha-Beta Pruning optimizations:
// - Transposition table for position caching
// - Killer move heuristic for move ordering
// - History heuristic for quiet moves
// - Null move pruning for early cutoffs
// - Principal Variation Search (PVS) for efficiency
// - Late move reductions for quiet moves searched late
// - Quiescence search to avoid horizon effect
// - Mate distance pruning for faster mate detection
//
// Scores are fail-hard and always from the perspective of the side to move.

use crate::game_repr::{MoveList, Position};
use super::evaluation::evaluate_incremental;
use super::move_ordering::order_moves;
use super::quiescence::quiescence;
use super::search::SearchContext;
use super::transposition_table::{score_from_tt, score_to_tt, NodeType};

/// Checkmate score - use large value but leave room for mate distance
pub const MATE_SCORE: i32 = 30000;

/// Scores at least this far from zero are mates
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 100;

/// Window bound, beyond any reachable score
pub const INFINITY: i32 = 31000;

pub const DRAW_SCORE: i32 = 0;

/// Deepest ply the main search will reach, extensions included
pub const MAX_PLY: usize = 64;

/// Null move reduction depth (how much to reduce depth for null move search)
const NULL_MOVE_REDUCTION: u8 = 2;

/// Minimum depth to attempt null move pruning
const NULL_MOVE_MIN_DEPTH: u8 = 3;

const LMR_MIN_DEPTH: u8 = 3;
const LMR_MIN_MOVE_INDEX: usize = 3;

/// Negamax search with alpha-beta pruning
///
/// # Arguments
///
/// * `pos` - Current position (mutable for make/unmake moves)
/// * `ctx` - Per-search state: tables, counters, clock, PV
/// * `depth` - Remaining search depth (0 = leaf node, call quiescence)
/// * `ply` - Distance from the root
/// * `alpha` - Lower bound (best score the side to move can already guarantee)
/// * `beta` - Upper bound (best score opponent will allow)
/// * `allow_null` - False directly after a null move
///
/// # Returns
///
/// Score from the perspective of the side to move. Meaningless once
/// `ctx.is_stopped()`; callers discard it.
pub fn negamax(
    pos: &mut Position,
    ctx: &mut SearchContext,
    depth: u8,
    ply: usize,
    mut alpha: i32,
    mut beta: i32,
    allow_null: bool,
) -> i32 {
    ctx.pv.clear_ply(ply);
    if ctx.should_stop() {
        return DRAW_SCORE;
    }

    let is_root = ply == 0;
    let is_pv = beta - alpha > 1;

    if !is_root {
        if pos.halfmove_clock() >= 100 || ctx.is_repetition(pos.hash(), pos.halfmove_clock()) {
            return DRAW_SCORE;
        }

        // Mate distance pruning: even mating right here cannot beat a
        // shorter mate already found
        alpha = alpha.max(-MATE_SCORE + ply as i32);
        beta = beta.min(MATE_SCORE - ply as i32 - 1);
        if alpha >= beta {
            return alpha;
        }
    }

    if ply >= MAX_PLY - 1 {
        return evaluate_incremental(pos, &mut ctx.pawns);
    }

    let in_check = pos.in_check();
    let depth = if in_check { depth.saturating_add(1) } else { depth };

    if depth == 0 {
        return quiescence(pos, ctx, ply, 0, alpha, beta);
    }

    ctx.nodes += 1;

    // Transposition table lookup
    let hash = pos.hash();
    let mut tt_move = None;
    if let Some(entry) = ctx.tt.probe(hash) {
        ctx.tt_hits += 1;
        tt_move = entry.best_move;

        if !is_root && entry.depth >= depth {
            let score = score_from_tt(entry.score, ply);
            match entry.node_type {
                NodeType::Exact => return score.clamp(alpha, beta),
                NodeType::LowerBound if score >= beta => return beta,
                NodeType::UpperBound if score <= alpha => return alpha,
                _ => {}
            }
        }
    }

    // Null Move Pruning
    // If we can pass and still fail high, the position is too good to need
    // a full search. Skipped in check, at PV nodes, near mate scores, and
    // with only pawns left where zugzwang makes passing unsound.
    let us = pos.side_to_move();
    if allow_null
        && !is_pv
        && !in_check
        && depth >= NULL_MOVE_MIN_DEPTH
        && beta.abs() < MATE_THRESHOLD
        && pos.has_non_pawn_material(us)
    {
        let undo = pos.make_null_move();
        ctx.path.push(hash);
        let reduced_depth = depth.saturating_sub(NULL_MOVE_REDUCTION + 1);
        let null_score = -negamax(pos, ctx, reduced_depth, ply + 1, -beta, -beta + 1, false);
        ctx.path.pop();
        pos.unmake_null_move(undo);

        if ctx.is_stopped() {
            return DRAW_SCORE;
        }
        if null_score >= beta {
            return beta;
        }
    }

    let mut moves = MoveList::new();
    pos.legal_moves_into(&mut moves);

    // If no legal moves, it's either checkmate or stalemate
    if moves.is_empty() {
        return if in_check {
            -(MATE_SCORE - ply as i32)
        } else {
            DRAW_SCORE
        };
    }

    order_moves(pos, &mut moves, tt_move, &ctx.killers, &ctx.history, ply);

    let original_alpha = alpha;
    let mut best_move = None;

    for (index, &mv) in moves.iter().enumerate() {
        if index > 0 && ctx.should_stop() {
            return DRAW_SCORE;
        }

        let is_quiet = mv.is_quiet();
        let is_killer = ctx.killers.is_killer(ply, mv);

        let undo = pos.make_move(mv);
        ctx.path.push(hash);
        let gives_check = pos.in_check();
        let new_depth = depth - 1;

        let score = if index == 0 {
            // Principal Variation Search: first move gets the full window
            -negamax(pos, ctx, new_depth, ply + 1, -beta, -alpha, true)
        } else {
            let reduction = if depth >= LMR_MIN_DEPTH
                && index >= LMR_MIN_MOVE_INDEX
                && is_quiet
                && !is_killer
                && !in_check
                && !gives_check
            {
                if depth >= 6 && index >= 6 { 2 } else { 1 }
            } else {
                0
            };

            // Scout with a null window, reduced if the move is late
            let mut score = -negamax(pos, ctx, new_depth.saturating_sub(reduction), ply + 1, -alpha - 1, -alpha, true);
            if reduction > 0 && score > alpha {
                score = -negamax(pos, ctx, new_depth, ply + 1, -alpha - 1, -alpha, true);
            }
            if score > alpha && score < beta {
                score = -negamax(pos, ctx, new_depth, ply + 1, -beta, -alpha, true);
            }
            score
        };

        ctx.path.pop();
        pos.unmake_move(undo);

        if ctx.is_stopped() {
            return DRAW_SCORE;
        }

        if score > alpha {
            alpha = score;
            best_move = Some(mv);
            ctx.pv.update(ply, mv);
            if is_root {
                ctx.root_best = Some((mv, score));
            }

            if score >= beta {
                // Beta cutoff - remember quiet moves that refute this line
                if is_quiet {
                    ctx.killers.store(ply, mv);
                    ctx.history.update(us, mv, depth);
                }
                ctx.tt.store(hash, depth, score_to_tt(beta, ply), NodeType::LowerBound, Some(mv));
                return beta;
            }
        }
    }

    let node_type = if alpha > original_alpha {
        NodeType::Exact
    } else {
        NodeType::UpperBound
    };
    ctx.tt.store(hash, depth, score_to_tt(alpha, ply), node_type, best_move);

    alpha
}

/// Helper function to detect if a score represents a mate
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}

/// Get the number of moves until mate from a mate score
/// Returns None if not a mate score, negative when the side to move is mated
pub fn mate_distance(score: i32) -> Option<i32> {
    if !is_mate_score(score) {
        return None;
    }

    if score > 0 {
        Some((MATE_SCORE - score + 1) / 2)
    } else {
        Some(-(MATE_SCORE + score + 1) / 2)
    }
}
