// Quiescence Search - Tactical Stability Extension
//
// When the main search runs out of depth in the middle of an exchange, the
// static evaluation is misleading: stopping right after a queen capture
// but before the recapture would look like winning a queen. Quiescence
// search keeps going with "noisy" moves only (captures, promotions, and
// checks on its first ply) until the position is quiet.
//
// Key optimizations implemented:
// 1. Stand-pat: Current evaluation can cause beta cutoff without searching
// 2. Delta pruning: Skip captures that can't possibly improve alpha
// 3. MVV-LVA ordering: Search most promising captures first
// 4. Depth limit: Prevent unbounded recursion in long capture chains
//
// When the side to move is in check there is no stand-pat: every evasion
// is searched, and having none is checkmate.

use crate::game_repr::{MoveList, Position};
use super::evaluation::{evaluate_incremental, piece_value, PAWN_VALUE, QUEEN_VALUE};
use super::move_ordering::order_captures;
use super::negamax::{DRAW_SCORE, MATE_SCORE};
use super::search::SearchContext;

/// Maximum depth for quiescence search
pub const MAX_QSEARCH_DEPTH: usize = 8;

// Delta pruning margin - safety buffer for positional compensation
const DELTA_MARGIN: i32 = 200;

/// Quiescence search - search until position is quiet
///
/// # Arguments
///
/// * `pos` - Current position (mutable for make/unmake moves)
/// * `ctx` - Per-search state, for node counting and the clock
/// * `ply` - Distance from the root, for mate scoring
/// * `qs_ply` - Plies already spent in quiescence
/// * `alpha` - Lower bound
/// * `beta` - Upper bound
///
/// # Returns
///
/// Score from the perspective of the side to move
pub fn quiescence(
    pos: &mut Position,
    ctx: &mut SearchContext,
    ply: usize,
    qs_ply: usize,
    mut alpha: i32,
    beta: i32,
) -> i32 {
    if ctx.should_stop() {
        return DRAW_SCORE;
    }
    ctx.nodes += 1;

    if qs_ply >= MAX_QSEARCH_DEPTH {
        return evaluate_incremental(pos, &mut ctx.pawns);
    }

    let in_check = pos.in_check();
    let mut moves = MoveList::new();

    let stand_pat = if in_check {
        pos.legal_moves_into(&mut moves);
        if moves.is_empty() {
            return -(MATE_SCORE - ply as i32);
        }
        None
    } else {
        // Stand-pat: the side to move may decline every capture
        let stand_pat = evaluate_incremental(pos, &mut ctx.pawns);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        // Even winning a queen and promoting cannot catch up
        if stand_pat + QUEEN_VALUE + (QUEEN_VALUE - PAWN_VALUE) + DELTA_MARGIN < alpha {
            return alpha;
        }

        pos.generate_tactical(qs_ply == 0, &mut moves);
        Some(stand_pat)
    };

    order_captures(&mut moves);

    for (index, &mv) in moves.iter().enumerate() {
        if index > 0 && ctx.should_stop() {
            return DRAW_SCORE;
        }

        // Delta pruning per move: skip captures that can't improve alpha
        if let Some(stand_pat) = stand_pat {
            if !mv.is_quiet() {
                let gain = mv.captured().map_or(0, piece_value)
                    + mv.promoted_to().map_or(0, |p| piece_value(p) - PAWN_VALUE);
                if stand_pat + gain + DELTA_MARGIN < alpha {
                    continue;
                }
            }
        }

        let undo = pos.make_move(mv);
        let score = -quiescence(pos, ctx, ply + 1, qs_ply + 1, -beta, -alpha);
        pos.unmake_move(undo);

        if ctx.is_stopped() {
            return DRAW_SCORE;
        }

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::evaluation::evaluate;
    use crate::ai::negamax::INFINITY;
    use crate::ai::search::SearchLimits;
    use crate::ai::transposition_table::TranspositionTable;

    fn qsearch(fen: &str) -> (i32, Position) {
        let mut pos = Position::from_fen(fen).unwrap();
        let mut tt = TranspositionTable::with_capacity(1024);
        let mut ctx = SearchContext::new(&mut tt, SearchLimits::depth(1));
        let score = quiescence(&mut pos, &mut ctx, 0, 0, -INFINITY, INFINITY);
        (score, pos)
    }

    #[test]
    fn test_quiet_position_returns_stand_pat() {
        let (score, pos) = qsearch("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(score, evaluate(&pos));
    }

    #[test]
    fn test_depth_cap_returns_static_eval() {
        let fen = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1";
        let mut pos = Position::from_fen(fen).unwrap();
        let mut tt = TranspositionTable::with_capacity(1024);
        let mut ctx = SearchContext::new(&mut tt, SearchLimits::depth(1));

        // At the cap the hanging queen is left alone
        let capped = quiescence(&mut pos, &mut ctx, MAX_QSEARCH_DEPTH, MAX_QSEARCH_DEPTH, -INFINITY, INFINITY);
        assert_eq!(capped, evaluate(&pos));
        assert_eq!(ctx.nodes, 1);

        // One ply short of it the capture is still searched
        let last = MAX_QSEARCH_DEPTH - 1;
        let score = quiescence(&mut pos, &mut ctx, last, last, -INFINITY, INFINITY);
        assert!(score > evaluate(&pos) + 700, "score {}", score);
        assert_eq!(pos, Position::from_fen(fen).unwrap());
    }

    #[test]
    fn test_wins_hanging_queen() {
        let fen = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1";
        let (score, pos) = qsearch(fen);
        assert_eq!(pos, Position::from_fen(fen).unwrap(), "position restored");
        assert!(score > evaluate(&pos) + 700, "score {}", score);
    }

    #[test]
    fn test_does_not_take_defended_pawn_with_rook() {
        // Rxd5 loses the rook to exd5, so stand-pat stays best
        let (score, pos) = qsearch("4k3/8/4p3/3p4/8/8/8/3R3K w - - 0 1");
        assert_eq!(score, evaluate(&pos));
    }

    #[test]
    fn test_checkmate_detected_in_check() {
        let (score, _) = qsearch("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(score, -MATE_SCORE);
    }

    #[test]
    fn test_quiet_check_found_at_first_ply() {
        // Ra8 is mate and captures nothing
        let (score, _) = qsearch("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        assert_eq!(score, MATE_SCORE - 1);
    }
}
