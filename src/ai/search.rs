// Iterative Deepening Search Orchestrator
//
// Searches depth 1, 2, 3, ... until the target depth is done or the clock
// runs out, reusing the transposition table and ordering tables of earlier
// iterations. From depth 4 on each iteration starts with an aspiration
// window around the previous score. An iteration interrupted by the clock
// is thrown away; the answer is always the last completed depth.

use std::time::Duration;

use cfg_if::cfg_if;
use log::{debug, info, trace, warn};

use crate::game_repr::{Move, MoveList, Position};
use super::move_ordering::{order_moves, HistoryTable, KillerMoves};
use super::negamax::{is_mate_score, mate_distance, negamax, DRAW_SCORE, INFINITY, MATE_SCORE, MAX_PLY};
use super::pawn_structure::PawnHashTable;
use super::transposition_table::TranspositionTable;

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        use web_time::Instant;
    } else {
        use std::time::Instant;
    }
}

/// How often (in node visits and move-loop steps) the clock is read
const TIME_CHECK_INTERVAL: u64 = 1024;

const ASPIRATION_MIN_DEPTH: u8 = 4;
const ASPIRATION_ATTEMPTS: u32 = 3;

/// What bounds a search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    /// Deepest iteration to run
    pub depth: u8,
    /// Wall-clock budget, none for depth-only searches
    pub time_limit: Option<Duration>,
    /// Node budget, checked at the same interval as the clock
    pub node_limit: Option<u64>,
    /// Half-width of the aspiration window in centipawns
    pub aspiration_window: i32,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            time_limit: None,
            node_limit: None,
            aspiration_window: 50,
        }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    /// Half-width in centipawns, kept within `1..=INFINITY`
    pub fn with_aspiration_window(mut self, window: i32) -> Self {
        self.aspiration_window = window.clamp(1, INFINITY);
        self
    }
}

/// Result of a search operation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// None only when the side to move has no legal moves
    pub best_move: Option<Move>,
    pub score: i32,
    /// Last fully completed depth, 0 if none completed
    pub depth_reached: u8,
    pub nodes_searched: u64,
    pub tt_hits: u64,
    pub elapsed: Duration,
    /// Principal variation of the last completed depth
    pub pv: Vec<Move>,
    /// Full moves to mate, negative when the side to move is being mated
    pub mate_in: Option<i32>,
}

impl SearchResult {
    /// Create a new search result with no move found
    pub fn new() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth_reached: 0,
            nodes_searched: 0,
            tt_hits: 0,
            elapsed: Duration::ZERO,
            pv: Vec::new(),
            mate_in: None,
        }
    }

    pub fn time_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    pub fn nps(&self) -> u64 {
        let micros = self.elapsed.as_micros() as u64;
        if micros == 0 {
            self.nodes_searched
        } else {
            self.nodes_searched * 1_000_000 / micros
        }
    }
}

impl Default for SearchResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Triangular principal variation table: `lines[ply]` is the best line
/// found so far from that ply down
pub struct PvTable {
    lines: Vec<Vec<Move>>,
}

impl PvTable {
    fn new() -> Self {
        Self {
            lines: (0..=MAX_PLY).map(|_| Vec::with_capacity(MAX_PLY)).collect(),
        }
    }

    pub(crate) fn clear_ply(&mut self, ply: usize) {
        if let Some(line) = self.lines.get_mut(ply) {
            line.clear();
        }
    }

    /// `mv` followed by the line of the child node
    pub(crate) fn update(&mut self, ply: usize, mv: Move) {
        if ply + 1 >= self.lines.len() {
            return;
        }
        let (head, tail) = self.lines.split_at_mut(ply + 1);
        let line = &mut head[ply];
        line.clear();
        line.push(mv);
        line.extend_from_slice(&tail[0]);
    }

    pub fn line(&self, ply: usize) -> &[Move] {
        self.lines.get(ply).map_or(&[], |l| l.as_slice())
    }
}

/// Mutable state of one top-level search call
pub struct SearchContext<'a> {
    pub(crate) tt: &'a mut TranspositionTable,
    /// Pawn structure cache, local to this search
    pub(crate) pawns: PawnHashTable,
    pub nodes: u64,
    pub tt_hits: u64,
    pub killers: KillerMoves,
    pub history: HistoryTable,
    pub(crate) pv: PvTable,
    /// Hashes of the positions between the root and the current node
    pub(crate) path: Vec<u64>,
    /// Best root move of the iteration in progress, with its score
    pub(crate) root_best: Option<(Move, i32)>,
    limits: SearchLimits,
    start: Instant,
    polls: u64,
    stopped: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(tt: &'a mut TranspositionTable, limits: SearchLimits) -> Self {
        Self {
            tt,
            pawns: PawnHashTable::new(),
            nodes: 0,
            tt_hits: 0,
            killers: KillerMoves::new(),
            history: HistoryTable::new(),
            pv: PvTable::new(),
            path: Vec::with_capacity(MAX_PLY + 8),
            root_best: None,
            limits,
            start: Instant::now(),
            polls: 0,
            stopped: false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Cooperative stop check. Reads the clock once every
    /// `TIME_CHECK_INTERVAL` calls; once tripped it stays tripped.
    pub(crate) fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        self.polls += 1;
        if self.polls % TIME_CHECK_INTERVAL == 0 {
            self.stopped = self.out_of_budget();
        }
        self.stopped
    }

    fn out_of_budget(&self) -> bool {
        let out_of_time = self.limits.time_limit.is_some_and(|limit| self.elapsed() >= limit);
        let out_of_nodes = self.limits.node_limit.is_some_and(|max| self.nodes >= max);
        out_of_time || out_of_nodes
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether `hash` already occurred on the current path with the same
    /// side to move, no further back than the last irreversible move
    pub(crate) fn is_repetition(&self, hash: u64, halfmove_clock: u16) -> bool {
        let window = usize::from(halfmove_clock).min(self.path.len());
        self.path
            .iter()
            .rev()
            .take(window)
            .skip(1)
            .step_by(2)
            .any(|&h| h == hash)
    }
}

/// Perform iterative deepening search to find the best move
///
/// # Arguments
/// * `pos` - Position to search (left unchanged)
/// * `tt` - Transposition table, kept between searches by the caller
/// * `limits` - Depth, time and node budget
///
/// # Returns
/// SearchResult with the best move of the last completed depth. The move is
/// only None when the side to move has no legal moves.
pub fn iterative_deepening(pos: &Position, tt: &mut TranspositionTable, limits: SearchLimits) -> SearchResult {
    tt.new_search();
    let mut ctx = SearchContext::new(tt, limits);
    let mut search_pos = pos.clone();
    let mut result = SearchResult::new();

    let mut root_moves = MoveList::new();
    search_pos.legal_moves_into(&mut root_moves);
    if root_moves.is_empty() {
        result.score = if search_pos.in_check() { -MATE_SCORE } else { DRAW_SCORE };
        result.mate_in = mate_distance(result.score);
        result.elapsed = ctx.elapsed();
        info!("search: no legal moves, score {}", result.score);
        return result;
    }

    let max_depth = limits.depth.clamp(1, (MAX_PLY - 1) as u8);
    let mut prev_score = 0;

    for depth in 1..=max_depth {
        if depth > 1 && limits.time_limit.is_some_and(|limit| ctx.elapsed() >= limit) {
            break;
        }
        ctx.root_best = None;

        let score = aspiration_search(&mut search_pos, &mut ctx, depth, prev_score);

        if ctx.is_stopped() {
            trace!(
                "depth {} interrupted after {} nodes, keeping depth {}",
                depth,
                ctx.nodes,
                result.depth_reached
            );
            break;
        }

        let Some(&best) = ctx.pv.line(0).first() else {
            break;
        };

        prev_score = score;
        result.best_move = Some(best);
        result.score = score;
        result.depth_reached = depth;
        result.pv = ctx.pv.line(0).to_vec();
        result.mate_in = mate_distance(score);
        result.nodes_searched = ctx.nodes;
        result.tt_hits = ctx.tt_hits;
        result.elapsed = ctx.elapsed();

        debug!("{}", info_line(&result));

        // A forced mate will not change with more depth
        if is_mate_score(score) {
            break;
        }
    }

    if result.best_move.is_none() {
        // Not even depth 1 finished
        match ctx.root_best {
            Some((mv, score)) => {
                result.best_move = Some(mv);
                result.score = score;
                result.pv = vec![mv];
            }
            None => {
                order_moves(&search_pos, &mut root_moves, None, &ctx.killers, &ctx.history, 0);
                warn!("no depth completed, falling back to unsearched move {}", root_moves[0]);
                result.best_move = Some(root_moves[0]);
                result.pv = vec![root_moves[0]];
            }
        }
    }

    result.nodes_searched = ctx.nodes;
    result.tt_hits = ctx.tt_hits;
    result.elapsed = ctx.elapsed();

    info!(
        "search: bestmove {} depth {} score {} nodes {} tt_hits {} time {}ms nps {}",
        result.best_move.map_or_else(|| "none".to_string(), |m| m.to_string()),
        result.depth_reached,
        result.score,
        result.nodes_searched,
        result.tt_hits,
        result.time_ms(),
        result.nps()
    );

    result
}

/// One iteration at the root. Shallow depths and mate scores use the full
/// window; otherwise a window around the previous score is tried and
/// widened on failure, falling back to the full window.
fn aspiration_search(pos: &mut Position, ctx: &mut SearchContext, depth: u8, prev_score: i32) -> i32 {
    if depth < ASPIRATION_MIN_DEPTH || is_mate_score(prev_score) {
        return negamax(pos, ctx, depth, 0, -INFINITY, INFINITY, true);
    }

    let mut window = ctx.limits.aspiration_window.clamp(1, INFINITY);
    let mut alpha = prev_score.saturating_sub(window).max(-INFINITY);
    let mut beta = prev_score.saturating_add(window).min(INFINITY);

    for attempt in 1..=ASPIRATION_ATTEMPTS {
        let score = negamax(pos, ctx, depth, 0, alpha, beta, true);
        if ctx.is_stopped() || (score > alpha && score < beta) {
            return score;
        }

        window = window.saturating_mul(4).min(INFINITY);
        if score <= alpha {
            alpha = score.saturating_sub(window).max(-INFINITY);
        } else {
            beta = score.saturating_add(window).min(INFINITY);
        }
        debug!(
            "depth {} aspiration miss {} (score {}), re-search with [{}, {}]",
            depth, attempt, score, alpha, beta
        );
    }

    negamax(pos, ctx, depth, 0, -INFINITY, INFINITY, true)
}

/// "info depth 5 score cp 31 nodes 10234 time 12 nps 852833 pv e2e4 e7e5"
fn info_line(result: &SearchResult) -> String {
    let score = match result.mate_in {
        Some(moves) => format!("mate {}", moves),
        None => format!("cp {}", result.score),
    };
    let pv: Vec<String> = result.pv.iter().map(|m| m.to_string()).collect();
    format!(
        "info depth {} score {} nodes {} time {} nps {} pv {}",
        result.depth_reached,
        score,
        result.nodes_searched,
        result.time_ms(),
        result.nps(),
        pv.join(" ")
    )
}
