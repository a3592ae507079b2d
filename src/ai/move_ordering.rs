// Move ordering for alpha-beta search
//
// Order in which moves are tried:
// 1. The transposition table move
// 2. Captures and promotions, MVV-LVA (Most Valuable Victim - Least Valuable Attacker)
// 3. The two killer moves remembered for this ply
// 4. Remaining quiet moves by history score, ties broken by piece-square gain

use std::cmp::Reverse;

use crate::game_repr::{Color, Move, MoveList, Position, Type};
use super::evaluation::{move_delta, piece_value};
use super::negamax::MAX_PLY;

const TT_MOVE_SCORE: i32 = 1_000_000;
const CAPTURE_SCORE: i32 = 100_000;
const KILLER_SCORES: [i32; 2] = [90_000, 89_000];

/// History entries are halved once any of them grows past this
const HISTORY_LIMIT: i32 = 10_000;

/// Get material value for MVV-LVA. A king never gets captured, but it
/// does attack, and should look like the most expensive attacker.
fn piece_value_for_mvv_lva(piece_type: Type) -> i32 {
    match piece_type {
        Type::King => 10_000,
        other => piece_value(other),
    }
}

/// MVV-LVA score for captures and promotions, 0 for quiet moves.
/// Taking a queen with a pawn sorts ahead of taking it with a rook.
pub fn mvv_lva(mv: Move) -> i32 {
    let mut score = 0;
    if let Some(victim) = mv.captured() {
        score += piece_value_for_mvv_lva(victim) * 10 - piece_value_for_mvv_lva(mv.piece()) / 10;
    }
    if let Some(promoted) = mv.promoted_to() {
        score += piece_value(promoted) * 10;
    }
    score
}

/// Killer moves: quiet moves that caused a beta cutoff at the same ply
/// in a sibling subtree. Two slots per ply, newest first.
#[derive(Clone)]
pub struct KillerMoves {
    moves: [[Option<Move>; 2]; MAX_PLY],
}

impl KillerMoves {
    pub fn new() -> Self {
        Self {
            moves: [[None; 2]; MAX_PLY],
        }
    }

    pub fn store(&mut self, ply: usize, mv: Move) {
        let Some(slots) = self.moves.get_mut(ply) else {
            return;
        };
        if slots[0] != Some(mv) {
            slots[1] = slots[0];
            slots[0] = Some(mv);
        }
    }

    /// Slot index (0 = most recent) if `mv` is a killer at `ply`
    pub fn slot(&self, ply: usize, mv: Move) -> Option<usize> {
        self.moves.get(ply)?.iter().position(|k| *k == Some(mv))
    }

    pub fn is_killer(&self, ply: usize, mv: Move) -> bool {
        self.slot(ply, mv).is_some()
    }

    pub fn clear(&mut self) {
        self.moves = [[None; 2]; MAX_PLY];
    }
}

impl Default for KillerMoves {
    fn default() -> Self {
        Self::new()
    }
}

/// History heuristic: how often a quiet (color, from, to) move has cut off,
/// weighted by the depth it cut off at
#[derive(Clone)]
pub struct HistoryTable {
    scores: Box<[[[i32; 64]; 64]; 2]>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            scores: Box::new([[[0; 64]; 64]; 2]),
        }
    }

    pub fn update(&mut self, color: Color, mv: Move, depth: u8) {
        let bonus = i32::from(depth) * i32::from(depth);
        let entry = &mut self.scores[color.index()][mv.from()][mv.to()];
        *entry += bonus;
        if *entry > HISTORY_LIMIT {
            self.age();
        }
    }

    #[inline]
    pub fn get(&self, color: Color, mv: Move) -> i32 {
        self.scores[color.index()][mv.from()][mv.to()]
    }

    /// Halve every entry so old successes fade
    pub fn age(&mut self) {
        self.scores
            .iter_mut()
            .flatten()
            .flatten()
            .for_each(|s| *s /= 2);
    }

    pub fn clear(&mut self) {
        self.scores = Box::new([[[0; 64]; 64]; 2]);
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Score a single move for ordering purposes
/// Returns higher scores for moves that should be searched first
pub fn score_move(
    pos: &Position,
    mv: Move,
    tt_move: Option<Move>,
    killers: &KillerMoves,
    history: &HistoryTable,
    ply: usize,
) -> i32 {
    if tt_move == Some(mv) {
        return TT_MOVE_SCORE;
    }
    if !mv.is_quiet() {
        return CAPTURE_SCORE + mvv_lva(mv);
    }
    if let Some(slot) = killers.slot(ply, mv) {
        return KILLER_SCORES[slot];
    }

    let us = pos.side_to_move();
    let delta = move_delta(pos, mv);
    let positional_gain = match us {
        Color::White => delta.mg + delta.eg,
        Color::Black => -(delta.mg + delta.eg),
    } / 2;
    history.get(us, mv) + positional_gain
}

/// Sort moves in place, best first. Equal scores keep generation order,
/// so the result is deterministic.
pub fn order_moves(
    pos: &Position,
    moves: &mut MoveList,
    tt_move: Option<Move>,
    killers: &KillerMoves,
    history: &HistoryTable,
    ply: usize,
) {
    moves.sort_by_cached_key(|mv| Reverse(score_move(pos, *mv, tt_move, killers, history, ply)));
}

/// Ordering for quiescence: MVV-LVA only
pub fn order_captures(moves: &mut MoveList) {
    moves.sort_by_cached_key(|mv| Reverse(mvv_lva(*mv)));
}
