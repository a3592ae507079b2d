// Position evaluation function
// Returns score in centipawns (positive = good for side to move)
//
// The score is material plus piece-square tables, a bishop pair bonus,
// pawn structure and king pawn shields, tapered between middlegame and
// endgame by the amount of non-pawn material left.
//
// Material and piece-square values are a sum over pieces, so `Position`
// keeps that total up to date as pieces are placed and removed. Pawn
// structure comes from a cache keyed by the pawn formation. Together they
// let the search evaluate a leaf without rescanning the board.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::game_repr::{popcount, pop_lsb, Color, Move, MoveType, Piece, Position, Type};
use super::pawn_structure::{king_shield, pawn_structure, PawnHashTable};
use super::piece_square_tables::pst_value;

// Material values in centipawns
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 320;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

// Phase values for game phase calculation
const KNIGHT_PHASE: i32 = 1;
const BISHOP_PHASE: i32 = 1;
const ROOK_PHASE: i32 = 2;
const QUEEN_PHASE: i32 = 4;
const TOTAL_PHASE: i32 = KNIGHT_PHASE * 4 + BISHOP_PHASE * 4 + ROOK_PHASE * 4 + QUEEN_PHASE * 2;

const BISHOP_PAIR_BONUS: TaperedScore = TaperedScore { mg: 40, eg: 50 };

/// Tapered evaluation score with middlegame and endgame components
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaperedScore {
    pub mg: i32, // Middlegame score
    pub eg: i32, // Endgame score
}

impl TaperedScore {
    pub const fn new(mg: i32, eg: i32) -> Self {
        Self { mg, eg }
    }

    /// Interpolate between middlegame and endgame scores based on game phase
    /// phase: 0 (endgame) to 256 (opening)
    pub fn interpolate(&self, phase: i32) -> i32 {
        ((self.mg * phase) + (self.eg * (256 - phase))) / 256
    }
}

impl Add for TaperedScore {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.mg + other.mg, self.eg + other.eg)
    }
}

impl Sub for TaperedScore {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.mg - other.mg, self.eg - other.eg)
    }
}

impl Neg for TaperedScore {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.mg, -self.eg)
    }
}

impl Mul<i32> for TaperedScore {
    type Output = Self;
    fn mul(self, factor: i32) -> Self {
        Self::new(self.mg * factor, self.eg * factor)
    }
}

impl AddAssign for TaperedScore {
    fn add_assign(&mut self, other: Self) {
        self.mg += other.mg;
        self.eg += other.eg;
    }
}

impl SubAssign for TaperedScore {
    fn sub_assign(&mut self, other: Self) {
        self.mg -= other.mg;
        self.eg -= other.eg;
    }
}

/// Get material value for a piece type
pub fn piece_value(piece_type: Type) -> i32 {
    match piece_type {
        Type::Pawn => PAWN_VALUE,
        Type::Knight => KNIGHT_VALUE,
        Type::Bishop => BISHOP_VALUE,
        Type::Rook => ROOK_VALUE,
        Type::Queen => QUEEN_VALUE,
        Type::King => 0, // King has no material value
    }
}

/// Contribution of one piece to the game phase
#[inline]
pub fn phase_weight(piece_type: Type) -> i32 {
    match piece_type {
        Type::Knight => KNIGHT_PHASE,
        Type::Bishop => BISHOP_PHASE,
        Type::Rook => ROOK_PHASE,
        Type::Queen => QUEEN_PHASE,
        Type::Pawn | Type::King => 0,
    }
}

/// Material plus piece-square value of a single piece, signed so that
/// white pieces count positive and black pieces negative
#[inline]
pub fn piece_square_score(piece: Piece, square: usize) -> TaperedScore {
    let value = piece_value(piece.piece_type);
    let (mg, eg) = pst_value(piece.piece_type, square, piece.color);
    let score = TaperedScore::new(value + mg, value + eg);
    match piece.color {
        Color::White => score,
        Color::Black => -score,
    }
}

/// Scale raw phase (0..=TOTAL_PHASE) to 0 (endgame) ..= 256 (opening)
fn scaled_phase(raw_phase: i32) -> i32 {
    let phase = raw_phase.clamp(0, TOTAL_PHASE);
    (phase * 256 + TOTAL_PHASE / 2) / TOTAL_PHASE
}

fn bishop_pair(pos: &Position) -> TaperedScore {
    let mut score = TaperedScore::default();
    if popcount(pos.bitboards().pieces_of_type(Color::White, Type::Bishop)) >= 2 {
        score += BISHOP_PAIR_BONUS;
    }
    if popcount(pos.bitboards().pieces_of_type(Color::Black, Type::Bishop)) >= 2 {
        score -= BISHOP_PAIR_BONUS;
    }
    score
}

fn king_shields(pos: &Position) -> TaperedScore {
    king_shield(pos, Color::White) - king_shield(pos, Color::Black)
}

fn from_side_to_move(pos: &Position, white_score: i32) -> i32 {
    match pos.side_to_move() {
        Color::White => white_score,
        Color::Black => -white_score,
    }
}

/// Full evaluation from white's point of view, rescanning every piece
pub fn evaluate_white(pos: &Position) -> i32 {
    let mut total = TaperedScore::default();
    let mut phase = 0;

    for color in [Color::White, Color::Black] {
        for piece_type in Type::ALL {
            let mut bb = pos.bitboards().pieces_of_type(color, piece_type);
            while bb != 0 {
                let sq = pop_lsb(&mut bb);
                total += piece_square_score(Piece::new(color, piece_type), sq);
                phase += phase_weight(piece_type);
            }
        }
    }

    let bb = pos.bitboards();
    total += bishop_pair(pos);
    total += pawn_structure(
        bb.pieces_of_type(Color::White, Type::Pawn),
        bb.pieces_of_type(Color::Black, Type::Pawn),
    );
    total += king_shields(pos);
    total.interpolate(scaled_phase(phase))
}

/// Evaluate position from the side to move's perspective by rescanning the board
pub fn evaluate(pos: &Position) -> i32 {
    from_side_to_move(pos, evaluate_white(pos))
}

/// Same score as [`evaluate`], read from the running totals the position
/// maintains through make/unmake and the pawn structure cache instead of
/// rescanning
#[inline]
pub fn evaluate_incremental(pos: &Position, pawns: &mut PawnHashTable) -> i32 {
    let total = pos.psqt() + bishop_pair(pos) + pawns.probe(pos) + king_shields(pos);
    from_side_to_move(pos, total.interpolate(scaled_phase(pos.phase())))
}

/// Change in the white-relative material + piece-square total that
/// playing `mv` in `pos` will cause
pub fn move_delta(pos: &Position, mv: Move) -> TaperedScore {
    let us = pos.side_to_move();
    let them = us.opposite();
    let from = mv.from();
    let to = mv.to();

    let mut delta = piece_square_score(Piece::new(us, mv.piece()), to)
        - piece_square_score(Piece::new(us, mv.piece()), from);

    if let Some(promoted) = mv.promoted_to() {
        delta += piece_square_score(Piece::new(us, promoted), to)
            - piece_square_score(Piece::new(us, Type::Pawn), to);
    }

    if let Some(captured) = mv.captured() {
        let captured_sq = match (mv.move_type(), us) {
            (MoveType::EnPassant, Color::White) => to - 8,
            (MoveType::EnPassant, Color::Black) => to + 8,
            _ => to,
        };
        delta -= piece_square_score(Piece::new(them, captured), captured_sq);
    }

    if mv.move_type() == MoveType::Castling {
        let (rook_from, rook_to) = crate::game_repr::castling_rook_squares(to);
        let rook = Piece::new(us, Type::Rook);
        delta += piece_square_score(rook, rook_to) - piece_square_score(rook, rook_from);
    }

    delta
}
