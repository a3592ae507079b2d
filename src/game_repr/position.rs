use crate::ai::evaluation::{phase_weight, piece_square_score, TaperedScore};
use crate::error::InvalidPositionError;

use super::bitboards::{bitscan_forward, popcount, Bitboards, RANK_1, RANK_8};
use super::moves::{Move, MoveType};
use super::piece::{Color, Piece, Type};
use super::zobrist::{compute_hash, ZOBRIST};

/*
 * MODULE IS RESPONSIBLE FOR
 * BOARD STATE AND MAKE/UNMAKE
 */

/// Castling rights as a 4-bit mask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KINGSIDE: u8 = 1;
    pub const WHITE_QUEENSIDE: u8 = 2;
    pub const BLACK_KINGSIDE: u8 = 4;
    pub const BLACK_QUEENSIDE: u8 = 8;
    pub const ALL: CastlingRights = CastlingRights(15);
    pub const NONE: CastlingRights = CastlingRights(0);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 15)
    }

    #[inline(always)]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub fn has(self, right: u8) -> bool {
        self.0 & right != 0
    }

    pub fn insert(&mut self, right: u8) {
        self.0 |= right;
    }

    #[inline(always)]
    fn restrict(&mut self, keep: u8) {
        self.0 &= keep;
    }

    pub fn kingside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    pub fn queenside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }
}

/// Rights that survive a move touching each square. A move from or to a
/// king/rook home square drops the matching rights.
static CASTLE_MASK: [u8; 64] = {
    let mut mask = [15u8; 64];
    mask[0] = 15 & !CastlingRights::WHITE_QUEENSIDE;
    mask[7] = 15 & !CastlingRights::WHITE_KINGSIDE;
    mask[4] = 15 & !(CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE);
    mask[56] = 15 & !CastlingRights::BLACK_QUEENSIDE;
    mask[63] = 15 & !CastlingRights::BLACK_KINGSIDE;
    mask[60] = 15 & !(CastlingRights::BLACK_KINGSIDE | CastlingRights::BLACK_QUEENSIDE);
    mask
};

/// Rook origin and destination for a castling move, keyed by king destination
#[inline]
pub fn castling_rook_squares(king_to: usize) -> (usize, usize) {
    match king_to {
        6 => (7, 5),    // h1 -> f1
        2 => (0, 3),    // a1 -> d1
        62 => (63, 61), // h8 -> f8
        _ => (56, 59),  // a8 -> d8
    }
}

/// Everything needed to take a move back
#[derive(Clone, Copy, Debug)]
pub struct UndoInfo {
    mv: Move,
    castling: CastlingRights,
    en_passant: Option<u8>,
    halfmove_clock: u16,
    fullmove_number: u16,
    hash: u64,
}

impl UndoInfo {
    pub fn mv(&self) -> Move {
        self.mv
    }
}

#[derive(Clone, Copy, Debug)]
pub struct NullMoveUndo {
    en_passant: Option<u8>,
    halfmove_clock: u16,
    hash: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// Bitboard representation for fast move generation
    pub(crate) bitboards: Bitboards,
    /// Mailbox representation for fast piece lookup (kept in sync with bitboards)
    mailbox: [Option<Piece>; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<u8>,
    halfmove_clock: u16,
    fullmove_number: u16,
    /// Incrementally maintained Zobrist key
    hash: u64,
    /// Zobrist key over pawns only, for the pawn structure cache
    pawn_hash: u64,
    /// Running material + piece-square sum, white minus black
    psqt: TaperedScore,
    /// Running sum of phase weights of all pieces on the board
    phase: i32,
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

const BACK_RANK: [Type; 8] = [
    Type::Rook,
    Type::Knight,
    Type::Bishop,
    Type::Queen,
    Type::King,
    Type::Bishop,
    Type::Knight,
    Type::Rook,
];

impl Position {
    /// Board with no pieces. Callers place pieces, set state, then call
    /// `finish_setup` to derive the hash and validate.
    pub(crate) fn empty(side_to_move: Color) -> Self {
        Self {
            bitboards: Bitboards::empty(),
            mailbox: [None; 64],
            side_to_move,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            pawn_hash: 0,
            psqt: TaperedScore::default(),
            phase: 0,
        }
    }

    /// The standard starting position
    pub fn starting() -> Self {
        let mut pos = Self::empty(Color::White);
        for (file, &piece_type) in BACK_RANK.iter().enumerate() {
            pos.put_piece(Piece::new(Color::White, piece_type), file);
            pos.put_piece(Piece::new(Color::White, Type::Pawn), 8 + file);
            pos.put_piece(Piece::new(Color::Black, Type::Pawn), 48 + file);
            pos.put_piece(Piece::new(Color::Black, piece_type), 56 + file);
        }
        pos.castling = CastlingRights::ALL;
        pos.hash = compute_hash(&pos);
        pos
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_castling(&mut self, castling: CastlingRights) {
        self.castling = castling;
    }

    pub(crate) fn set_en_passant(&mut self, square: Option<usize>) {
        self.en_passant = square.map(|sq| sq as u8);
    }

    pub(crate) fn set_clocks(&mut self, halfmove_clock: u16, fullmove_number: u16) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number.max(1);
    }

    /// Validate a freshly built position and derive its hash
    pub(crate) fn finish_setup(mut self) -> Result<Self, InvalidPositionError> {
        self.validate()?;
        self.hash = compute_hash(&self);
        Ok(self)
    }

    /// Checks the structural invariants every constructor must uphold
    pub fn validate(&self) -> Result<(), InvalidPositionError> {
        for color in [Color::White, Color::Black] {
            let count = popcount(self.bitboards.pieces_of_type(color, Type::King));
            if count != 1 {
                return Err(InvalidPositionError::KingCount { color, count });
            }
        }

        let pawns = self.bitboards.pieces_of_type(Color::White, Type::Pawn)
            | self.bitboards.pieces_of_type(Color::Black, Type::Pawn);
        let misplaced = pawns & (RANK_1 | RANK_8);
        if misplaced != 0 {
            return Err(InvalidPositionError::PawnOnBackRank {
                square: bitscan_forward(misplaced),
            });
        }

        Ok(())
    }

    /// Place a piece, keeping masks, mailbox, hash and evaluation in step
    #[inline]
    pub(crate) fn put_piece(&mut self, piece: Piece, square: usize) {
        debug_assert!(self.mailbox[square].is_none(), "square {} already occupied", square);
        self.bitboards.add_piece(piece.color, piece.piece_type, square);
        self.mailbox[square] = Some(piece);
        let key = ZOBRIST.piece(piece.color, piece.piece_type, square);
        self.hash ^= key;
        if piece.piece_type == Type::Pawn {
            self.pawn_hash ^= key;
        }
        self.psqt += piece_square_score(piece, square);
        self.phase += phase_weight(piece.piece_type);
    }

    /// Remove and return whatever stands on `square`
    #[inline]
    pub(crate) fn take_piece(&mut self, square: usize) -> Option<Piece> {
        let piece = self.mailbox[square].take()?;
        self.bitboards.remove_piece(piece.color, piece.piece_type, square);
        let key = ZOBRIST.piece(piece.color, piece.piece_type, square);
        self.hash ^= key;
        if piece.piece_type == Type::Pawn {
            self.pawn_hash ^= key;
        }
        self.psqt -= piece_square_score(piece, square);
        self.phase -= phase_weight(piece.piece_type);
        Some(piece)
    }

    #[inline]
    fn relocate(&mut self, from: usize, to: usize) {
        if let Some(piece) = self.take_piece(from) {
            self.put_piece(piece, to);
        }
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline(always)]
    pub fn en_passant(&self) -> Option<usize> {
        self.en_passant.map(usize::from)
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Zobrist key of the current position
    #[inline(always)]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Zobrist key of the pawns alone
    #[inline(always)]
    pub fn pawn_hash(&self) -> u64 {
        self.pawn_hash
    }

    #[inline(always)]
    pub fn piece_at(&self, square: usize) -> Option<Piece> {
        self.mailbox[square]
    }

    pub fn bitboards(&self) -> &Bitboards {
        &self.bitboards
    }

    #[inline(always)]
    pub(crate) fn psqt(&self) -> TaperedScore {
        self.psqt
    }

    #[inline(always)]
    pub(crate) fn phase(&self) -> i32 {
        self.phase
    }

    /// Square of `color`'s king. Positions are validated on construction
    /// and kings are never captured, so the mask is never empty.
    #[inline]
    pub fn king_square(&self, color: Color) -> usize {
        let kings = self.bitboards.pieces_of_type(color, Type::King);
        debug_assert!(kings != 0, "{:?} king missing from a validated position", color);
        bitscan_forward(kings)
    }

    /// Anything besides pawns and the king. Positions without it are
    /// where null-move pruning goes wrong (zugzwang).
    pub fn has_non_pawn_material(&self, color: Color) -> bool {
        let bb = &self.bitboards;
        (bb.pieces_of_type(color, Type::Knight)
            | bb.pieces_of_type(color, Type::Bishop)
            | bb.pieces_of_type(color, Type::Rook)
            | bb.pieces_of_type(color, Type::Queen))
            != 0
    }

    /// Copy of this position with a different side to move
    pub(crate) fn with_side_to_move(&self, color: Color) -> Position {
        if color == self.side_to_move {
            return self.clone();
        }
        let mut pos = self.clone();
        pos.side_to_move = color;
        pos.en_passant = None;
        pos.hash = compute_hash(&pos);
        pos
    }

    /// Apply a move generated for this position. Returns the token that
    /// `unmake_move` needs to restore the exact prior state.
    pub fn make_move(&mut self, mv: Move) -> UndoInfo {
        let undo = UndoInfo {
            mv,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            hash: self.hash,
        };

        let us = self.side_to_move;
        let from = mv.from();
        let to = mv.to();
        debug_assert_eq!(self.mailbox[from].map(|p| p.color), Some(us));

        if let Some(ep) = self.en_passant.take() {
            self.hash ^= ZOBRIST.en_passant[ep as usize % 8];
        }
        self.hash ^= ZOBRIST.castling[self.castling.bits() as usize];

        match mv.move_type() {
            MoveType::EnPassant => {
                let captured_sq = match us {
                    Color::White => to - 8,
                    Color::Black => to + 8,
                };
                self.take_piece(captured_sq);
                self.relocate(from, to);
            }
            MoveType::Castling => {
                let (rook_from, rook_to) = castling_rook_squares(to);
                self.relocate(from, to);
                self.relocate(rook_from, rook_to);
            }
            MoveType::Normal | MoveType::DoublePush => {
                if mv.is_capture() {
                    let captured = self.take_piece(to);
                    debug_assert_eq!(captured.map(|p| p.piece_type), mv.captured());
                }
                match mv.promoted_to() {
                    Some(promoted) => {
                        self.take_piece(from);
                        self.put_piece(Piece::new(us, promoted), to);
                    }
                    None => self.relocate(from, to),
                }
                if mv.move_type() == MoveType::DoublePush {
                    let ep = (from + to) / 2;
                    self.en_passant = Some(ep as u8);
                    self.hash ^= ZOBRIST.en_passant[ep % 8];
                }
            }
        }

        self.castling.restrict(CASTLE_MASK[from] & CASTLE_MASK[to]);
        self.hash ^= ZOBRIST.castling[self.castling.bits() as usize];

        if mv.piece() == Type::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = us.opposite();
        self.hash ^= ZOBRIST.side_to_move;

        undo
    }

    /// Take back the move recorded in `undo`
    pub fn unmake_move(&mut self, undo: UndoInfo) {
        let mv = undo.mv;
        let us = self.side_to_move.opposite();
        let them = self.side_to_move;
        let from = mv.from();
        let to = mv.to();

        match mv.move_type() {
            MoveType::EnPassant => {
                let captured_sq = match us {
                    Color::White => to - 8,
                    Color::Black => to + 8,
                };
                self.relocate(to, from);
                self.put_piece(Piece::new(them, Type::Pawn), captured_sq);
            }
            MoveType::Castling => {
                let (rook_from, rook_to) = castling_rook_squares(to);
                self.relocate(to, from);
                self.relocate(rook_to, rook_from);
            }
            MoveType::Normal | MoveType::DoublePush => {
                match mv.promoted_to() {
                    Some(_) => {
                        self.take_piece(to);
                        self.put_piece(Piece::new(us, Type::Pawn), from);
                    }
                    None => self.relocate(to, from),
                }
                if let Some(captured) = mv.captured() {
                    self.put_piece(Piece::new(them, captured), to);
                }
            }
        }

        self.side_to_move = us;
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.hash = undo.hash;
    }

    /// Pass the turn without moving (null-move pruning)
    pub fn make_null_move(&mut self) -> NullMoveUndo {
        let undo = NullMoveUndo {
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        };
        if let Some(ep) = self.en_passant.take() {
            self.hash ^= ZOBRIST.en_passant[ep as usize % 8];
        }
        self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        self.side_to_move = self.side_to_move.opposite();
        self.hash ^= ZOBRIST.side_to_move;
        undo
    }

    pub fn unmake_null_move(&mut self, undo: NullMoveUndo) {
        self.side_to_move = self.side_to_move.opposite();
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.hash = undo.hash;
    }
}
