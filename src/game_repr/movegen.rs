use crate::error::{EngineError, EngineResult};

use super::bitboards::tables::{bishop_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use super::bitboards::pop_lsb;
use super::moves::{coords_to_square, parse_square, square_name, Move, MoveList};
use super::piece::{Color, Type};
use super::position::{Position, UndoInfo};

/*
 * MODULE IS RESPONSIBLE FOR
 * ATTACK DETECTION AND LEGAL MOVE GENERATION
 */

/// How a position stands for the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveDraw,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        *self != GameStatus::Ongoing
    }
}

impl Position {
    /// Every piece of `by` attacking `square`, given an occupancy.
    /// Check detection and castling safety both go through here, so there
    /// is exactly one notion of "attacked" in the crate.
    pub fn attackers_to(&self, square: usize, by: Color, occupied: u64) -> u64 {
        let bb = &self.bitboards;
        let queens = bb.pieces_of_type(by, Type::Queen);

        // A pawn of `by` attacks `square` from wherever a pawn of the other
        // color standing on `square` would attack
        (PAWN_ATTACKS[by.opposite().index()][square] & bb.pieces_of_type(by, Type::Pawn))
            | (KNIGHT_ATTACKS[square] & bb.pieces_of_type(by, Type::Knight))
            | (KING_ATTACKS[square] & bb.pieces_of_type(by, Type::King))
            | (bishop_attacks(square, occupied) & (bb.pieces_of_type(by, Type::Bishop) | queens))
            | (rook_attacks(square, occupied) & (bb.pieces_of_type(by, Type::Rook) | queens))
    }

    /// Checks if a square is under attack by any piece of the given color
    #[inline]
    pub fn is_square_attacked(&self, square: usize, by: Color) -> bool {
        self.attackers_to(square, by, self.bitboards.all_occupied()) != 0
    }

    pub fn is_king_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opposite())
    }

    /// Whether the side to move is in check
    #[inline]
    pub fn in_check(&self) -> bool {
        self.is_king_in_check(self.side_to_move())
    }

    /// All moves for `color` ignoring self-check
    pub fn generate_pseudolegal(&self, color: Color, moves: &mut MoveList) {
        for piece_type in Type::ALL {
            let mut pieces_bb = self.bitboards.pieces_of_type(color, piece_type);
            while pieces_bb != 0 {
                let square = pop_lsb(&mut pieces_bb);
                match piece_type {
                    Type::Pawn => self.pawn_moves_into(square, color, moves),
                    Type::Knight => self.knight_moves_into(square, color, moves),
                    Type::Bishop => self.bishop_moves_into(square, color, moves),
                    Type::Rook => self.rook_moves_into(square, color, moves),
                    Type::Queen => self.queen_moves_into(square, color, moves),
                    Type::King => self.king_moves_into(square, color, moves),
                }
            }
        }
    }

    /// Legal moves for `color`. If `color` is not to move, the position is
    /// considered with the turn passed to it.
    pub fn generate_legal(&self, color: Color) -> MoveList {
        let mut scratch = self.with_side_to_move(color);
        let mut moves = MoveList::new();
        scratch.legal_moves_into(&mut moves);
        moves
    }

    /// Legal moves for the side to move
    pub fn legal_moves(&self) -> MoveList {
        self.generate_legal(self.side_to_move())
    }

    /// Legal moves for the side to move into a provided buffer. The buffer
    /// is cleared first. The position is left exactly as it was found.
    pub fn legal_moves_into(&mut self, moves: &mut MoveList) {
        moves.clear();
        let us = self.side_to_move();
        self.generate_pseudolegal(us, moves);
        moves.retain(|mv| self.leaves_king_safe(*mv, us));
    }

    /// Captures and promotions for the side to move, plus quiet checking
    /// moves when `with_checks` is set. Legal moves only.
    pub fn generate_tactical(&mut self, with_checks: bool, moves: &mut MoveList) {
        moves.clear();
        let us = self.side_to_move();
        self.generate_pseudolegal(us, moves);
        moves.retain(|mv| {
            if mv.is_quiet() && !(with_checks && self.gives_check(*mv)) {
                return false;
            }
            self.leaves_king_safe(*mv, us)
        });
    }

    fn leaves_king_safe(&mut self, mv: Move, us: Color) -> bool {
        let undo = self.make_move(mv);
        let safe = !self.is_king_in_check(us);
        self.unmake_move(undo);
        safe
    }

    /// Does `mv` put the opponent in check
    pub fn gives_check(&mut self, mv: Move) -> bool {
        let undo = self.make_move(mv);
        let check = self.in_check();
        self.unmake_move(undo);
        check
    }

    /// Checks if the given color has ANY legal moves available
    pub fn has_legal_moves(&self, color: Color) -> bool {
        !self.generate_legal(color).is_empty()
    }

    /// In check AND no legal moves
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_king_in_check(color) && !self.has_legal_moves(color)
    }

    /// NOT in check AND no legal moves
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_king_in_check(color) && !self.has_legal_moves(color)
    }

    pub fn game_status(&self) -> GameStatus {
        let us = self.side_to_move();
        if !self.has_legal_moves(us) {
            if self.is_king_in_check(us) {
                return GameStatus::Checkmate { winner: us.opposite() };
            }
            return GameStatus::Stalemate;
        }
        if self.halfmove_clock() >= 100 {
            return GameStatus::FiftyMoveDraw;
        }
        GameStatus::Ongoing
    }

    /// The legal move between two boundary `(row, col)` squares, if any.
    /// Promotions resolve to the queen.
    pub fn find_move(&self, from: (usize, usize), to: (usize, usize)) -> Option<Move> {
        if from.0 > 7 || from.1 > 7 || to.0 > 7 || to.1 > 7 {
            return None;
        }
        let from = coords_to_square(from.0, from.1);
        let to = coords_to_square(to.0, to.1);
        self.legal_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promoted_to().map_or(true, |p| p == Type::Queen))
    }

    /// Whether the side to move may play from `from` to `to`
    pub fn is_valid_move(&self, from: (usize, usize), to: (usize, usize)) -> bool {
        self.find_move(from, to).is_some()
    }

    /// Resolve long algebraic notation (`e2e4`, `e7e8q`) to a legal move.
    /// A promotion without a suffix means the queen.
    pub fn parse_move(&self, text: &str) -> Option<Move> {
        let text = text.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return None;
        }
        let from = parse_square(&text[0..2])?;
        let to = parse_square(&text[2..4])?;
        let promotion = match text[4..].chars().next() {
            Some(c) => Some(Type::from_char(c).filter(|t| Type::PROMOTIONS.contains(t))?),
            None => None,
        };

        self.legal_moves().into_iter().find(|mv| {
            mv.from() == from
                && mv.to() == to
                && match mv.promoted_to() {
                    Some(p) => p == promotion.unwrap_or(Type::Queen),
                    None => promotion.is_none(),
                }
        })
    }

    /// Checked move application for callers outside the search
    pub fn play(&mut self, from: usize, to: usize, promotion: Option<Type>) -> EngineResult<UndoInfo> {
        let mv = self
            .legal_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promoted_to() == promotion)
            .ok_or_else(|| EngineError::IllegalMove {
                from: describe_square(from),
                to: describe_square(to),
            })?;
        Ok(self.make_move(mv))
    }

    /// Perft (Performance Test) - counts leaf nodes at a given depth
    /// Used to validate move generation correctness
    pub fn perft(&self, depth: u32) -> u64 {
        let mut pos = self.clone();
        pos.perft_inner(depth)
    }

    fn perft_inner(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let mut moves = MoveList::new();
        self.legal_moves_into(&mut moves);

        // Bulk counting at the frontier
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            let undo = self.make_move(mv);
            nodes += self.perft_inner(depth - 1);
            self.unmake_move(undo);
        }
        nodes
    }

    /// Divide - perft count for each first-level move (debugging tool)
    pub fn divide(&self, depth: u32) -> Vec<(Move, u64)> {
        let mut pos = self.clone();
        let mut out = Vec::new();
        for mv in self.legal_moves() {
            let undo = pos.make_move(mv);
            let count = if depth > 1 { pos.perft_inner(depth - 1) } else { 1 };
            pos.unmake_move(undo);
            out.push((mv, count));
        }
        out
    }
}

fn describe_square(square: usize) -> String {
    if square < 64 {
        square_name(square)
    } else {
        square.to_string()
    }
}
