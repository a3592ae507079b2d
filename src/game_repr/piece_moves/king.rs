use crate::game_repr::bitboards::tables::KING_ATTACKS;
use crate::game_repr::{CastlingRights, Color, Move, MoveList, MoveType};

use super::super::{
    piece::{Piece, Type},
    position::Position,
};

impl Position {
    /// Step moves plus castling for the king on `idx`
    pub fn king_moves_into(&self, idx: usize, color: Color, moves: &mut MoveList) {
        let attacks = KING_ATTACKS[idx] & self.target_mask(color);
        self.push_moves(idx, Type::King, attacks, moves);
        self.castling_moves_into(idx, color, moves);
    }

    fn castling_moves_into(&self, idx: usize, color: Color, moves: &mut MoveList) {
        let home = match color {
            Color::White => 4,  // e1
            Color::Black => 60, // e8
        };
        let rights = self.castling_rights();
        let kingside = rights.has(CastlingRights::kingside(color));
        let queenside = rights.has(CastlingRights::queenside(color));
        if idx != home || !(kingside || queenside) {
            return;
        }

        let opponent = color.opposite();
        // Can't castle out of check
        if self.is_square_attacked(home, opponent) {
            return;
        }

        let occupied = self.bitboards.all_occupied();
        let rook = Some(Piece::new(color, Type::Rook));

        if kingside && self.piece_at(home + 3) == rook {
            let between = (1u64 << (home + 1)) | (1u64 << (home + 2));
            if occupied & between == 0
                && !self.is_square_attacked(home + 1, opponent)
                && !self.is_square_attacked(home + 2, opponent)
            {
                moves.push(Move::new(home, home + 2, Type::King, None, MoveType::Castling));
            }
        }

        if queenside && self.piece_at(home - 4) == rook {
            // b-file square must be empty but may be attacked
            let between = (1u64 << (home - 1)) | (1u64 << (home - 2)) | (1u64 << (home - 3));
            if occupied & between == 0
                && !self.is_square_attacked(home - 1, opponent)
                && !self.is_square_attacked(home - 2, opponent)
            {
                moves.push(Move::new(home, home - 2, Type::King, None, MoveType::Castling));
            }
        }
    }
}
