use crate::game_repr::bitboards::tables::PAWN_ATTACKS;
use crate::game_repr::bitboards::{bitscan_forward, north, pop_lsb, south, RANK_1, RANK_3, RANK_6, RANK_8};
use crate::game_repr::{Move, MoveList, MoveType};

use super::super::{
    piece::{Color, Piece, Type},
    position::Position,
};

impl Position {
    /// Pushes, captures, en passant and promotions for the pawn on `idx`
    pub fn pawn_moves_into(&self, idx: usize, color: Color, moves: &mut MoveList) {
        let empty = !self.bitboards.all_occupied();
        let bit = 1u64 << idx;

        let (single, double, promotion_rank) = match color {
            Color::White => {
                let single = north(bit) & empty;
                (single, north(single & RANK_3) & empty, RANK_8)
            }
            Color::Black => {
                let single = south(bit) & empty;
                (single, south(single & RANK_6) & empty, RANK_1)
            }
        };

        if single != 0 {
            let to = bitscan_forward(single);
            if single & promotion_rank != 0 {
                push_promotions(idx, to, None, moves);
            } else {
                moves.push(Move::new(idx, to, Type::Pawn, None, MoveType::Normal));
            }
        }
        if double != 0 {
            let to = bitscan_forward(double);
            moves.push(Move::new(idx, to, Type::Pawn, None, MoveType::DoublePush));
        }

        let attacks = PAWN_ATTACKS[color.index()][idx];
        let enemies = self.bitboards.occupied_by_color(color.opposite()) & self.target_mask(color);
        let mut captures = attacks & enemies;
        while captures != 0 {
            let to = pop_lsb(&mut captures);
            let captured = self.piece_at(to).map(|p| p.piece_type);
            if (1u64 << to) & promotion_rank != 0 {
                push_promotions(idx, to, captured, moves);
            } else {
                moves.push(Move::new(idx, to, Type::Pawn, captured, MoveType::Normal));
            }
        }

        // The target square only exists for the side to move; the pawn that
        // just double-pushed sits one rank behind it
        if color != self.side_to_move() {
            return;
        }
        if let Some(ep) = self.en_passant() {
            if attacks & (1u64 << ep) != 0 {
                let victim_sq = match color {
                    Color::White => ep - 8,
                    Color::Black => ep + 8,
                };
                if self.piece_at(victim_sq) == Some(Piece::new(color.opposite(), Type::Pawn)) {
                    moves.push(Move::new(idx, ep, Type::Pawn, Some(Type::Pawn), MoveType::EnPassant));
                }
            }
        }
    }
}

/// One move per promotion choice, queen first
fn push_promotions(from: usize, to: usize, captured: Option<Type>, moves: &mut MoveList) {
    for promote_to in Type::PROMOTIONS {
        moves.push(Move::promotion(from, to, captured, promote_to));
    }
}
