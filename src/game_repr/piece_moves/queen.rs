use crate::game_repr::bitboards::tables::queen_attacks;
use crate::game_repr::{Color, MoveList, Type};

use super::super::position::Position;

impl Position {
    /// Queen moves are the union of rook and bishop rays
    pub fn queen_moves_into(&self, idx: usize, color: Color, moves: &mut MoveList) {
        let occupied = self.bitboards.all_occupied();
        let attacks = queen_attacks(idx, occupied) & self.target_mask(color);
        self.push_moves(idx, Type::Queen, attacks, moves);
    }
}
