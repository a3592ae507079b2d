use crate::game_repr::bitboards::tables::bishop_attacks;
use crate::game_repr::{Color, MoveList, Type};

use super::super::position::Position;

impl Position {
    /// Generate bishop moves into a provided buffer
    pub fn bishop_moves_into(&self, idx: usize, color: Color, moves: &mut MoveList) {
        let occupied = self.bitboards.all_occupied();
        let attacks = bishop_attacks(idx, occupied) & self.target_mask(color);
        self.push_moves(idx, Type::Bishop, attacks, moves);
    }
}
