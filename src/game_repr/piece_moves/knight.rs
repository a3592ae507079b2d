use crate::game_repr::bitboards::tables::KNIGHT_ATTACKS;
use crate::game_repr::{Color, MoveList, Type};

use super::super::position::Position;

impl Position {
    /// Generate knight moves into a provided buffer
    pub fn knight_moves_into(&self, idx: usize, color: Color, moves: &mut MoveList) {
        let attacks = KNIGHT_ATTACKS[idx] & self.target_mask(color);
        self.push_moves(idx, Type::Knight, attacks, moves);
    }
}
