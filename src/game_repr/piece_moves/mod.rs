pub mod pawn;
pub mod knight;
pub mod bishop;
pub mod rook;
pub mod queen;
pub mod king;

use super::bitboards::pop_lsb;
use super::moves::{Move, MoveList, MoveType};
use super::piece::{Color, Type};
use super::position::Position;

impl Position {
    /// Squares a piece of `color` may land on: anything not its own,
    /// except the enemy king which is never captured
    #[inline]
    pub(crate) fn target_mask(&self, color: Color) -> u64 {
        !(self.bitboards.occupied_by_color(color)
            | self.bitboards.pieces_of_type(color.opposite(), Type::King))
    }

    /// Push one normal move per target square, recording the victim if any
    #[inline]
    pub(crate) fn push_moves(&self, from: usize, piece: Type, mut targets: u64, moves: &mut MoveList) {
        while targets != 0 {
            let to = pop_lsb(&mut targets);
            let captured = self.piece_at(to).map(|p| p.piece_type);
            moves.push(Move::new(from, to, piece, captured, MoveType::Normal));
        }
    }
}
