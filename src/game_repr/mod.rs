mod fen;
mod grid;
mod movegen;
mod moves;
mod piece;
mod piece_moves;
mod position;
pub mod bitboards;
pub mod zobrist;

#[cfg(test)]
mod tests;

pub use grid::*;
pub use movegen::*;
pub use moves::*;
pub use piece::*;
pub use position::*;
pub use bitboards::*;
pub use zobrist::{compute_hash, compute_pawn_hash, ZOBRIST};
