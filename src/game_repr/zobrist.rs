use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::bitboards::pop_lsb;
use super::piece::{Color, Type};
use super::position::Position;

/// Zobrist hashing constants for chess positions
///
/// One random 64-bit key per (color, piece, square), one per castling-rights
/// combination, one per en-passant file and one for black to move. A
/// position's key is the XOR of the keys of every feature present, so a
/// move updates it by XOR-ing out what changed and XOR-ing in the result.
pub struct ZobristKeys {
    /// [color][piece_type][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// Indexed by the 4-bit castling rights mask
    pub castling: [u64; 16],
    /// [file] - en passant file (0-7)
    pub en_passant: [u64; 8],
    /// XOR-ed in when black is to move
    pub side_to_move: u64,
}

impl ZobristKeys {
    /// Keys come from a fixed seed so hashes are reproducible across runs
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(0x517cc1b727220a95);

        let mut pieces = [[[0u64; 64]; 6]; 2];
        for color in &mut pieces {
            for piece_type in color {
                for square in piece_type {
                    *square = rng.gen();
                }
            }
        }

        // Combination 0 (no rights) keeps a zero key so an empty rights
        // mask contributes nothing
        let mut castling = [0u64; 16];
        for key in castling.iter_mut().skip(1) {
            *key = rng.gen();
        }

        let mut en_passant = [0u64; 8];
        for key in &mut en_passant {
            *key = rng.gen();
        }

        Self {
            pieces,
            castling,
            en_passant,
            side_to_move: rng.gen(),
        }
    }

    #[inline(always)]
    pub fn piece(&self, color: Color, piece_type: Type, square: usize) -> u64 {
        self.pieces[color.index()][piece_type.index()][square]
    }
}

/// Global Zobrist keys, generated on first use
pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::generate);

/// Hash a position from scratch. The incrementally maintained key in
/// `Position` must always equal this.
pub fn compute_hash(pos: &Position) -> u64 {
    let mut hash = 0u64;

    for color in [Color::White, Color::Black] {
        for piece_type in Type::ALL {
            let mut bb = pos.bitboards.pieces_of_type(color, piece_type);
            while bb != 0 {
                let sq = pop_lsb(&mut bb);
                hash ^= ZOBRIST.piece(color, piece_type, sq);
            }
        }
    }

    hash ^= ZOBRIST.castling[pos.castling_rights().bits() as usize];

    if let Some(ep) = pos.en_passant() {
        hash ^= ZOBRIST.en_passant[ep % 8];
    }

    if pos.side_to_move() == Color::Black {
        hash ^= ZOBRIST.side_to_move;
    }

    hash
}

/// Pawn-only key from scratch, the counterpart of `Position::pawn_hash`
pub fn compute_pawn_hash(pos: &Position) -> u64 {
    let mut hash = 0u64;
    for color in [Color::White, Color::Black] {
        let mut bb = pos.bitboards.pieces_of_type(color, Type::Pawn);
        while bb != 0 {
            hash ^= ZOBRIST.piece(color, Type::Pawn, pop_lsb(&mut bb));
        }
    }
    hash
}
