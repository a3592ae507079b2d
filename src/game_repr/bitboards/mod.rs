use super::piece::{Color, Type};

pub mod tables;
pub use tables::*;

/// Bitboard representation using 12 u64 values (6 piece types × 2 colors)
/// Each bit represents presence/absence of a piece on that square (0-63)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitboards {
    /// 12 piece-specific bitboards indexed by [color * 6 + piece_type]
    /// White: 0=Pawn, 1=Knight, 2=Bishop, 3=Rook, 4=Queen, 5=King
    /// Black: 6=Pawn, 7=Knight, 8=Bishop, 9=Rook, 10=Queen, 11=King
    pieces: [u64; 12],
}

impl Bitboards {
    /// Create empty bitboards
    pub fn empty() -> Self {
        Self { pieces: [0; 12] }
    }

    /// Set a bit at the given square for the specified piece type
    #[inline]
    pub fn set_bit(&mut self, piece_idx: usize, square: usize) {
        self.pieces[piece_idx] |= 1u64 << square;
    }

    /// Clear a bit at the given square for the specified piece type
    #[inline]
    pub fn clear_bit(&mut self, piece_idx: usize, square: usize) {
        self.pieces[piece_idx] &= !(1u64 << square);
    }

    /// Test if a bit is set at the given square for the specified piece type
    #[inline]
    pub fn test_bit(&self, piece_idx: usize, square: usize) -> bool {
        (self.pieces[piece_idx] & (1u64 << square)) != 0
    }

    /// Get bitboard for a specific piece type and color
    #[inline(always)]
    pub fn pieces_of_type(&self, color: Color, piece_type: Type) -> u64 {
        self.pieces[piece_index(color, piece_type)]
    }

    /// Get bitboard for all pieces of a color
    #[inline(always)]
    pub fn occupied_by_color(&self, color: Color) -> u64 {
        let base = color.index() * 6;
        self.pieces[base]
            | self.pieces[base + 1]
            | self.pieces[base + 2]
            | self.pieces[base + 3]
            | self.pieces[base + 4]
            | self.pieces[base + 5]
    }

    /// Get bitboard for all occupied squares
    #[inline(always)]
    pub fn all_occupied(&self) -> u64 {
        self.occupied_by_color(Color::White) | self.occupied_by_color(Color::Black)
    }

    /// Remove a piece from a square
    #[inline]
    pub fn remove_piece(&mut self, color: Color, piece_type: Type, square: usize) {
        self.clear_bit(piece_index(color, piece_type), square);
    }

    /// Add a piece to a square
    #[inline]
    pub fn add_piece(&mut self, color: Color, piece_type: Type, square: usize) {
        self.set_bit(piece_index(color, piece_type), square);
    }

    /// True when no square is claimed by two masks
    pub fn is_disjoint(&self) -> bool {
        let mut seen = 0u64;
        for bb in self.pieces {
            if seen & bb != 0 {
                return false;
            }
            seen |= bb;
        }
        true
    }
}

/// Convert color and piece type to bitboard index
#[inline(always)]
pub fn piece_index(color: Color, piece_type: Type) -> usize {
    color.index() * 6 + piece_type.index()
}

/// Pop the least significant bit from a bitboard and return its index
#[inline(always)]
pub fn pop_lsb(bb: &mut u64) -> usize {
    let sq = bb.trailing_zeros() as usize;
    *bb &= *bb - 1; // Clear the LSB
    sq
}

/// Find the index of the least significant bit (without modifying the bitboard)
#[inline(always)]
pub fn bitscan_forward(bb: u64) -> usize {
    bb.trailing_zeros() as usize
}

/// Find the index of the most significant bit
#[inline]
pub fn bitscan_reverse(bb: u64) -> usize {
    63 - bb.leading_zeros() as usize
}

/// Count the number of set bits in a bitboard
#[inline]
pub fn popcount(bb: u64) -> u32 {
    bb.count_ones()
}

// Rank masks
pub const RANK_1: u64 = 0x00000000000000FF;
pub const RANK_3: u64 = 0x0000000000FF0000;
pub const RANK_6: u64 = 0x0000FF0000000000;
pub const RANK_8: u64 = 0xFF00000000000000;

pub const FILE_A: u64 = 0x0101010101010101;

// Vertical shifts; bits pushed past rank 1 or rank 8 fall off
#[inline]
pub fn north(bb: u64) -> u64 {
    bb << 8
}

#[inline]
pub fn south(bb: u64) -> u64 {
    bb >> 8
}
