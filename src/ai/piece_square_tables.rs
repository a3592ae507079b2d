// Piece-square tables for positional evaluation
// All values in centipawns (100 = 1 pawn)
// Tables are indexed by square from White's side (a1 = 0, h8 = 63);
// Black looks them up through a vertical flip (square ^ 56)

use crate::game_repr::{Color, Type};

// Pawn position values - encourage advancement and central control
pub const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,  // Rank 1 (pawns shouldn't be here)
     5, 10, 10,-20,-20, 10, 10,  5,  // Rank 2
     5, -5,-10,  0,  0,-10, -5,  5,  // Rank 3
     0,  0,  0, 20, 20,  0,  0,  0,  // Rank 4
     5,  5, 10, 25, 25, 10,  5,  5,  // Rank 5
    10, 10, 20, 30, 30, 20, 10, 10,  // Rank 6
    50, 50, 50, 50, 50, 50, 50, 50,  // Rank 7 (near promotion)
     0,  0,  0,  0,  0,  0,  0,  0,  // Rank 8 (pawns shouldn't be here)
];

// Knight position values - prefer center squares
pub const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,  // Rank 1
    -40,-20,  0,  5,  5,  0,-20,-40,  // Rank 2
    -30,  5, 10, 15, 15, 10,  5,-30,  // Rank 3
    -30,  0, 15, 20, 20, 15,  0,-30,  // Rank 4
    -30,  5, 15, 20, 20, 15,  5,-30,  // Rank 5
    -30,  0, 10, 15, 15, 10,  0,-30,  // Rank 6
    -40,-20,  0,  0,  0,  0,-20,-40,  // Rank 7
    -50,-40,-30,-30,-30,-30,-40,-50,  // Rank 8
];

// Bishop position values - prefer center and long diagonals
pub const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,  // Rank 1
    -10,  5,  0,  0,  0,  0,  5,-10,  // Rank 2
    -10, 10, 10, 10, 10, 10, 10,-10,  // Rank 3
    -10,  0, 10, 10, 10, 10,  0,-10,  // Rank 4
    -10,  5,  5, 10, 10,  5,  5,-10,  // Rank 5
    -10,  0,  5, 10, 10,  5,  0,-10,  // Rank 6
    -10,  0,  0,  0,  0,  0,  0,-10,  // Rank 7
    -20,-10,-10,-10,-10,-10,-10,-20,  // Rank 8
];

// Rook position values - prefer 7th rank and center files
pub const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,  // Rank 1
    -5,  0,  0,  0,  0,  0,  0, -5,  // Rank 2
    -5,  0,  0,  0,  0,  0,  0, -5,  // Rank 3
    -5,  0,  0,  0,  0,  0,  0, -5,  // Rank 4
    -5,  0,  0,  0,  0,  0,  0, -5,  // Rank 5
    -5,  0,  0,  0,  0,  0,  0, -5,  // Rank 6
     5, 10, 10, 10, 10, 10, 10,  5,  // Rank 7 (7th rank bonus)
     0,  0,  0,  0,  0,  0,  0,  0,  // Rank 8
];

// Queen position values - slight central preference
pub const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,  // Rank 1
    -10,  0,  5,  0,  0,  0,  0,-10,  // Rank 2
    -10,  5,  5,  5,  5,  5,  0,-10,  // Rank 3
      0,  0,  5,  5,  5,  5,  0, -5,  // Rank 4
     -5,  0,  5,  5,  5,  5,  0, -5,  // Rank 5
    -10,  0,  5,  5,  5,  5,  0,-10,  // Rank 6
    -10,  0,  0,  0,  0,  0,  0,-10,  // Rank 7
    -20,-10,-10, -5, -5,-10,-10,-20,  // Rank 8
];

// King middlegame position values - prefer safety on back rank
pub const KING_MIDDLEGAME_TABLE: [i32; 64] = [
     20, 30, 10,  0,  0, 10, 30, 20,  // Rank 1 (castled position)
     20, 20,  0,  0,  0,  0, 20, 20,  // Rank 2
    -10,-20,-20,-20,-20,-20,-20,-10,  // Rank 3
    -20,-30,-30,-40,-40,-30,-30,-20,  // Rank 4
    -30,-40,-40,-50,-50,-40,-40,-30,  // Rank 5
    -30,-40,-40,-50,-50,-40,-40,-30,  // Rank 6
    -30,-40,-40,-50,-50,-40,-40,-30,  // Rank 7
    -30,-40,-40,-50,-50,-40,-40,-30,  // Rank 8
];

// King endgame position values - prefer center activity
pub const KING_ENDGAME_TABLE: [i32; 64] = [
    -50,-30,-30,-30,-30,-30,-30,-50,  // Rank 1
    -30,-30,  0,  0,  0,  0,-30,-30,  // Rank 2
    -30,-10, 20, 30, 30, 20,-10,-30,  // Rank 3
    -30,-10, 30, 40, 40, 30,-10,-30,  // Rank 4
    -30,-10, 30, 40, 40, 30,-10,-30,  // Rank 5
    -30,-10, 20, 30, 30, 20,-10,-30,  // Rank 6
    -30,-20,-10,  0,  0,-10,-20,-30,  // Rank 7
    -50,-40,-30,-20,-20,-30,-40,-50,  // Rank 8
];

/// Middlegame and endgame table values for a piece on `square`.
/// Only the king changes tables between phases.
#[inline]
pub fn pst_value(piece_type: Type, square: usize, color: Color) -> (i32, i32) {
    let idx = match color {
        Color::White => square,
        Color::Black => square ^ 56,
    };

    match piece_type {
        Type::Pawn => (PAWN_TABLE[idx], PAWN_TABLE[idx]),
        Type::Knight => (KNIGHT_TABLE[idx], KNIGHT_TABLE[idx]),
        Type::Bishop => (BISHOP_TABLE[idx], BISHOP_TABLE[idx]),
        Type::Rook => (ROOK_TABLE[idx], ROOK_TABLE[idx]),
        Type::Queen => (QUEEN_TABLE[idx], QUEEN_TABLE[idx]),
        Type::King => (KING_MIDDLEGAME_TABLE[idx], KING_ENDGAME_TABLE[idx]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pawn_prefers_advancement() {
        let (rank2, _) = pst_value(Type::Pawn, 11, Color::White); // d2
        let (rank7, _) = pst_value(Type::Pawn, 51, Color::White); // d7
        assert!(rank7 > rank2);
    }

    #[test]
    fn test_king_tables_switch_with_phase() {
        let (g1_mg, g1_eg) = pst_value(Type::King, 6, Color::White);
        let (d4_mg, d4_eg) = pst_value(Type::King, 27, Color::White);
        assert!(g1_mg > d4_mg, "castled king is safer in the middlegame");
        assert!(d4_eg > g1_eg, "central king is stronger in the endgame");
    }

    #[test]
    fn test_black_lookup_is_vertical_flip() {
        // Every white square has a black counterpart on the same file
        for piece_type in Type::ALL {
            for sq in 0..64 {
                assert_eq!(
                    pst_value(piece_type, sq, Color::White),
                    pst_value(piece_type, sq ^ 56, Color::Black)
                );
            }
        }
        // c2 for White reads the same entry as c7 for Black
        assert_eq!(pst_value(Type::Pawn, 10, Color::White), pst_value(Type::Pawn, 50, Color::Black));
    }
}
