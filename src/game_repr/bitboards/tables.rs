use super::{bitscan_forward, bitscan_reverse};

// Direction indices
pub const NORTH: usize = 0;
pub const NORTH_EAST: usize = 1;
pub const EAST: usize = 2;
pub const SOUTH_EAST: usize = 3;
pub const SOUTH: usize = 4;
pub const SOUTH_WEST: usize = 5;
pub const WEST: usize = 6;
pub const NORTH_WEST: usize = 7;

/// (rank delta, file delta) for each direction index
const DIRECTION_STEPS: [(i8, i8); 8] = [
    (1, 0),   // N
    (1, 1),   // NE
    (0, 1),   // E
    (-1, 1),  // SE
    (-1, 0),  // S
    (-1, -1), // SW
    (0, -1),  // W
    (1, -1),  // NW
];

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

pub const DIAGONALS: [usize; 4] = [NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST];
pub const ORTHOGONALS: [usize; 4] = [NORTH, EAST, SOUTH, WEST];

/// KNIGHT_ATTACKS[square] returns a bitboard of all squares a knight attacks from that square
pub static KNIGHT_ATTACKS: [u64; 64] = generate_step_attacks(&KNIGHT_STEPS);

/// KING_ATTACKS[square] returns a bitboard of all squares a king attacks from that square
pub static KING_ATTACKS: [u64; 64] = generate_step_attacks(&DIRECTION_STEPS);

/// PAWN_ATTACKS[color][square] returns a bitboard of squares a pawn attacks from that square
pub static PAWN_ATTACKS: [[u64; 64]; 2] = generate_pawn_attacks();

/// RAYS[direction][square] returns every square in that direction up to the board edge
pub static RAYS: [[u64; 64]; 8] = generate_rays();

/// Bit for (rank, file) if it lies on the board, else 0
const fn square_bit(rank: i8, file: i8) -> u64 {
    if rank >= 0 && rank < 8 && file >= 0 && file < 8 {
        1u64 << (rank * 8 + file)
    } else {
        0
    }
}

/// Single-step attack table for leapers (knight, king)
const fn generate_step_attacks(steps: &[(i8, i8); 8]) -> [u64; 64] {
    let mut attacks = [0u64; 64];
    let mut sq = 0;

    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut i = 0;
        while i < 8 {
            let (dr, df) = steps[i];
            attacks[sq] |= square_bit(rank + dr, file + df);
            i += 1;
        }
        sq += 1;
    }

    attacks
}

/// Index 0 = White (captures toward rank 8), index 1 = Black
const fn generate_pawn_attacks() -> [[u64; 64]; 2] {
    let mut attacks = [[0u64; 64]; 2];
    let mut sq = 0;

    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        attacks[0][sq] = square_bit(rank + 1, file - 1) | square_bit(rank + 1, file + 1);
        attacks[1][sq] = square_bit(rank - 1, file - 1) | square_bit(rank - 1, file + 1);
        sq += 1;
    }

    attacks
}

const fn generate_rays() -> [[u64; 64]; 8] {
    let mut rays = [[0u64; 64]; 8];
    let mut dir = 0;

    while dir < 8 {
        let (dr, df) = DIRECTION_STEPS[dir];
        let mut sq = 0;
        while sq < 64 {
            let mut rank = (sq / 8) as i8 + dr;
            let mut file = (sq % 8) as i8 + df;
            while rank >= 0 && rank < 8 && file >= 0 && file < 8 {
                rays[dir][sq] |= 1u64 << (rank * 8 + file);
                rank += dr;
                file += df;
            }
            sq += 1;
        }
        dir += 1;
    }

    rays
}

/// Directions whose squares have increasing indices: the nearest
/// blocker is the lowest set bit
#[inline(always)]
const fn is_forward(direction: usize) -> bool {
    matches!(direction, NORTH | NORTH_EAST | EAST | NORTH_WEST)
}

/// Squares attacked along one ray, stopping at (and including) the first blocker
#[inline]
pub fn ray_attacks(direction: usize, square: usize, occupied: u64) -> u64 {
    let ray = RAYS[direction][square];
    let blockers = ray & occupied;
    if blockers == 0 {
        return ray;
    }
    let blocker_sq = if is_forward(direction) {
        bitscan_forward(blockers)
    } else {
        bitscan_reverse(blockers)
    };
    ray & !RAYS[direction][blocker_sq]
}

#[inline]
pub fn bishop_attacks(square: usize, occupied: u64) -> u64 {
    DIAGONALS
        .iter()
        .fold(0, |acc, &dir| acc | ray_attacks(dir, square, occupied))
}

#[inline]
pub fn rook_attacks(square: usize, occupied: u64) -> u64 {
    ORTHOGONALS
        .iter()
        .fold(0, |acc, &dir| acc | ray_attacks(dir, square, occupied))
}

#[inline]
pub fn queen_attacks(square: usize, occupied: u64) -> u64 {
    bishop_attacks(square, occupied) | rook_attacks(square, occupied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight_attacks() {
        // Knight on d4 attacks b3, b5, c2, c6, e2, e6, f3, f5
        let expected = (1u64 << 17) | (1u64 << 33) | (1u64 << 10) | (1u64 << 42)
            | (1u64 << 12) | (1u64 << 44) | (1u64 << 21) | (1u64 << 37);
        assert_eq!(KNIGHT_ATTACKS[27], expected);

        // Corner knight has only two targets
        assert_eq!(KNIGHT_ATTACKS[0], (1u64 << 10) | (1u64 << 17));
    }

    #[test]
    fn test_king_attacks() {
        // King on e4 attacks d3, d4, d5, e3, e5, f3, f4, f5
        let expected = (1u64 << 19) | (1u64 << 27) | (1u64 << 35) | (1u64 << 20)
            | (1u64 << 36) | (1u64 << 21) | (1u64 << 29) | (1u64 << 37);
        assert_eq!(KING_ATTACKS[28], expected);
        assert_eq!(KING_ATTACKS[7].count_ones(), 3);
    }

    #[test]
    fn test_pawn_attacks() {
        // White pawn on e4 attacks d5, f5
        assert_eq!(PAWN_ATTACKS[0][28], (1u64 << 35) | (1u64 << 37));
        // Black pawn on e5 attacks d4, f4
        assert_eq!(PAWN_ATTACKS[1][36], (1u64 << 27) | (1u64 << 29));
        // Edge pawns don't wrap
        assert_eq!(PAWN_ATTACKS[0][8], 1u64 << 17);
        assert_eq!(PAWN_ATTACKS[1][55], 1u64 << 46);
    }

    #[test]
    fn test_rays() {
        let north_from_a1 = (1u64 << 8) | (1u64 << 16) | (1u64 << 24) | (1u64 << 32)
            | (1u64 << 40) | (1u64 << 48) | (1u64 << 56);
        assert_eq!(RAYS[NORTH][0], north_from_a1);

        let diagonal_from_a1 = (1u64 << 9) | (1u64 << 18) | (1u64 << 27) | (1u64 << 36)
            | (1u64 << 45) | (1u64 << 54) | (1u64 << 63);
        assert_eq!(RAYS[NORTH_EAST][0], diagonal_from_a1);

        assert_eq!(RAYS[WEST][0], 0);
        assert_eq!(RAYS[SOUTH_EAST][63], 0);
    }

    #[test]
    fn test_rook_attacks_stop_at_blockers() {
        // Rook on d4, blockers on d6 and b4
        let occupied = (1u64 << 43) | (1u64 << 25);
        let attacks = rook_attacks(27, occupied);

        assert!(attacks & (1u64 << 43) != 0, "first blocker is attacked");
        assert!(attacks & (1u64 << 51) == 0, "squares behind blocker are not");
        assert!(attacks & (1u64 << 25) != 0);
        assert!(attacks & (1u64 << 24) == 0);
        assert!(attacks & (1u64 << 3) != 0, "open file down to d1");
        assert_eq!(attacks.count_ones(), 2 + 3 + 2 + 4);
    }

    #[test]
    fn test_bishop_attacks_both_scan_orders() {
        // Bishop on e5, blockers on g7 (forward ray) and c3 (reverse ray)
        let occupied = (1u64 << 54) | (1u64 << 18);
        let attacks = bishop_attacks(36, occupied);
        assert!(attacks & (1u64 << 54) != 0);
        assert!(attacks & (1u64 << 63) == 0);
        assert!(attacks & (1u64 << 18) != 0);
        assert!(attacks & (1u64 << 9) == 0);
    }
}
