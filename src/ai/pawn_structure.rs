// Pawn structure evaluation
//
// Doubled, isolated and passed pawns depend on the pawns alone, so their
// score is cached under the pawn-only Zobrist key. Pawn formations change
// far less often than the rest of the board and most lookups hit.
//
// The king shield also depends on where the kings stand. It is a couple of
// mask operations and is computed fresh every time.

use crate::game_repr::{popcount, pop_lsb, Color, Position, Type, FILE_A};
use super::evaluation::TaperedScore;

// Evaluation weights (tapered: mg/eg)
const DOUBLED_PAWN_PENALTY: TaperedScore = TaperedScore::new(15, 20);
const ISOLATED_PAWN_PENALTY: TaperedScore = TaperedScore::new(20, 25);
const PASSED_PAWN_BONUS: TaperedScore = TaperedScore::new(40, 70);
const PAWN_SHIELD_BONUS: TaperedScore = TaperedScore::new(15, 5);

/// Entries in a search's pawn table
pub const DEFAULT_PAWN_TABLE_ENTRIES: usize = 1 << 14;

#[inline]
fn file_mask(file: usize) -> u64 {
    FILE_A << file
}

#[inline]
fn adjacent_files(file: usize) -> u64 {
    let mut mask = 0;
    if file > 0 {
        mask |= file_mask(file - 1);
    }
    if file < 7 {
        mask |= file_mask(file + 1);
    }
    mask
}

/// Every rank in front of `square` as seen by `color`
#[inline]
fn ranks_ahead(color: Color, square: usize) -> u64 {
    let rank = square / 8;
    match color {
        Color::White if rank >= 7 => 0,
        Color::White => !0u64 << (8 * (rank + 1)),
        Color::Black => (1u64 << (8 * rank)) - 1,
    }
}

/// No enemy pawn ahead on the same or a neighbouring file
fn is_passed(color: Color, square: usize, enemy_pawns: u64) -> bool {
    let file = square % 8;
    let span = ranks_ahead(color, square) & (file_mask(file) | adjacent_files(file));
    enemy_pawns & span == 0
}

fn side_structure(color: Color, own_pawns: u64, enemy_pawns: u64) -> TaperedScore {
    let mut score = TaperedScore::default();
    let mut pawns = own_pawns;
    while pawns != 0 {
        let square = pop_lsb(&mut pawns);
        let file = square % 8;

        if popcount(own_pawns & file_mask(file)) > 1 {
            score -= DOUBLED_PAWN_PENALTY;
        }
        if own_pawns & adjacent_files(file) == 0 {
            score -= ISOLATED_PAWN_PENALTY;
        }
        if is_passed(color, square, enemy_pawns) {
            score += PASSED_PAWN_BONUS;
        }
    }
    score
}

/// Doubled, isolated and passed pawn terms, white minus black
pub fn pawn_structure(white_pawns: u64, black_pawns: u64) -> TaperedScore {
    side_structure(Color::White, white_pawns, black_pawns) - side_structure(Color::Black, black_pawns, white_pawns)
}

/// Own pawns on the two ranks in front of the king, on its file and the
/// neighbouring ones
pub fn king_shield(pos: &Position, color: Color) -> TaperedScore {
    let king = pos.king_square(color);
    let file = king % 8;
    let rank = king / 8;

    let ranks = match color {
        Color::White => 0xFFFFu64.checked_shl(8 * (rank as u32 + 1)).unwrap_or(0),
        Color::Black => match rank {
            0 => 0,
            1 => 0xFF,
            _ => 0xFFFFu64 << (8 * (rank - 2)),
        },
    };
    let zone = ranks & (file_mask(file) | adjacent_files(file));
    let shield = popcount(pos.bitboards().pieces_of_type(color, Type::Pawn) & zone);
    PAWN_SHIELD_BONUS * shield as i32
}

#[derive(Clone, Copy, Debug)]
struct PawnEntry {
    key: u64,
    score: TaperedScore,
}

/// Cache of [`pawn_structure`] scores keyed by `Position::pawn_hash`
pub struct PawnHashTable {
    entries: Vec<Option<PawnEntry>>,
    pub hits: u64,
    pub misses: u64,
}

impl PawnHashTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PAWN_TABLE_ENTRIES)
    }

    /// At most `max_entries` entries, rounded down to a power of two
    pub fn with_capacity(max_entries: usize) -> Self {
        let size = 1usize << (usize::BITS - 1 - max_entries.max(1).leading_zeros());
        Self {
            entries: vec![None; size],
            hits: 0,
            misses: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Structure score of the position's pawns, computed and stored on a miss
    pub fn probe(&mut self, pos: &Position) -> TaperedScore {
        let key = pos.pawn_hash();
        let idx = (key as usize) & (self.entries.len() - 1);

        if let Some(entry) = self.entries[idx] {
            if entry.key == key {
                self.hits += 1;
                return entry.score;
            }
        }

        self.misses += 1;
        let bb = pos.bitboards();
        let score = pawn_structure(
            bb.pieces_of_type(Color::White, Type::Pawn),
            bb.pieces_of_type(Color::Black, Type::Pawn),
        );
        self.entries[idx] = Some(PawnEntry { key, score });
        score
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
        self.hits = 0;
        self.misses = 0;
    }

    /// Get hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Default for PawnHashTable {
    fn default() -> Self {
        Self::new()
    }
}
