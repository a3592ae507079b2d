// Transposition Table
//
// Bounded cache of earlier search results keyed by Zobrist hash. The table is
// a flat array of two-slot buckets: the first slot keeps the deepest result
// seen for its bucket in the current search, the second is overwritten by
// whatever arrives. Every entry carries the generation of the search that
// wrote it, so results left over from earlier searches are the first to go.

use crate::game_repr::Move;

use super::negamax::MATE_THRESHOLD;

/// Node type for transposition table entries
///
/// - Exact: the exact score for this position
/// - LowerBound: score is at least this value (beta cutoff)
/// - UpperBound: score is at most this value (no move raised alpha)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    LowerBound,
    UpperBound,
}

/// Entry in the transposition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranspositionTableEntry {
    /// Full Zobrist key, used to verify the slot really holds this position
    pub hash: u64,
    /// Remaining depth the score was searched to
    pub depth: u8,
    /// Score from the side to move's perspective, mates stored relative to this node
    pub score: i32,
    pub best_move: Option<Move>,
    pub node_type: NodeType,
    /// Search generation that wrote the entry
    pub generation: u8,
}

/// [depth-preferred, always-replace]
type Bucket = [Option<TranspositionTableEntry>; 2];

const DEPTH_SLOT: usize = 0;
const ALWAYS_SLOT: usize = 1;

/// Read-only snapshot of table usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub occupancy_permille: u32,
}

/// Transposition Table for storing previously evaluated positions
pub struct TranspositionTable {
    buckets: Vec<Bucket>,
    generation: u8,
    /// Occupied slots
    filled: usize,
    /// Statistics: number of successful probes
    pub hits: u64,
    /// Statistics: number of failed probes
    pub misses: u64,
}

impl TranspositionTable {
    /// Create a transposition table with default size (1M entries)
    pub fn new() -> Self {
        Self::with_capacity(1 << 20)
    }

    /// Create a table holding at most `max_entries` entries. The bucket
    /// count is rounded down to a power of two, so the real capacity may be
    /// smaller but never larger. The one exception is the floor of a single
    /// two-slot bucket: asking for 0 or 1 entries still gives 2.
    pub fn with_capacity(max_entries: usize) -> Self {
        let wanted = (max_entries / 2).max(1);
        let buckets = 1usize << (usize::BITS - 1 - wanted.leading_zeros());
        Self {
            buckets: vec![[None; 2]; buckets],
            generation: 0,
            filled: 0,
            hits: 0,
            misses: 0,
        }
    }

    #[inline(always)]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash as usize) & (self.buckets.len() - 1)
    }

    /// Probe the transposition table for a position
    ///
    /// Returns a copy of the entry if either slot of the bucket holds this
    /// exact key. Updates hit/miss statistics.
    pub fn probe(&mut self, hash: u64) -> Option<TranspositionTableEntry> {
        let idx = self.bucket_index(hash);
        let found = self.buckets[idx].iter().flatten().find(|e| e.hash == hash).copied();
        match found {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        found
    }

    /// Store a search result
    ///
    /// Replacement strategy:
    /// 1. A slot already holding this key is overwritten (keeping its old
    ///    best move if the new result has none)
    /// 2. The depth slot takes the new entry if it is empty, stale, or no
    ///    deeper; its previous occupant moves to the always slot
    /// 3. Otherwise the always slot takes it
    pub fn store(&mut self, hash: u64, depth: u8, score: i32, node_type: NodeType, best_move: Option<Move>) {
        let generation = self.generation;
        let mut entry = TranspositionTableEntry {
            hash,
            depth,
            score,
            best_move,
            node_type,
            generation,
        };

        let idx = self.bucket_index(hash);
        let bucket = &mut self.buckets[idx];

        for slot in bucket.iter_mut() {
            if let Some(existing) = slot {
                if existing.hash == hash {
                    if entry.best_move.is_none() {
                        entry.best_move = existing.best_move;
                    }
                    *slot = Some(entry);
                    return;
                }
            }
        }

        let replace_deep = match bucket[DEPTH_SLOT] {
            None => true,
            Some(old) => old.generation != generation || depth >= old.depth,
        };

        let mut added = 0;
        if replace_deep {
            let demoted = bucket[DEPTH_SLOT].replace(entry);
            if demoted.is_none() {
                added += 1;
            }
            if let Some(old) = demoted.filter(|old| old.generation == generation) {
                if bucket[ALWAYS_SLOT].replace(old).is_none() {
                    added += 1;
                }
            }
        } else if bucket[ALWAYS_SLOT].replace(entry).is_none() {
            added += 1;
        }
        self.filled += added;
    }

    /// Start a new search: entries from earlier searches become replaceable
    pub fn new_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Clear the transposition table
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|b| *b = [None; 2]);
        self.generation = 0;
        self.filled = 0;
        self.hits = 0;
        self.misses = 0;
    }

    /// Number of occupied entries
    pub fn size(&self) -> usize {
        self.filled
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.buckets.len() * 2
    }

    /// Occupied fraction of the table in thousandths
    pub fn occupancy_permille(&self) -> u32 {
        (self.filled as u64 * 1000 / self.capacity() as u64) as u32
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

    pub fn stats(&self) -> TableStats {
        TableStats {
            size: self.size(),
            capacity: self.capacity(),
            hits: self.hits,
            misses: self.misses,
            occupancy_permille: self.occupancy_permille(),
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Mate scores are stored as distance from the node, not from the root,
/// so an entry stays correct wherever in the tree it is found again
#[inline]
pub fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

#[inline]
pub fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}
