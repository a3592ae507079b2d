// AI - Negamax with Alpha-Beta Pruning
//
// Classical chess search: iterative deepening over a principal variation
// search, backed by a transposition table, and evaluated with tapered
// material, piece-square tables and cached pawn structure.
//
// Key features:
// - Deterministic (same position and limits always give the same move)
// - Transposition table to cache evaluated positions
// - Null move pruning and late move reductions
// - Quiescence search to avoid horizon effect
// - Move ordering with killer and history heuristics

mod engine;
pub mod evaluation;
pub mod move_ordering;
pub mod negamax;
pub mod pawn_structure;
mod piece_square_tables;
pub mod quiescence;
pub mod search;
pub mod transposition_table;

pub use engine::{BestMove, EngineStats, SearchEngine};
pub use evaluation::{evaluate, evaluate_incremental};
pub use pawn_structure::PawnHashTable;
pub use negamax::{is_mate_score, mate_distance, MATE_SCORE, MAX_PLY};
pub use search::{iterative_deepening, SearchLimits, SearchResult};
pub use transposition_table::{NodeType, TableStats, TranspositionTable, TranspositionTableEntry};
