//! Chess search engine core
//!
//! - [`game_repr`]: bitboard positions, Zobrist hashing, move generation
//! - [`ai`]: evaluation, transposition table, and the iterative deepening search
//! - [`config`]: engine settings and difficulty presets
//! - [`error`]: what can go wrong at the boundary

pub mod ai;
pub mod config;
pub mod error;
pub mod game_repr;

pub use ai::{BestMove, SearchEngine};
pub use config::{Difficulty, EngineConfig};
pub use error::{EngineError, EngineResult, InvalidPositionError};
