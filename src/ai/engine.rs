//! SearchEngine - the public face of the search
//!
//! The engine owns its transposition table and configuration, and keeps the
//! last position it was given so external validators can ask questions
//! about it. Boards cross the boundary only as [`Grid`]s; the bitboard
//! representation stays inside.
//!
//! # Examples
//!
//! ```
//! use chess_search::ai::{BestMove, SearchEngine};
//! use chess_search::config::EngineConfig;
//! use chess_search::game_repr::Position;
//!
//! let mut engine = SearchEngine::new(EngineConfig::default().with_max_depth(3));
//! let grid = Position::starting().to_grid();
//! match engine.get_best_move(&grid, true, 1.0).unwrap() {
//!     BestMove::Found(mv) => println!("bestmove {}", mv),
//!     BestMove::GameOver(status) => println!("game over: {:?}", status),
//! }
//! ```

use std::time::Duration;

use log::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult, InvalidPositionError};
use crate::game_repr::{Color, GameStatus, Grid, Move, Position};
use super::search::{iterative_deepening, SearchLimits, SearchResult};
use super::transposition_table::TranspositionTable;

/// Answer of [`SearchEngine::get_best_move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestMove {
    Found(Move),
    /// The position is terminal: there is no move to return
    GameOver(GameStatus),
}

impl BestMove {
    pub fn best_move(&self) -> Option<Move> {
        match self {
            BestMove::Found(mv) => Some(*mv),
            BestMove::GameOver(_) => None,
        }
    }
}

/// Read-only counters for tuning and observability
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineStats {
    /// Nodes visited by the last search
    pub nodes_searched: u64,
    /// Transposition table hits in the last search
    pub tt_hits: u64,
    /// Occupied table entries
    pub tt_size: usize,
    pub tt_capacity: usize,
    pub tt_occupancy_permille: u32,
    /// Configured search depth
    pub search_depth: u8,
    /// Configured table size
    pub max_cache_size: usize,
    /// Last completed depth of the last search
    pub depth_reached: u8,
    pub elapsed: Duration,
}

pub struct SearchEngine {
    config: EngineConfig,
    tt: TranspositionTable,
    position: Position,
    last_result: Option<SearchResult>,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            tt: TranspositionTable::with_capacity(config.max_cache_size),
            config,
            position: Position::starting(),
            last_result: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The position validators and searches currently refer to
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Inject a position directly, bypassing move history. On error the
    /// previous position is kept.
    pub fn set_position(&mut self, grid: &Grid, white_to_move: bool) -> Result<(), InvalidPositionError> {
        self.position.set_position(grid, white_to_move)
    }

    pub fn is_king_in_check(&self, color: Color) -> bool {
        self.position.is_king_in_check(color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.position.is_checkmate(color)
    }

    /// Whether the side to move may play between two `(row, col)` squares
    pub fn is_valid_move(&self, from: (usize, usize), to: (usize, usize)) -> bool {
        self.position.is_valid_move(from, to)
    }

    /// Best move for the side to move on `grid` within `time_limit_seconds`
    ///
    /// # Returns
    /// `BestMove::Found` with a legal move whenever one exists, or
    /// `BestMove::GameOver` for a finished game. Fails only on a malformed
    /// board or a negative or non-finite time limit.
    pub fn get_best_move(&mut self, grid: &Grid, is_white_to_move: bool, time_limit_seconds: f64) -> EngineResult<BestMove> {
        let time_limit = Duration::try_from_secs_f64(time_limit_seconds)
            .map_err(|_| EngineError::InvalidTimeLimit(time_limit_seconds))?;
        self.set_position(grid, is_white_to_move)?;

        if let Some(status) = self.terminal_status() {
            debug!("position is terminal: {:?}", status);
            return Ok(BestMove::GameOver(status));
        }

        let limits = SearchLimits::depth(self.config.max_depth)
            .with_time_limit(time_limit)
            .with_aspiration_window(self.config.aspiration_window);
        let position = self.position.clone();
        let result = self.search(&position, limits);

        Ok(match result.best_move {
            Some(mv) => BestMove::Found(mv),
            None => BestMove::GameOver(position.game_status()),
        })
    }

    /// Game over for either side. A board where the side not to move is
    /// already mated counts as finished too.
    fn terminal_status(&self) -> Option<GameStatus> {
        let status = self.position.game_status();
        if status.is_over() {
            return Some(status);
        }
        let us = self.position.side_to_move();
        if self.position.is_checkmate(us.opposite()) {
            return Some(GameStatus::Checkmate { winner: us });
        }
        None
    }

    /// Run a search with explicit limits. Statistics are kept for `stats()`.
    pub fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        let result = iterative_deepening(pos, &mut self.tt, limits);
        self.last_result = Some(result.clone());
        result
    }

    /// Search `pos` to the configured default depth, bounded by the
    /// configured default time limit
    pub fn search_default_depth(&mut self, pos: &Position) -> SearchResult {
        let limits = SearchLimits::depth(self.config.default_depth)
            .with_time_limit(self.config.default_time_limit)
            .with_aspiration_window(self.config.aspiration_window);
        self.search(pos, limits)
    }

    pub fn stats(&self) -> EngineStats {
        let table = self.tt.stats();
        let last = self.last_result.as_ref();
        EngineStats {
            nodes_searched: last.map_or(0, |r| r.nodes_searched),
            tt_hits: last.map_or(0, |r| r.tt_hits),
            tt_size: table.size,
            tt_capacity: table.capacity,
            tt_occupancy_permille: table.occupancy_permille,
            search_depth: self.config.default_depth,
            max_cache_size: self.config.max_cache_size,
            depth_reached: last.map_or(0, |r| r.depth_reached),
            elapsed: last.map_or(Duration::ZERO, |r| r.elapsed),
        }
    }

    /// Forget everything learned from earlier games
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.last_result = None;
        self.position = Position::starting();
    }

    pub fn clear_cache(&mut self) {
        self.new_game();
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
