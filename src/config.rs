//! Engine configuration
//!
//! [`EngineConfig`] holds the knobs of a [`SearchEngine`](crate::ai::SearchEngine).
//! Start from `EngineConfig::default()` and adjust with the `with_*` methods,
//! or take one of the [`Difficulty`] presets.

use std::time::Duration;

use crate::ai::negamax::INFINITY;
use crate::ai::MAX_PLY;

/// Search settings for one engine instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Hard cap on iterative deepening, whatever the time budget
    pub max_depth: u8,
    /// Depth used by fixed-depth searches and reported in stats
    pub default_depth: u8,
    /// Maximum number of transposition table entries
    pub max_cache_size: usize,
    /// Budget used when a caller does not pass one
    pub default_time_limit: Duration,
    /// Half-width of the aspiration window in centipawns
    pub aspiration_window: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_PLY as u8,
            default_depth: 4,
            max_cache_size: 1 << 20,
            default_time_limit: Duration::from_secs(5),
            aspiration_window: 50,
        }
    }
}

impl EngineConfig {
    pub fn with_max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth.clamp(1, MAX_PLY as u8 - 1);
        self
    }

    pub fn with_default_depth(mut self, depth: u8) -> Self {
        self.default_depth = depth.max(1);
        self
    }

    pub fn with_max_cache_size(mut self, entries: usize) -> Self {
        self.max_cache_size = entries.max(2);
        self
    }

    pub fn with_default_time_limit(mut self, limit: Duration) -> Self {
        self.default_time_limit = limit;
        self
    }

    pub fn with_aspiration_window(mut self, window: i32) -> Self {
        self.aspiration_window = window.clamp(1, INFINITY);
        self
    }
}

/// AI difficulty levels that map to search depth and time controls
///
/// - **Easy**: Depth 2
/// - **Medium**: Depth 4
/// - **Hard**: Depth 6
/// - **Expert**: Depth 8 with a 5 second time limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Get the maximum search depth for this difficulty level
    ///
    /// Returns the number of plies (half-moves) to search. WASM builds search
    /// shallower because the search blocks the browser's event loop.
    pub fn max_depth(&self) -> u8 {
        #[cfg(target_arch = "wasm32")]
        {
            match self {
                Difficulty::Easy => 1,
                Difficulty::Medium => 2,
                Difficulty::Hard => 3,
                Difficulty::Expert => 4,
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self {
                Difficulty::Easy => 2,
                Difficulty::Medium => 4,
                Difficulty::Hard => 6,
                Difficulty::Expert => 8,
            }
        }
    }

    /// Time limit for this difficulty level, None for depth-only play
    pub fn time_limit(&self) -> Option<Duration> {
        match self {
            Difficulty::Expert => Some(Duration::from_secs(5)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

impl From<Difficulty> for EngineConfig {
    fn from(difficulty: Difficulty) -> Self {
        let depth = difficulty.max_depth();
        let config = EngineConfig::default()
            .with_max_depth(depth)
            .with_default_depth(depth);
        match difficulty.time_limit() {
            Some(limit) => config.with_default_time_limit(limit),
            None => config,
        }
    }
}
