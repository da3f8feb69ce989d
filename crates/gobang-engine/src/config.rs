//! Engine configuration.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use gobang_core::BoardSize;

use crate::search::control::SearchControl;
use crate::search::negamax::MAX_DEPTH;

/// Upper bound on root-split worker threads.
pub const MAX_THREADS: usize = 256;

/// Errors from validating an [`EngineConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A board dimension is zero.
    #[error("invalid board dimensions {width}x{height}: both must be positive")]
    InvalidDimensions {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
    /// Search depth outside `1..=MAX_DEPTH`.
    #[error("invalid search depth {depth}: must be between 1 and {max}", max = MAX_DEPTH)]
    InvalidDepth {
        /// Requested depth.
        depth: u8,
    },
    /// Attack ratio that is not a positive finite number.
    #[error("invalid attack ratio {ratio}: must be positive and finite")]
    InvalidAttackRatio {
        /// Requested ratio.
        ratio: f64,
    },
    /// Thread count outside `1..=MAX_THREADS`.
    #[error("invalid thread count {threads}: must be between 1 and {max}", max = MAX_THREADS)]
    InvalidThreads {
        /// Requested thread count.
        threads: usize,
    },
}

/// Tunables for a [`Searcher`](crate::Searcher).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Board dimensions, fixed for the searcher's lifetime.
    pub size: BoardSize,
    /// Search depth in plies. Odd depths end on the opponent's reply.
    pub depth: u8,
    /// Weight of the opponent's shapes in the evaluation (scaled by 0.1).
    pub attack_ratio: f64,
    /// Root-split worker threads.
    pub threads: usize,
    /// Per-move time budget; `None` searches the full depth in one pass.
    pub move_time: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: BoardSize::DEFAULT,
            depth: 3,
            attack_ratio: 1.0,
            threads: 1,
            move_time: None,
        }
    }
}

impl EngineConfig {
    /// Check every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(ConfigError::InvalidDepth { depth: self.depth });
        }
        if !(self.attack_ratio.is_finite() && self.attack_ratio > 0.0) {
            return Err(ConfigError::InvalidAttackRatio {
                ratio: self.attack_ratio,
            });
        }
        if self.threads == 0 || self.threads > MAX_THREADS {
            return Err(ConfigError::InvalidThreads {
                threads: self.threads,
            });
        }
        Ok(())
    }

    /// Replace the board dimensions.
    pub fn set_dimensions(&mut self, width: u16, height: u16) -> Result<(), ConfigError> {
        self.size = BoardSize::new(width, height)
            .ok_or(ConfigError::InvalidDimensions { width, height })?;
        Ok(())
    }

    /// Build the search control for one query.
    pub fn control(&self, stopped: Arc<AtomicBool>) -> SearchControl {
        match self.move_time {
            Some(budget) => SearchControl::new_timed(stopped, budget),
            None => SearchControl::new_unbounded(stopped),
        }
    }
}
