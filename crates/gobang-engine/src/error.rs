//! Search errors.

use gobang_core::{BoardError, Side};

use crate::config::ConfigError;

/// Errors a best-move query can report. All are detected before or instead of
/// searching; a query never returns a made-up cell.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The engine configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The piece lists are off-board, repeated, or overlapping.
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] BoardError),

    /// No empty cell is adjacent to a stone: the board is empty or full.
    #[error("no legal move: no empty cell touches a stone")]
    NoLegalMove,

    /// A side already has five in a row.
    #[error("game is over: {winner} has five in a row")]
    GameOver {
        /// The side with the five.
        winner: Side,
    },
}
