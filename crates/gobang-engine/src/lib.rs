//! Search and evaluation for gobang.

pub mod config;
pub mod error;
pub mod eval;
pub mod search;

pub use config::{ConfigError, EngineConfig};
pub use error::SearchError;
pub use eval::{Score, evaluate, side_score};
pub use search::control::SearchControl;
pub use search::negamax::{INF, MAX_DEPTH};
pub use search::ordering::{order_moves, ordered_candidates};
pub use search::pool::ThreadPool;
pub use search::{SearchResult, SearchStats, Searcher};
