//! Search driver, statistics, and move selection.

pub mod control;
pub mod negamax;
pub mod ordering;
pub mod pool;

use std::ops::AddAssign;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use gobang_core::{Board, Cell, Side};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::SearchError;
use crate::eval::Score;

use control::SearchControl;
use ordering::first_expandable;
use pool::ThreadPool;

/// Counters for one query. Reset at the start of every search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Beta cutoffs.
    pub cut_count: u64,
    /// Candidate cells considered, including those skipped for having no
    /// neighboring stone.
    pub search_count: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.cut_count += rhs.cut_count;
        self.search_count += rhs.search_count;
    }
}

/// Result of a completed search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Chosen empty cell.
    pub best_move: Cell,
    /// Root value for the engine at the deepest completed depth.
    pub score: Score,
    /// Deepest fully completed depth (0 if the first pass was cut short).
    pub depth: u8,
    /// Counters accumulated over the whole query.
    pub stats: SearchStats,
    /// Tree nodes entered.
    pub nodes: u64,
}

/// Depths searched for a `target` depth.
///
/// Untimed searches make one pass. Timed searches deepen through the depths
/// sharing the target's parity, so every pass ends on the same side's ply.
fn iteration_depths(target: u8, timed: bool) -> Vec<u8> {
    if !timed {
        return vec![target];
    }
    (1..=target).filter(|d| d % 2 == target % 2).collect()
}

/// Best-move oracle for a fixed configuration.
pub struct Searcher {
    config: EngineConfig,
    pool: ThreadPool,
}

impl Searcher {
    /// Validate `config` and build a searcher for it.
    pub fn new(config: EngineConfig) -> Result<Self, SearchError> {
        config.validate()?;
        if config.depth % 2 == 0 {
            warn!(depth = config.depth, "even search depth: last ply evaluated from the engine's side");
        }
        Ok(Self {
            pool: ThreadPool::new(config.threads),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pick the engine's next move given both sides' stones.
    ///
    /// Inputs are validated before anything is searched. The time budget, if
    /// configured, starts now.
    pub fn best_move(&self, engine: &[Cell], opponent: &[Cell]) -> Result<SearchResult, SearchError> {
        let mut board = Board::from_pieces(self.config.size, engine, opponent)?;
        let control = self.config.control(Arc::new(AtomicBool::new(false)));
        self.search(&mut board, &control)
    }

    /// Search `board` for the engine's move under `control`.
    ///
    /// Returns [`SearchError::GameOver`] if a side already has five and
    /// [`SearchError::NoLegalMove`] if no empty cell touches a stone (including
    /// an empty board, where the caller applies its opening policy).
    pub fn search(&self, board: &mut Board, control: &SearchControl) -> Result<SearchResult, SearchError> {
        if let Some(winner) = board.winner() {
            return Err(SearchError::GameOver { winner });
        }

        let mut stats = SearchStats::default();
        let mut nodes = 0;
        let mut completed: Option<(u8, Score, Cell)> = None;
        let mut partial: Option<Cell> = None;

        for depth in iteration_depths(self.config.depth, control.is_timed()) {
            if completed.is_some() && control.should_stop_iterating() {
                break;
            }

            let outcome = self.pool.search_root(
                board,
                Side::Engine,
                depth,
                self.config.attack_ratio,
                control,
            );
            stats += outcome.stats;
            nodes += outcome.nodes;

            if outcome.aborted {
                debug!(depth, "search aborted mid-iteration");
                partial = outcome.best;
                break;
            }

            let Some(first) = outcome.first_expanded else {
                return Err(SearchError::NoLegalMove);
            };
            let best = outcome.best.unwrap_or(first);
            debug!(
                depth,
                score = outcome.score,
                best = %best,
                cuts = stats.cut_count,
                searched = stats.search_count,
                "iteration complete"
            );
            completed = Some((depth, outcome.score, best));
        }

        let (depth, score, best_move) = match completed {
            Some(done) => done,
            None => {
                let fallback = partial
                    .or_else(|| first_expandable(board))
                    .ok_or(SearchError::NoLegalMove)?;
                warn!(best = %fallback, "no iteration completed, using fallback move");
                (0, 0, fallback)
            }
        };

        info!(
            best = %best_move,
            score,
            depth,
            cuts = stats.cut_count,
            searched = stats.search_count,
            nodes,
            "search finished"
        );

        Ok(SearchResult {
            best_move,
            score,
            depth,
            stats,
            nodes,
        })
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("config", &self.config)
            .field("pool", &self.pool)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use gobang_core::BoardSize;

    fn cells(list: &[(i32, i32)]) -> Vec<Cell> {
        list.iter().map(|&c| Cell::from(c)).collect()
    }

    fn searcher(depth: u8) -> Searcher {
        Searcher::new(EngineConfig {
            depth,
            ..EngineConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn iteration_depths_keep_parity() {
        assert_eq!(iteration_depths(5, false), vec![5]);
        assert_eq!(iteration_depths(5, true), vec![1, 3, 5]);
        assert_eq!(iteration_depths(4, true), vec![2, 4]);
        assert_eq!(iteration_depths(1, true), vec![1]);
    }

    #[test]
    fn empty_board_has_no_legal_move() {
        let result = searcher(3).best_move(&[], &[]);
        assert_eq!(result.unwrap_err(), SearchError::NoLegalMove);
    }

    #[test]
    fn completes_own_four() {
        let result = searcher(1)
            .best_move(&cells(&[(2, 2), (2, 3), (2, 4), (2, 5)]), &[])
            .unwrap();
        assert!(
            result.best_move == Cell::new(2, 1) || result.best_move == Cell::new(2, 6),
            "expected a five-completing move, got {}",
            result.best_move
        );
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn blocks_open_four() {
        let result = searcher(1)
            .best_move(&cells(&[(9, 9)]), &cells(&[(5, 3), (5, 4), (5, 5), (5, 6)]))
            .unwrap();
        assert!(
            result.best_move == Cell::new(5, 2) || result.best_move == Cell::new(5, 7),
            "expected a block, got {}",
            result.best_move
        );
    }

    #[test]
    fn finished_game_is_rejected() {
        let err = searcher(1)
            .best_move(&[], &cells(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]))
            .unwrap_err();
        assert_eq!(err, SearchError::GameOver { winner: Side::Opponent });
    }

    #[test]
    fn invalid_position_is_rejected() {
        let err = searcher(1)
            .best_move(&cells(&[(1, 1)]), &cells(&[(1, 1)]))
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidPosition(_)));
    }

    #[test]
    fn stats_reset_between_queries() {
        let s = searcher(1);
        let engine = cells(&[(5, 5)]);
        let first = s.best_move(&engine, &[]).unwrap();
        let second = s.best_move(&engine, &[]).unwrap();
        assert_eq!(first.stats, second.stats);
        assert_eq!(first.best_move, second.best_move);
        // 143 empty cells at the root, depth 1 has no deeper candidates.
        assert_eq!(first.stats.search_count, 143);
        assert_eq!(first.stats.cut_count, 0);
    }

    #[test]
    fn stopped_search_falls_back_to_a_legal_move() {
        let s = searcher(3);
        let mut board = Board::from_pieces(BoardSize::DEFAULT, &cells(&[(5, 5)]), &[]).unwrap();
        let control = SearchControl::new_unbounded(Arc::new(AtomicBool::new(true)));
        let result = s.search(&mut board, &control).unwrap();
        assert_eq!(result.depth, 0);
        assert!(board.has_neighbor(result.best_move));
        assert!(!board.is_occupied(result.best_move));
    }

    #[test]
    fn timed_search_completes_shallow_depths() {
        let s = Searcher::new(EngineConfig {
            depth: 3,
            move_time: Some(Duration::from_secs(60)),
            ..EngineConfig::default()
        })
        .unwrap();
        let result = s
            .best_move(&cells(&[(5, 5), (5, 6)]), &cells(&[(6, 5)]))
            .unwrap();
        assert_eq!(result.depth, 3);
    }
}
