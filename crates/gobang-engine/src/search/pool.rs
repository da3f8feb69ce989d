//! Root-split thread pool for parallel search.

use gobang_core::{Board, Cell, Side};

use crate::eval::Score;
use crate::search::SearchStats;
use crate::search::control::SearchControl;
use crate::search::negamax::{INF, SearchContext, negamax};
use crate::search::ordering::ordered_candidates;

/// Outcome of one root search at a fixed depth.
#[derive(Debug, Clone, Default)]
pub(crate) struct RootOutcome {
    /// Root value for the side to move (meaningless if `aborted`).
    pub score: Score,
    /// Candidate that last raised alpha at the root.
    pub best: Option<Cell>,
    /// First root candidate that passed the neighbor filter.
    pub first_expanded: Option<Cell>,
    pub stats: SearchStats,
    pub nodes: u64,
    pub aborted: bool,
}

/// Root-split thread pool.
///
/// With one thread the root is searched by plain negamax. With more, root
/// candidates are dealt round-robin to scoped worker threads; each worker owns
/// a clone of the board and searches its children with a full window, and the
/// root keeps the first candidate with the strictly greatest value. That is
/// the move and value the sequential search returns; only the counters differ.
pub struct ThreadPool {
    num_threads: usize,
}

impl ThreadPool {
    /// Create a pool with `num_threads` workers (at least one).
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads: num_threads.max(1),
        }
    }

    /// Search `board` for `side` to `depth` plies.
    pub(crate) fn search_root(
        &self,
        board: &mut Board,
        side: Side,
        depth: u8,
        attack_ratio: f64,
        control: &SearchControl,
    ) -> RootOutcome {
        if self.num_threads <= 1 {
            return search_single(board, side, depth, attack_ratio, control);
        }
        self.search_split(board, side, depth, attack_ratio, control)
    }

    fn search_split(
        &self,
        board: &Board,
        side: Side,
        depth: u8,
        attack_ratio: f64,
        control: &SearchControl,
    ) -> RootOutcome {
        let candidates = ordered_candidates(board);
        let expandable: Vec<(usize, Cell)> = candidates
            .iter()
            .copied()
            .filter(|&cell| board.has_neighbor(cell))
            .enumerate()
            .collect();

        let mut outcome = RootOutcome {
            score: -INF,
            nodes: 1,
            first_expanded: expandable.first().map(|&(_, cell)| cell),
            ..RootOutcome::default()
        };
        outcome.stats.search_count = candidates.len() as u64;

        let workers = self.num_threads.min(expandable.len());
        let mut scored: Vec<(usize, Cell, Score)> = Vec::with_capacity(expandable.len());

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let share: Vec<(usize, Cell)> = expandable
                        .iter()
                        .copied()
                        .skip(worker)
                        .step_by(workers)
                        .collect();
                    let mut local = board.clone();
                    s.spawn(move || {
                        let mut ctx = SearchContext::new(control, attack_ratio);
                        let mut results = Vec::with_capacity(share.len());
                        for (index, cell) in share {
                            let value = {
                                let mut child = local.place(side, cell);
                                -negamax(&mut child, !side, depth - 1, 1, -INF, INF, &mut ctx)
                            };
                            if ctx.aborted {
                                break;
                            }
                            results.push((index, cell, value));
                        }
                        (results, ctx.stats, ctx.nodes, ctx.aborted)
                    })
                })
                .collect();

            for handle in handles {
                let (results, stats, nodes, aborted) = handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
                scored.extend(results);
                outcome.stats += stats;
                outcome.nodes += nodes;
                outcome.aborted |= aborted;
            }
        });

        scored.sort_unstable_by_key(|&(index, _, _)| index);
        for (_, cell, value) in scored {
            if value > outcome.score {
                outcome.score = value;
                outcome.best = Some(cell);
            }
        }
        outcome
    }
}

/// Sequential root search.
fn search_single(
    board: &mut Board,
    side: Side,
    depth: u8,
    attack_ratio: f64,
    control: &SearchControl,
) -> RootOutcome {
    let mut ctx = SearchContext::new(control, attack_ratio);
    let score = negamax(board, side, depth, 0, -INF, INF, &mut ctx);
    RootOutcome {
        score,
        best: ctx.root_best,
        first_expanded: ctx.first_expanded,
        stats: ctx.stats,
        nodes: ctx.nodes,
        aborted: ctx.aborted,
    }
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("num_threads", &self.num_threads)
            .finish()
    }
}

impl Default for ThreadPool {
    fn default() -> Self {
        Self::new(1)
    }
}
