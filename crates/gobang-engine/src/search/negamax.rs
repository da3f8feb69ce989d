//! Fail-hard negamax with alpha-beta pruning.

use gobang_core::{Board, Cell, Side};

use crate::eval::{Score, evaluate};
use crate::search::SearchStats;
use crate::search::control::SearchControl;
use crate::search::ordering::ordered_candidates;

/// Score representing an unreachable upper/lower bound.
pub const INF: Score = 1 << 60;

/// Deepest search the engine accepts.
pub const MAX_DEPTH: u8 = 32;

/// Negamax alpha-beta search.
///
/// Returns the value of `board` for `side`, the player about to move. At
/// `ply == 0` the candidate that raises alpha is recorded in
/// `ctx.root_best`. Returns `beta` on a cutoff.
pub(super) fn negamax(
    board: &mut Board,
    side: Side,
    depth: u8,
    ply: u8,
    mut alpha: Score,
    beta: Score,
    ctx: &mut SearchContext<'_>,
) -> Score {
    ctx.nodes += 1;

    if ctx.control.should_stop(ctx.nodes) {
        ctx.aborted = true;
        return 0;
    }

    // Earlier positions on this path had no five, so only the last stone can
    // have made one.
    if depth == 0 || board.last_placement_wins() {
        return evaluate(board, side, ctx.attack_ratio);
    }

    for cell in ordered_candidates(board) {
        ctx.stats.search_count += 1;

        if !board.has_neighbor(cell) {
            continue;
        }

        let value = {
            let mut child = board.place(side, cell);
            -negamax(&mut child, !side, depth - 1, ply + 1, -beta, -alpha, ctx)
        };

        if ctx.aborted {
            return 0;
        }

        if ply == 0 && ctx.first_expanded.is_none() {
            ctx.first_expanded = Some(cell);
        }

        if value > alpha {
            if ply == 0 {
                ctx.root_best = Some(cell);
            }
            if value >= beta {
                ctx.stats.cut_count += 1;
                return beta;
            }
            alpha = value;
        }
    }

    alpha
}

/// Search state for one tree walk.
pub(super) struct SearchContext<'a> {
    /// Pruning and candidate counters.
    pub stats: SearchStats,
    /// Nodes entered, drives the clock check.
    pub nodes: u64,
    /// Stop flag and deadline.
    pub control: &'a SearchControl,
    /// Weight of the opponent's shapes in the evaluation.
    pub attack_ratio: f64,
    /// Candidate that last raised alpha at the root.
    pub root_best: Option<Cell>,
    /// First root candidate that passed the neighbor filter.
    pub first_expanded: Option<Cell>,
    /// Set once the control asked to stop; the walk's value is meaningless.
    pub aborted: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(control: &'a SearchControl, attack_ratio: f64) -> Self {
        Self {
            stats: SearchStats::default(),
            nodes: 0,
            control,
            attack_ratio,
            root_best: None,
            first_expanded: None,
            aborted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    use gobang_core::BoardSize;

    use super::*;

    fn unbounded() -> SearchControl {
        SearchControl::new_unbounded(Arc::new(AtomicBool::new(false)))
    }

    #[test]
    fn depth_zero_is_static_eval() {
        let mut board = Board::from_pieces(
            BoardSize::DEFAULT,
            &[Cell::new(5, 4), Cell::new(5, 5), Cell::new(5, 6)],
            &[],
        )
        .unwrap();
        let control = unbounded();
        let mut ctx = SearchContext::new(&control, 1.0);
        let value = negamax(&mut board, Side::Engine, 0, 0, -INF, INF, &mut ctx);
        assert_eq!(value, evaluate(&board, Side::Engine, 1.0));
        assert_eq!(ctx.stats, SearchStats::default());
    }

    #[test]
    fn search_leaves_board_untouched() {
        let mut board = Board::from_pieces(
            BoardSize::DEFAULT,
            &[Cell::new(5, 5), Cell::new(6, 6)],
            &[Cell::new(5, 6)],
        )
        .unwrap();
        let before: Vec<Cell> = board.pieces(Side::Engine).iter().collect();
        let control = unbounded();
        let mut ctx = SearchContext::new(&control, 1.0);
        negamax(&mut board, Side::Engine, 2, 0, -INF, INF, &mut ctx);
        let after: Vec<Cell> = board.pieces(Side::Engine).iter().collect();
        assert_eq!(before, after);
        assert_eq!(board.stone_count(), 3);
        assert_eq!(board.last_move(), Some(Cell::new(5, 6)));
        assert!(ctx.root_best.is_some());
        assert!(ctx.stats.search_count > 0);
    }

    #[test]
    fn counts_filtered_candidates() {
        // 3x3 board, one stone in the corner: 8 empty cells, 3 with neighbors.
        let mut board =
            Board::from_pieces(BoardSize::new(3, 3).unwrap(), &[Cell::new(0, 0)], &[]).unwrap();
        let control = unbounded();
        let mut ctx = SearchContext::new(&control, 1.0);
        negamax(&mut board, Side::Opponent, 1, 0, -INF, INF, &mut ctx);
        assert_eq!(ctx.stats.search_count, 8);
        assert_eq!(ctx.nodes, 1 + 3);
    }

    #[test]
    fn aborted_search_reports_abort() {
        let mut board =
            Board::from_pieces(BoardSize::DEFAULT, &[Cell::new(5, 5)], &[]).unwrap();
        let stopped = Arc::new(AtomicBool::new(true));
        let control = SearchControl::new_unbounded(stopped);
        let mut ctx = SearchContext::new(&control, 1.0);
        let value = negamax(&mut board, Side::Engine, 3, 0, -INF, INF, &mut ctx);
        assert_eq!(value, 0);
        assert!(ctx.aborted);
        assert!(ctx.root_best.is_none());
        assert_eq!(board.stone_count(), 1);
    }
}
