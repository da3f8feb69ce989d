//! Candidate ordering: search cells around the last move first.

use gobang_core::{Board, Cell, NEIGHBOR_OFFSETS};

/// Move the neighbors of `last_move` to the front of `cells`.
///
/// Neighbors are visited in [`NEIGHBOR_OFFSETS`] order and each one found is
/// moved to the front, so the last offset visited ends up first. Every other
/// cell keeps its relative order.
pub fn order_moves(cells: &mut Vec<Cell>, last_move: Option<Cell>) {
    let Some(last) = last_move else {
        return;
    };
    for (dx, dy) in NEIGHBOR_OFFSETS {
        let target = last.offset(dx, dy, 1);
        if let Some(i) = cells.iter().position(|&c| c == target) {
            cells.remove(i);
            cells.insert(0, target);
        }
    }
}

/// Empty cells of `board`, ordered around its last move.
///
/// Cells without an occupied neighbor are included; the search counts and
/// skips them.
pub fn ordered_candidates(board: &Board) -> Vec<Cell> {
    let mut cells = board.empty_cells();
    order_moves(&mut cells, board.last_move());
    cells
}

/// The first candidate the search would expand, if any.
pub fn first_expandable(board: &Board) -> Option<Cell> {
    ordered_candidates(board)
        .into_iter()
        .find(|&cell| board.has_neighbor(cell))
}
