//! Five-in-a-row detection.

use crate::cell::Cell;
use crate::piece_set::PieceSet;
use crate::size::BoardSize;

/// Number of stones in a winning line.
pub const WIN_LENGTH: i32 = 5;

/// Line directions: right, down, down-right, down-left.
pub const LINE_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

/// Full scan: return `true` if `pieces` holds five consecutive on-board cells
/// in any of the four [`LINE_DIRECTIONS`].
///
/// Every on-board cell is tried as a line start, so lines touching the far
/// edges are found like any other.
pub fn is_winning(pieces: &PieceSet, size: BoardSize) -> bool {
    if pieces.len() < WIN_LENGTH as usize {
        return false;
    }
    size.cells().any(|start| {
        LINE_DIRECTIONS.iter().any(|&(dx, dy)| {
            (0..WIN_LENGTH).all(|step| {
                let cell = start.offset(dx, dy, step);
                size.contains(cell) && pieces.contains(cell)
            })
        })
    })
}

/// Local scan: return `true` if a line of at least five through `cell`
/// belongs entirely to `pieces`.
///
/// Equivalent to [`is_winning`] when `cell` is the only stone added since a
/// position without a five, at a fraction of the cost.
pub fn wins_through(pieces: &PieceSet, cell: Cell) -> bool {
    if !pieces.contains(cell) {
        return false;
    }
    LINE_DIRECTIONS.iter().any(|&(dx, dy)| {
        let run = |sign: i32| {
            (1..WIN_LENGTH)
                .take_while(|&step| pieces.contains(cell.offset(dx * sign, dy * sign, step)))
                .count() as i32
        };
        1 + run(1) + run(-1) >= WIN_LENGTH
    })
}
