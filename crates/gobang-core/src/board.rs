//! The board: both sides' stones, placement history, and scoped placement.

use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::cell::Cell;
use crate::error::BoardError;
use crate::piece_set::PieceSet;
use crate::side::Side;
use crate::size::BoardSize;
use crate::win::{is_winning, wins_through};

/// Occupied cells of both sides on a fixed-size grid.
///
/// Stones enter in placement order: the engine's input stones, then the
/// opponent's, then anything placed through [`Board::place`]. The last entry of
/// that history is the "last move" that drives move ordering.
#[derive(Debug, Clone)]
pub struct Board {
    size: BoardSize,
    /// Stones per side, indexed by [`Side::index()`].
    pieces: [PieceSet; Side::COUNT],
    history: Vec<(Side, Cell)>,
}

impl Board {
    /// Create an empty board.
    pub fn new(size: BoardSize) -> Board {
        Board {
            size,
            pieces: [PieceSet::new(), PieceSet::new()],
            history: Vec::new(),
        }
    }

    /// Build a board from the two input piece lists.
    ///
    /// Rejects off-board cells, a cell listed twice for one side, and a cell
    /// claimed by both sides. Nothing is kept on error.
    pub fn from_pieces(
        size: BoardSize,
        engine: &[Cell],
        opponent: &[Cell],
    ) -> Result<Board, BoardError> {
        let mut board = Board::new(size);
        for (side, cells) in [(Side::Engine, engine), (Side::Opponent, opponent)] {
            for &cell in cells {
                if !size.contains(cell) {
                    return Err(BoardError::OutOfBounds { cell, size });
                }
                if board.pieces[side.flip().index()].contains(cell) {
                    return Err(BoardError::OverlappingCell { cell });
                }
                if !board.pieces[side.index()].push(cell) {
                    return Err(BoardError::DuplicateCell { cell, side });
                }
                board.history.push((side, cell));
            }
        }
        trace!(
            %size,
            engine = engine.len(),
            opponent = opponent.len(),
            "board built"
        );
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// The stones owned by `side`.
    #[inline]
    pub fn pieces(&self, side: Side) -> &PieceSet {
        &self.pieces[side.index()]
    }

    /// Return which side occupies `cell`, if any.
    #[inline]
    pub fn side_at(&self, cell: Cell) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|side| self.pieces[side.index()].contains(cell))
    }

    #[inline]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.pieces[0].contains(cell) || self.pieces[1].contains(cell)
    }

    /// Total number of stones on the board.
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.history.len() >= self.size.area()
    }

    /// The most recent placement and who made it.
    #[inline]
    pub fn last_placement(&self) -> Option<(Side, Cell)> {
        self.history.last().copied()
    }

    /// The most recently placed cell.
    #[inline]
    pub fn last_move(&self) -> Option<Cell> {
        self.history.last().map(|&(_, cell)| cell)
    }

    /// Unoccupied on-board cells, x-major then y.
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.size
            .cells()
            .filter(|&cell| !self.is_occupied(cell))
            .collect()
    }

    /// Return `true` if any of the eight cells around `cell` holds a stone.
    pub fn has_neighbor(&self, cell: Cell) -> bool {
        cell.neighbors().any(|n| self.is_occupied(n))
    }

    /// The side with five in a row, found by a full scan of both sides.
    pub fn winner(&self) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|&side| is_winning(self.pieces(side), self.size))
    }

    /// Return `true` if the last placement completed a five for its side.
    pub fn last_placement_wins(&self) -> bool {
        self.last_placement()
            .is_some_and(|(side, cell)| wins_through(self.pieces(side), cell))
    }

    /// Place a stone for `side` and return a guard that removes it on drop.
    ///
    /// The guard derefs to the board, so the search recurses through it. Every
    /// exit path (including early pruning returns) unwinds in LIFO order.
    pub fn place(&mut self, side: Side, cell: Cell) -> Placement<'_> {
        debug_assert!(self.size.contains(cell), "placing off-board cell {cell}");
        debug_assert!(!self.is_occupied(cell), "placing on occupied cell {cell}");
        let inserted = self.pieces[side.index()].push(cell);
        debug_assert!(inserted);
        self.history.push((side, cell));
        Placement {
            board: self,
            side,
            cell,
        }
    }

    fn unplace(&mut self) -> Option<(Side, Cell)> {
        let (side, cell) = self.history.pop()?;
        let popped = self.pieces[side.index()].pop();
        debug_assert_eq!(popped, Some(cell), "piece set out of sync with history");
        Some((side, cell))
    }
}

/// A stone placed by [`Board::place`], removed again when dropped.
pub struct Placement<'a> {
    board: &'a mut Board,
    side: Side,
    cell: Cell,
}

impl Placement<'_> {
    /// The placed cell.
    #[inline]
    pub fn cell(&self) -> Cell {
        self.cell
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    #[inline]
    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        let popped = self.board.unplace();
        debug_assert_eq!(
            popped,
            Some((self.side, self.cell)),
            "placement stack unwound out of order"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(list: &[(i32, i32)]) -> Vec<Cell> {
        list.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn from_pieces_tracks_sides_and_history() {
        let board = Board::from_pieces(
            BoardSize::DEFAULT,
            &cells(&[(1, 1), (2, 2)]),
            &cells(&[(3, 3)]),
        )
        .unwrap();
        assert_eq!(board.side_at(Cell::new(1, 1)), Some(Side::Engine));
        assert_eq!(board.side_at(Cell::new(3, 3)), Some(Side::Opponent));
        assert_eq!(board.side_at(Cell::new(4, 4)), None);
        assert_eq!(board.stone_count(), 3);
        assert_eq!(board.last_move(), Some(Cell::new(3, 3)));
    }

    #[test]
    fn from_pieces_rejects_bad_input() {
        let size = BoardSize::new(5, 5).unwrap();
        assert_eq!(
            Board::from_pieces(size, &cells(&[(5, 0)]), &[]).unwrap_err(),
            BoardError::OutOfBounds {
                cell: Cell::new(5, 0),
                size
            }
        );
        assert_eq!(
            Board::from_pieces(size, &cells(&[(1, 1), (1, 1)]), &[]).unwrap_err(),
            BoardError::DuplicateCell {
                cell: Cell::new(1, 1),
                side: Side::Engine
            }
        );
        assert_eq!(
            Board::from_pieces(size, &cells(&[(1, 1)]), &cells(&[(1, 1)])).unwrap_err(),
            BoardError::OverlappingCell {
                cell: Cell::new(1, 1)
            }
        );
    }

    #[test]
    fn placement_guard_restores_board() {
        let mut board =
            Board::from_pieces(BoardSize::DEFAULT, &cells(&[(5, 5)]), &cells(&[(6, 6)])).unwrap();
        {
            let mut child = board.place(Side::Engine, Cell::new(5, 6));
            assert!(child.is_occupied(Cell::new(5, 6)));
            assert_eq!(child.last_placement(), Some((Side::Engine, Cell::new(5, 6))));
            {
                let grandchild = child.place(Side::Opponent, Cell::new(7, 7));
                assert_eq!(grandchild.stone_count(), 4);
                assert_eq!(grandchild.cell(), Cell::new(7, 7));
            }
            assert_eq!(child.stone_count(), 3);
        }
        assert_eq!(board.stone_count(), 2);
        assert!(!board.is_occupied(Cell::new(5, 6)));
        assert_eq!(board.last_move(), Some(Cell::new(6, 6)));
        assert_eq!(board.pieces(Side::Engine).len(), 1);
    }

    #[test]
    fn empty_cells_and_neighbors() {
        let size = BoardSize::new(3, 3).unwrap();
        let board = Board::from_pieces(size, &cells(&[(0, 0)]), &[]).unwrap();
        let empty = board.empty_cells();
        assert_eq!(empty.len(), 8);
        assert_eq!(empty[0], Cell::new(0, 1));
        assert!(board.has_neighbor(Cell::new(1, 1)));
        assert!(!board.has_neighbor(Cell::new(2, 2)));
        assert!(!board.is_full());
    }

    #[test]
    fn winner_and_last_placement_wins() {
        let mut board = Board::from_pieces(
            BoardSize::DEFAULT,
            &cells(&[(0, 0), (1, 0), (2, 0), (3, 0)]),
            &[],
        )
        .unwrap();
        assert_eq!(board.winner(), None);
        let child = board.place(Side::Engine, Cell::new(4, 0));
        assert!(child.last_placement_wins());
        assert_eq!(child.winner(), Some(Side::Engine));
    }
}
