//! Board dimensions and the on-board range.

use std::fmt;

use crate::cell::Cell;

/// Width and height of a rectangular board.
///
/// A cell is on the board iff `0 <= x < width` and `0 <= y < height`. The same
/// half-open range drives move enumeration and every line scan, so any cell
/// that can be played can also take part in a five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSize {
    width: u16,
    height: u16,
}

impl BoardSize {
    /// The default 12x12 grid.
    pub const DEFAULT: BoardSize = BoardSize {
        width: 12,
        height: 12,
    };

    /// Create a board size, returning `None` if either dimension is zero.
    pub const fn new(width: u16, height: u16) -> Option<BoardSize> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(BoardSize { width, height })
        }
    }

    #[inline]
    pub const fn width(self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(self) -> u16 {
        self.height
    }

    /// Number of cells on the board.
    #[inline]
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Return `true` if `cell` lies on the board.
    #[inline]
    pub const fn contains(self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width as i32 && cell.y < self.height as i32
    }

    /// Every on-board cell, x-major then y.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let height = self.height as i32;
        (0..self.width as i32).flat_map(move |x| (0..height).map(move |y| Cell::new(x, y)))
    }

    /// The central cell, used as the opening move on an empty board.
    pub const fn center(self) -> Cell {
        Cell::new(self.width as i32 / 2, self.height as i32 / 2)
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
