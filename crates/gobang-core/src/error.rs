//! Error types for cell parsing and board validation.

use crate::cell::Cell;
use crate::side::Side;
use crate::size::BoardSize;

/// Errors that occur when parsing the `x,y` text form of a [`Cell`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellParseError {
    /// The input has no `,` separating the coordinates.
    #[error("expected \"x,y\", found \"{input}\"")]
    MissingComma {
        /// The rejected input.
        input: String,
    },
    /// A coordinate is not a valid integer.
    #[error("invalid coordinate in \"{input}\"")]
    InvalidCoordinate {
        /// The rejected input.
        input: String,
    },
}

/// Errors from structural validation of the piece lists used to build a
/// [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A stone lies outside the board.
    #[error("cell {cell} is outside the {size} board")]
    OutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// The board it was checked against.
        size: BoardSize,
    },
    /// The same cell appears twice in one side's list.
    #[error("cell {cell} is listed twice for the {side}")]
    DuplicateCell {
        /// The repeated cell.
        cell: Cell,
        /// Which side's list repeats it.
        side: Side,
    },
    /// A cell is claimed by both sides.
    #[error("cell {cell} is claimed by both sides")]
    OverlappingCell {
        /// The contested cell.
        cell: Cell,
    },
}
