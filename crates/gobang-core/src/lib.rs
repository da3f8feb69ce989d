//! Core gobang types: cells, sides, piece sets, the board, and win detection.

mod board;
mod cell;
mod error;
mod piece_set;
mod side;
mod size;
mod win;

pub use board::{Board, Placement};
pub use cell::{Cell, NEIGHBOR_OFFSETS};
pub use error::{BoardError, CellParseError};
pub use piece_set::PieceSet;
pub use side::Side;
pub use size::BoardSize;
pub use win::{LINE_DIRECTIONS, WIN_LENGTH, is_winning, wins_through};
