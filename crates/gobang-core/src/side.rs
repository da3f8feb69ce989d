//! The two players.

use std::fmt;
use std::ops::Not;

/// Which player owns a stone: the searching engine or its opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    Engine = 0,
    Opponent = 1,
}

impl Side {
    /// Total number of sides.
    pub const COUNT: usize = 2;

    /// All sides in index order.
    pub const ALL: [Side; 2] = [Side::Engine, Side::Opponent];

    /// Return the index (0 for Engine, 1 for Opponent).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the other side.
    #[inline]
    pub const fn flip(self) -> Side {
        match self {
            Side::Engine => Side::Opponent,
            Side::Opponent => Side::Engine,
        }
    }
}

impl Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.flip()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Engine => write!(f, "engine"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}
