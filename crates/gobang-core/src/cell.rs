//! Board coordinates.

use std::fmt;
use std::str::FromStr;

use crate::error::CellParseError;

/// Offsets of the eight cells surrounding a cell, in scan order.
///
/// Ordering heuristics depend on this exact order to stay reproducible.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A grid coordinate `(x, y)`.
///
/// Cells are plain integer pairs so that neighbor and line arithmetic can
/// step off the board without wrapping; [`BoardSize::contains`](crate::BoardSize::contains)
/// decides whether a cell is playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Create a cell from its coordinates.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Return the cell `steps` away along direction `(dx, dy)`.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, steps: i32) -> Cell {
        Cell {
            x: self.x + dx * steps,
            y: self.y + dy * steps,
        }
    }

    /// Iterate the eight surrounding cells in [`NEIGHBOR_OFFSETS`] order.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dx, dy)| self.offset(dx, dy, 1))
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    /// Parse the `x,y` text form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or_else(|| CellParseError::MissingComma {
            input: s.to_string(),
        })?;
        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| CellParseError::InvalidCoordinate {
                    input: s.to_string(),
                })
        };
        Ok(Cell::new(parse(x)?, parse(y)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_steps_along_direction() {
        let c = Cell::new(3, 4);
        assert_eq!(c.offset(1, -1, 2), Cell::new(5, 2));
        assert_eq!(c.offset(0, 1, -3), Cell::new(3, 1));
    }

    #[test]
    fn neighbors_are_the_eight_surrounding_cells() {
        let n: Vec<Cell> = Cell::new(0, 0).neighbors().collect();
        assert_eq!(n.len(), 8);
        assert!(!n.contains(&Cell::new(0, 0)));
        assert_eq!(n[0], Cell::new(-1, -1));
        assert_eq!(n[7], Cell::new(1, 1));
    }

    #[test]
    fn display_and_parse() {
        let c = Cell::new(7, 11);
        assert_eq!(c.to_string(), "7,11");
        assert_eq!("7,11".parse::<Cell>().unwrap(), c);
        assert_eq!(" 2 , 3 ".trim().parse::<Cell>().unwrap(), Cell::new(2, 3));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(matches!(
            "711".parse::<Cell>(),
            Err(CellParseError::MissingComma { .. })
        ));
        assert!(matches!(
            "a,1".parse::<Cell>(),
            Err(CellParseError::InvalidCoordinate { .. })
        ));
    }
}
