//! Stones owned by one side.

use std::collections::HashSet;

use crate::cell::Cell;

/// The cells occupied by one side.
///
/// Keeps placement order (the search pushes and pops in LIFO fashion) next to
/// a hash set for constant-time membership.
#[derive(Debug, Clone, Default)]
pub struct PieceSet {
    order: Vec<Cell>,
    members: HashSet<Cell>,
}

impl PieceSet {
    /// Create an empty set.
    pub fn new() -> PieceSet {
        PieceSet::default()
    }

    /// Add `cell` on top of the placement stack.
    ///
    /// Returns `false` (and changes nothing) if the cell is already present.
    pub fn push(&mut self, cell: Cell) -> bool {
        if !self.members.insert(cell) {
            return false;
        }
        self.order.push(cell);
        true
    }

    /// Remove and return the most recently pushed cell.
    pub fn pop(&mut self) -> Option<Cell> {
        let cell = self.order.pop()?;
        self.members.remove(&cell);
        Some(cell)
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.members.contains(&cell)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The most recently pushed cell.
    #[inline]
    pub fn last(&self) -> Option<Cell> {
        self.order.last().copied()
    }

    /// Cells in placement order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.order.iter().copied()
    }
}

impl PartialEq for PieceSet {
    /// Two sets are equal when they hold the same cells, regardless of order.
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for PieceSet {}

impl FromIterator<Cell> for PieceSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = PieceSet::new();
        for cell in iter {
            set.push(cell);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_is_lifo() {
        let mut set = PieceSet::new();
        assert!(set.push(Cell::new(1, 1)));
        assert!(set.push(Cell::new(2, 2)));
        assert_eq!(set.last(), Some(Cell::new(2, 2)));
        assert_eq!(set.pop(), Some(Cell::new(2, 2)));
        assert!(!set.contains(Cell::new(2, 2)));
        assert!(set.contains(Cell::new(1, 1)));
        assert_eq!(set.pop(), Some(Cell::new(1, 1)));
        assert_eq!(set.pop(), None);
        assert!(set.is_empty());
    }

    #[test]
    fn duplicate_push_rejected() {
        let mut set = PieceSet::new();
        assert!(set.push(Cell::new(0, 0)));
        assert!(!set.push(Cell::new(0, 0)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn iter_keeps_placement_order() {
        let set: PieceSet = [Cell::new(3, 0), Cell::new(1, 0), Cell::new(2, 0)]
            .into_iter()
            .collect();
        let cells: Vec<Cell> = set.iter().collect();
        assert_eq!(cells, vec![Cell::new(3, 0), Cell::new(1, 0), Cell::new(2, 0)]);
    }

    #[test]
    fn equality_ignores_order() {
        let a: PieceSet = [Cell::new(0, 0), Cell::new(1, 1)].into_iter().collect();
        let b: PieceSet = [Cell::new(1, 1), Cell::new(0, 0)].into_iter().collect();
        assert_eq!(a, b);
    }
}
