//! The shape table: local stone configurations and their threat weights.

use super::Score;

/// How a cell inside a scan window reads from the scoring side's viewpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Empty,
    Mine,
    Enemy,
}

/// A weighted pattern of 5 or 6 slots.
#[derive(Debug, Clone, Copy)]
pub struct ShapeRule {
    pub weight: Score,
    pub pattern: &'static [Slot],
}

impl ShapeRule {
    /// Return `true` if the rule matches the start of `window`.
    ///
    /// Five-slot rules look at the first five cells, six-slot rules at all six.
    #[inline]
    pub fn matches(&self, window: &[Slot; WINDOW_LEN]) -> bool {
        window[..self.pattern.len()] == *self.pattern
    }
}

/// Cells read per scan window.
pub const WINDOW_LEN: usize = 6;

/// Weight of five in a row. Exceeds any sum of non-winning shape scores on a
/// supported board, so a forced win always dominates.
pub const FIVE: Score = 1_000_000_000_000;

/// Shapes worth more than this take part in cross bonuses.
pub const CROSS_THRESHOLD: Score = 10;

const E: Slot = Slot::Empty;
const M: Slot = Slot::Mine;

/// Shape table in ascending severity.
pub const SHAPES: [ShapeRule; 15] = [
    ShapeRule { weight: 50, pattern: &[E, M, M, E, E] },
    ShapeRule { weight: 50, pattern: &[E, E, M, M, E] },
    ShapeRule { weight: 200, pattern: &[M, M, E, M, E] },
    ShapeRule { weight: 500, pattern: &[E, E, M, M, M] },
    ShapeRule { weight: 500, pattern: &[M, M, M, E, E] },
    ShapeRule { weight: 5_000, pattern: &[E, M, M, M, E] },
    ShapeRule { weight: 5_000, pattern: &[E, M, E, M, M, E] },
    ShapeRule { weight: 5_000, pattern: &[E, M, M, E, M, E] },
    ShapeRule { weight: 5_000, pattern: &[M, M, M, E, M] },
    ShapeRule { weight: 5_000, pattern: &[M, M, E, M, M] },
    ShapeRule { weight: 5_000, pattern: &[M, E, M, M, M] },
    ShapeRule { weight: 5_000, pattern: &[M, M, M, M, E] },
    ShapeRule { weight: 5_000, pattern: &[E, M, M, M, M] },
    ShapeRule { weight: 50_000, pattern: &[E, M, M, M, M, E] },
    ShapeRule { weight: FIVE, pattern: &[M, M, M, M, M] },
];

/// The heaviest rule matching `window`, first listed on ties.
pub fn best_match(window: &[Slot; WINDOW_LEN]) -> Option<Score> {
    SHAPES
        .iter()
        .filter(|rule| rule.matches(window))
        .map(|rule| rule.weight)
        .fold(None, |best, weight| match best {
            Some(b) if b >= weight => Some(b),
            _ => Some(weight),
        })
}
