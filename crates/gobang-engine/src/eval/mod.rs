//! Pattern-based position evaluation.
//!
//! Every stone is scanned in four directions; each `(stone, direction)` pair
//! slides a six-cell window across the stone and keeps the heaviest shape it
//! finds. A shape, once credited, covers its five cells in that direction so a
//! line is never scored twice. Overlapping strong shapes earn a cross bonus.

pub mod shapes;

use std::collections::HashSet;

use gobang_core::{Board, Cell, PieceSet, Side};

use self::shapes::{CROSS_THRESHOLD, Slot, WINDOW_LEN, best_match};

/// Evaluation score. Positive favors the perspective side.
pub type Score = i64;

/// Scan directions, in the order shapes are credited.
pub const EVAL_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Scale applied to the opponent's total on top of the attack ratio.
const ENEMY_SCALE: f64 = 0.1;

/// A credited shape: its weight and the five cells it spans.
struct Credited {
    weight: Score,
    cells: [Cell; 5],
}

/// Accumulates shape credit for one side, deduplicated per line.
struct ShapeLedger {
    covered: HashSet<(Cell, usize)>,
    credited: Vec<Credited>,
}

impl ShapeLedger {
    fn new() -> Self {
        Self {
            covered: HashSet::new(),
            credited: Vec::new(),
        }
    }

    /// Score the best shape through `stone` along direction `dir`.
    fn score_line(&mut self, stone: Cell, dir: usize, mine: &PieceSet, theirs: &PieceSet) -> Score {
        if self.covered.contains(&(stone, dir)) {
            return 0;
        }

        let (dx, dy) = EVAL_DIRECTIONS[dir];
        let mut best: Option<(Score, i32)> = None;
        for offset in -5..=0 {
            let mut window = [Slot::Empty; WINDOW_LEN];
            for (i, slot) in window.iter_mut().enumerate() {
                let cell = stone.offset(dx, dy, i as i32 + offset);
                *slot = if theirs.contains(cell) {
                    Slot::Enemy
                } else if mine.contains(cell) {
                    Slot::Mine
                } else {
                    Slot::Empty
                };
            }
            if let Some(weight) = best_match(&window)
                && best.is_none_or(|(b, _)| weight > b)
            {
                best = Some((weight, offset));
            }
        }

        let Some((weight, offset)) = best else {
            return 0;
        };
        let cells: [Cell; 5] = std::array::from_fn(|i| stone.offset(dx, dy, i as i32 + offset));

        let mut bonus = 0;
        if weight > CROSS_THRESHOLD {
            for prior in &self.credited {
                if prior.weight > CROSS_THRESHOLD && prior.cells.iter().any(|c| cells.contains(c)) {
                    bonus += prior.weight + weight;
                }
            }
        }

        for &cell in &cells {
            self.covered.insert((cell, dir));
        }
        self.credited.push(Credited { weight, cells });
        weight + bonus
    }
}

/// Total shape score of `mine`, with `theirs` as blockers.
///
/// Stones are visited in placement order; the result is deterministic for a
/// given pair of sets.
pub fn side_score(mine: &PieceSet, theirs: &PieceSet) -> Score {
    let mut ledger = ShapeLedger::new();
    let mut total = 0;
    for stone in mine.iter() {
        for dir in 0..EVAL_DIRECTIONS.len() {
            total += ledger.score_line(stone, dir, mine, theirs);
        }
    }
    total
}

/// Evaluate `board` from `perspective`.
///
/// `own - opponent * attack_ratio * 0.1`, the opponent term truncated toward
/// zero. A ratio above 1 weighs the opponent's threats more heavily relative
/// to the default; below 1 weighs them less.
pub fn evaluate(board: &Board, perspective: Side, attack_ratio: f64) -> Score {
    let mine = board.pieces(perspective);
    let theirs = board.pieces(!perspective);
    let own = side_score(mine, theirs);
    let enemy = side_score(theirs, mine);
    own - (enemy as f64 * attack_ratio * ENEMY_SCALE) as Score
}
