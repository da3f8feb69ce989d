//! Search control: stop flag and move-time deadline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Nodes between clock checks inside the tree (minus one, used as a mask).
const CLOCK_CHECK_MASK: u64 = 1023;

/// Controls when a search should stop.
///
/// Two modes:
/// - **Unbounded**: a single fixed-depth pass; only the external stop flag
///   can cut it short.
/// - **Timed**: iterative deepening under a move-time budget. The soft limit
///   (half the budget) gates new iterations, the hard limit aborts the tree.
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    start: Instant,
    soft_limit: Option<Duration>,
    hard_limit: Option<Duration>,
}

impl SearchControl {
    /// Create control without a time budget.
    pub fn new_unbounded(stopped: Arc<AtomicBool>) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            soft_limit: None,
            hard_limit: None,
        }
    }

    /// Create control with a move-time budget; the clock starts immediately.
    pub fn new_timed(stopped: Arc<AtomicBool>, move_time: Duration) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            soft_limit: Some(move_time / 2),
            hard_limit: Some(move_time),
        }
    }

    /// Return `true` if a move-time budget is in force.
    pub fn is_timed(&self) -> bool {
        self.hard_limit.is_some()
    }

    /// Check whether the search should abort immediately.
    ///
    /// The stop flag is read on every call; the clock only every 1024 nodes.
    /// When the hard limit fires the stop flag is raised so other threads
    /// sharing it unwind too.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        if nodes & CLOCK_CHECK_MASK != 0 {
            return false;
        }

        if let Some(hard) = self.hard_limit
            && self.elapsed() >= hard
        {
            self.stopped.store(true, Ordering::Release);
            return true;
        }

        false
    }

    /// Check whether iterative deepening should start another iteration.
    pub fn should_stop_iterating(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        self.soft_limit
            .is_some_and(|soft| self.elapsed() >= soft)
    }

    /// Elapsed time since the control was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Reference to the shared stop flag.
    pub fn stop_flag(&self) -> &Arc<AtomicBool> {
        &self.stopped
    }
}
