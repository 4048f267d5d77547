//! Time control and search limits for chess engines.
//!
//! The search itself never looks at the clock. It hands back one result per
//! completed depth and the caller decides, between depths, whether to pull
//! another one. These types are that caller-side bookkeeping.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Search limits that control when an engine should stop deepening.
///
/// Engines stop after the first completed depth at which either limit is
/// reached. Depth 1 is always completed so there is a move to play.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Deepest iteration to run (inclusive)
    pub depth: u32,
    /// Wall-clock budget for this move (None = infinite)
    pub move_time: Option<Duration>,
    /// Time controller polled between depths
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Create limits with only depth constraint (no time limit).
    pub fn depth(depth: u32) -> Self {
        Self {
            depth,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    /// Create limits with both depth and time constraints.
    pub fn depth_and_time(depth: u32, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Create limits with only a time constraint.
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: u32::MAX,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Whether another iteration should be started after finishing `depth`.
    pub fn should_deepen(&self, depth: u32) -> bool {
        depth < self.depth && !self.time_control.check_time()
    }

    /// Start the time control clock. Call this when search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::time(Duration::from_secs(1))
    }
}

/// Thread-safe time controller that tracks whether search should stop.
///
/// Cheap to clone; clones share the stop flag, so another thread (a UI, a
/// match supervisor) can end the search at the next depth boundary.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Arc<RwLock<Option<Instant>>>,
    time_limit: Option<Duration>,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(RwLock::new(None)),
            time_limit,
        }
    }

    /// Start the clock. Should be called when search begins.
    pub fn start(&self) {
        let mut start = self.start_time.write().unwrap_or_else(|e| e.into_inner());
        *start = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Ask the search to stop at the next depth boundary.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Check the clock and latch the stop flag once the budget is spent.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(limit) = self.time_limit {
            if self.elapsed() >= limit {
                self.stop();
                return true;
            }
        }
        false
    }

    /// Get elapsed time since search started.
    pub fn elapsed(&self) -> Duration {
        let start = *self.start_time.read().unwrap_or_else(|e| e.into_inner());
        start.map(|s| s.elapsed()).unwrap_or(Duration::ZERO)
    }

    /// Get remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
