//! Wall-clock budget and cooperative cancellation.
//!
//! A search runs against a monotonic deadline and a shared cancellation flag.
//! Both are folded into a single `should_stop` check so the hot loops poll one
//! place.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Budget for one search call.
#[derive(Debug, Clone)]
pub struct TimeBudget {
    started: Instant,
    /// None if the budget is too large to represent, which means no deadline.
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl TimeBudget {
    /// Start a budget of the given duration with a fresh cancellation flag.
    pub fn new(budget: Duration) -> Self {
        Self::with_flag(budget, Arc::new(AtomicBool::new(false)))
    }

    /// Start a budget of the given duration sharing an existing flag.
    pub fn with_flag(budget: Duration, cancelled: Arc<AtomicBool>) -> Self {
        let started = Instant::now();
        Self {
            started,
            deadline: started.checked_add(budget),
            cancelled,
        }
    }

    /// Whether the search should stop now.
    #[inline]
    pub fn should_stop(&self) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return true;
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// Time since the budget started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        }
    }

    /// Handle that cancels this budget from another thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(self.cancelled.clone())
    }
}

/// Cloneable handle that aborts a running search.
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub(crate) fn new(flag: Arc<AtomicBool>) -> Self {
        Self(flag)
    }

    /// Request the associated search to stop at its next check.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
