//! Per-turn countdown measured against an injectable monotonic clock.

use std::time::Duration;
use tokio::time::Instant;

/// Source of monotonic timestamps.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Clock backed by tokio's monotonic time, so paused test time drives it too.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A single turn's deadline.
#[derive(Debug, Clone)]
pub struct TurnTimer<C> {
    duration: Duration,
    deadline: Option<Instant>,
    clock: C,
}

impl<C: Clock> TurnTimer<C> {
    /// Create a timer that has not been started yet.
    #[must_use]
    pub const fn new(duration: Duration, clock: C) -> Self {
        Self {
            duration,
            deadline: None,
            clock,
        }
    }

    /// Arm the timer from now, discarding any earlier deadline.
    pub fn start(&mut self) {
        self.deadline = Some(self.clock.now() + self.duration);
    }

    /// Time left before the deadline, clamped at zero.
    ///
    /// An unstarted timer reports its full duration.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.map_or(self.duration, |deadline| {
            deadline.saturating_duration_since(self.clock.now())
        })
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// The absolute deadline. For an unstarted timer this is projected from
    /// now without arming it.
    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.deadline
            .unwrap_or_else(|| self.clock.now() + self.duration)
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

/// Hand-driven clock for tests. Clones share the same time.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: std::rc::Rc<std::cell::Cell<Instant>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: std::rc::Rc::new(std::cell::Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
