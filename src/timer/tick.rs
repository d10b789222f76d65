//! One-second tick sources.
//!
//! The controller never sleeps. It starts and stops a tick source and, from
//! the event loop, drains however many whole seconds have fired since the
//! last drain.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A repeating tick that can be started, stopped and drained.
pub trait TickSource {
    /// Begin ticking. Restarts the phase if already active.
    fn start(&mut self);

    /// Stop ticking and discard pending ticks.
    fn stop(&mut self);

    /// Number of ticks fired since the last call.
    fn take_due(&mut self) -> u32;
}

/// Wall-clock ticks on a monotonic clock.
#[derive(Debug, Clone)]
pub struct IntervalTicks {
    period: Duration,
    anchor: Option<Instant>,
}

impl IntervalTicks {
    /// Tick once per second.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    /// Tick with a custom period.
    #[must_use]
    pub const fn with_period(period: Duration) -> Self {
        Self {
            period,
            anchor: None,
        }
    }
}

impl Default for IntervalTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for IntervalTicks {
    fn start(&mut self) {
        self.anchor = Some(Instant::now());
    }

    fn stop(&mut self) {
        self.anchor = None;
    }

    fn take_due(&mut self) -> u32 {
        let Some(anchor) = self.anchor else {
            return 0;
        };

        let period = self.period.as_nanos().max(1);
        let due = anchor.elapsed().as_nanos() / period;
        if due == 0 {
            return 0;
        }

        // Keep the sub-period remainder so ticks don't drift.
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        self.anchor = Some(anchor + self.period * due);
        due
    }
}

/// Ticks fired by hand. Clones share state, so a test can keep a handle
/// while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualTicks {
    pending: Rc<Cell<u32>>,
    active: Rc<Cell<bool>>,
    starts: Rc<Cell<u32>>,
}

impl ManualTicks {
    /// Create an inactive source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `n` ticks. Ignored while stopped.
    pub fn fire(&self, n: u32) {
        if self.active.get() {
            self.pending.set(self.pending.get().saturating_add(n));
        }
    }

    /// Number of times the source has been started.
    #[must_use]
    pub fn starts(&self) -> u32 {
        self.starts.get()
    }

    /// Whether the source is active, readable from any clone.
    #[must_use]
    pub fn active(&self) -> bool {
        self.active.get()
    }
}

impl TickSource for ManualTicks {
    fn start(&mut self) {
        self.active.set(true);
        self.pending.set(0);
        self.starts.set(self.starts.get() + 1);
    }

    fn stop(&mut self) {
        self.active.set(false);
        self.pending.set(0);
    }

    fn take_due(&mut self) -> u32 {
        self.pending.replace(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_inactive_has_no_ticks() {
        let mut ticks = IntervalTicks::new();
        assert_eq!(ticks.take_due(), 0);
    }

    #[test]
    fn test_interval_counts_whole_periods() {
        let mut ticks = IntervalTicks::with_period(Duration::from_millis(5));
        ticks.start();
        std::thread::sleep(Duration::from_millis(30));

        let due = ticks.take_due();
        assert!(due >= 1, "expected at least one tick, got {due}");

        ticks.stop();
        assert_eq!(ticks.take_due(), 0);
    }

    #[test]
    fn test_interval_fresh_start_has_nothing_due() {
        let mut ticks = IntervalTicks::with_period(Duration::from_secs(60));
        ticks.start();
        assert_eq!(ticks.take_due(), 0);
    }

    #[test]
    fn test_manual_ticks_shared_between_clones() {
        let handle = ManualTicks::new();
        let mut owned = handle.clone();

        handle.fire(3);
        assert_eq!(owned.take_due(), 0, "stopped source ignores ticks");

        owned.start();
        handle.fire(3);
        assert_eq!(owned.take_due(), 3);
        assert_eq!(owned.take_due(), 0);

        handle.fire(2);
        owned.stop();
        assert_eq!(owned.take_due(), 0);
        assert!(!handle.active());
        assert_eq!(handle.starts(), 1);
    }
}
