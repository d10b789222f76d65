//! The display side of the controller.

use super::controller::{Stats, TimerState};
use super::mode::Mode;

/// Reflects controller state. Implementations hold no countdown state of
/// their own.
#[cfg_attr(test, mockall::automock)]
pub trait Surface {
    /// The active mode changed (tab, theme, label).
    fn mode_changed(&mut self, mode: Mode);

    /// The countdown changed.
    fn timer_changed(&mut self, timer: &TimerState);

    /// The timer started or stopped.
    fn running_changed(&mut self, running: bool);

    /// Session statistics changed.
    fn stats_changed(&mut self, stats: &Stats);
}

/// A surface that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn mode_changed(&mut self, _mode: Mode) {}

    fn timer_changed(&mut self, _timer: &TimerState) {}

    fn running_changed(&mut self, _running: bool) {}

    fn stats_changed(&mut self, _stats: &Stats) {}
}
