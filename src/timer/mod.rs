//! The Pomodoro session state machine.
//!
//! Work and break intervals alternate:
//! - a finished work session counts as one pomodoro
//! - every Nth pomodoro is followed by a long break, the rest by short ones
//! - a finished break returns to work
//!
//! Nothing here sleeps or touches the terminal; time and output are traits.

pub mod controller;
pub mod format;
pub mod mode;
pub mod settings;
pub mod surface;
pub mod tick;

pub use controller::{SessionController, Stats, StatusSnapshot, TimerState};
pub use format::{format_minutes, format_seconds_mmss, format_worked, render_progress_bar};
pub use mode::Mode;
pub use settings::{parse_field, Settings, SettingsField, SettingsForm, SettingsStore, SETTINGS_KEY};
pub use surface::{NullSurface, Surface};
pub use tick::{IntervalTicks, ManualTicks, TickSource};
