//! The session controller.
//!
//! Owns the timer, the settings and the session statistics, and is the only
//! thing that mutates them. Time arrives through a [`TickSource`], output
//! leaves through a [`Surface`] and a [`Notifier`].

use serde::Serialize;

use super::format::{format_seconds_mmss, format_worked};
use super::mode::Mode;
use super::settings::{Settings, SettingsForm, SettingsStore};
use super::surface::{NullSurface, Surface};
use super::tick::{IntervalTicks, TickSource};
use crate::notify::{Notifier, NullNotifier};

/// Countdown state for the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    mode: Mode,
    time_left_seconds: u64,
    total_seconds: u64,
    is_running: bool,
}

impl TimerState {
    /// A paused, full-length timer for `mode`.
    #[must_use]
    pub const fn for_mode(mode: Mode, settings: &Settings) -> Self {
        let total = settings.seconds_for(mode);
        Self {
            mode,
            time_left_seconds: total,
            total_seconds: total,
            is_running: false,
        }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Seconds left in this session.
    #[must_use]
    pub const fn time_left_seconds(&self) -> u64 {
        self.time_left_seconds
    }

    /// Full length of this session in seconds.
    #[must_use]
    pub const fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    /// Whether the countdown is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.is_running
    }

    /// Seconds already counted down.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.total_seconds - self.time_left_seconds
    }

    /// Remaining fraction: 1.0 at the start, 0.0 at the end.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn remaining_fraction(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        self.time_left_seconds as f64 / self.total_seconds as f64
    }

    /// Remaining time as MM:SS.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_seconds_mmss(self.time_left_seconds)
    }
}

/// Counters for the current run of the program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    completed_pomodoros: u32,
    total_worked_minutes: u64,
}

impl Stats {
    /// Work sessions completed.
    #[must_use]
    pub const fn completed_pomodoros(&self) -> u32 {
        self.completed_pomodoros
    }

    /// Minutes of work credited.
    #[must_use]
    pub const fn total_worked_minutes(&self) -> u64 {
        self.total_worked_minutes
    }

    /// Worked time as "Xh Ym".
    #[must_use]
    pub fn format_worked(&self) -> String {
        format_worked(self.total_worked_minutes)
    }
}

/// Everything the controller owns, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// Active settings.
    pub settings: Settings,
    /// Countdown state.
    pub timer: TimerState,
    /// Session counters.
    pub stats: Stats,
    /// Remaining fraction of the current session.
    pub progress: f64,
}

/// Drives the work/break cycle.
pub struct SessionController {
    settings: Settings,
    timer: TimerState,
    stats: Stats,
    store: SettingsStore,
    ticks: Box<dyn TickSource>,
    notifier: Box<dyn Notifier>,
    surface: Box<dyn Surface>,
}

impl SessionController {
    /// Create a controller in work mode, paused, with settings loaded from
    /// `store`. Ticks come from the wall clock until replaced.
    #[must_use]
    pub fn new(store: SettingsStore) -> Self {
        let settings = store.load();
        tracing::info!(?settings, "settings loaded");

        Self {
            settings,
            timer: TimerState::for_mode(Mode::Work, &settings),
            stats: Stats::default(),
            store,
            ticks: Box::new(IntervalTicks::new()),
            notifier: Box::new(NullNotifier),
            surface: Box::new(NullSurface),
        }
    }

    /// Replace the tick source.
    #[must_use]
    pub fn with_ticks(mut self, ticks: impl TickSource + 'static) -> Self {
        self.ticks.stop();
        self.ticks = Box::new(ticks);
        if self.timer.is_running {
            self.ticks.start();
        }
        self
    }

    /// Replace the notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Replace the surface and render the current state on it.
    #[must_use]
    pub fn with_surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surface = Box::new(surface);
        self.render_all();
        self
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Countdown state.
    #[must_use]
    pub const fn timer(&self) -> &TimerState {
        &self.timer
    }

    /// Session counters.
    #[must_use]
    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Remaining fraction of the current session.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.timer.remaining_fraction()
    }

    /// Copy of everything the controller owns.
    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            settings: self.settings,
            timer: self.timer,
            stats: self.stats,
            progress: self.progress(),
        }
    }

    /// Reload settings from the store. Malformed data becomes defaults.
    ///
    /// The running session keeps its length; the new values apply on the
    /// next mode switch.
    pub fn load_settings(&mut self) {
        self.settings = self.store.load();
    }

    /// Switch to `mode`, stopping the timer and refilling the countdown.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.timer.is_running {
            self.pause();
        }

        self.timer = TimerState::for_mode(mode, &self.settings);
        tracing::debug!(mode = mode.id(), total = self.timer.total_seconds, "mode set");

        self.surface.mode_changed(mode);
        self.surface.timer_changed(&self.timer);
    }

    /// Start the countdown. Does nothing if already running.
    pub fn start(&mut self) {
        if self.timer.is_running {
            return;
        }

        self.timer.is_running = true;
        self.ticks.start();
        tracing::debug!(mode = self.timer.mode.id(), left = self.timer.time_left_seconds, "started");
        self.surface.running_changed(true);
    }

    /// Stop the countdown. Idempotent.
    pub fn pause(&mut self) {
        self.ticks.stop();
        if self.timer.is_running {
            self.timer.is_running = false;
            tracing::debug!(left = self.timer.time_left_seconds, "paused");
        }
        self.surface.running_changed(false);
    }

    /// Pause if running, otherwise start.
    pub fn toggle(&mut self) {
        if self.timer.is_running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Pause and refill the countdown for the current mode.
    pub fn reset(&mut self) {
        self.pause();
        self.timer.time_left_seconds = self.timer.total_seconds;
        self.surface.timer_changed(&self.timer);
    }

    /// Apply one second. Completes the session when the countdown reaches
    /// zero. Ignored while paused.
    pub fn tick(&mut self) {
        if !self.timer.is_running {
            return;
        }

        self.timer.time_left_seconds = self.timer.time_left_seconds.saturating_sub(1);
        self.surface.timer_changed(&self.timer);

        if self.timer.time_left_seconds == 0 {
            self.complete();
        }
    }

    /// Apply every tick that has fired since the last call. Returns how many
    /// were applied; ticks left over after a completion are dropped.
    pub fn pump(&mut self) -> u32 {
        let due = self.ticks.take_due();
        let mut applied = 0;

        for _ in 0..due {
            if !self.timer.is_running {
                break;
            }
            self.tick();
            applied += 1;
        }

        applied
    }

    /// Finish the current session and move to the next mode, paused.
    ///
    /// A finished work session is credited with the full configured work
    /// time, whatever actually elapsed.
    pub fn complete(&mut self) {
        self.pause();
        self.notifier.play_chime();

        let finished = self.timer.mode;
        let next = if finished == Mode::Work {
            self.stats.completed_pomodoros += 1;
            self.stats.total_worked_minutes += u64::from(self.settings.work_time);
            self.surface.stats_changed(&self.stats);

            let cadence = self.settings.sessions_until_long_break.max(1);
            if self.stats.completed_pomodoros % cadence == 0 {
                Mode::LongBreak
            } else {
                Mode::ShortBreak
            }
        } else {
            Mode::Work
        };

        tracing::info!(
            finished = finished.id(),
            next = next.id(),
            completed = self.stats.completed_pomodoros,
            worked_minutes = self.stats.total_worked_minutes,
            "session complete"
        );

        self.set_mode(next);
        self.notifier.announce(next);
    }

    /// End the current session early.
    ///
    /// In work mode, whole minutes already elapsed are credited before the
    /// session is completed as usual.
    pub fn skip(&mut self) {
        if self.timer.mode == Mode::Work && self.timer.elapsed_seconds() > 0 {
            let partial = self.timer.elapsed_seconds() / 60;
            self.stats.total_worked_minutes += partial;
            tracing::debug!(partial, "credited partial work before skip");
            self.surface.stats_changed(&self.stats);
        }

        self.complete();
    }

    /// Validate, persist and apply settings from the form.
    ///
    /// A failed write is logged; the new settings still apply in memory. If
    /// the timer is paused the current mode restarts with the new length,
    /// otherwise the change waits for the next mode switch.
    pub fn save_settings(&mut self, form: &SettingsForm) -> Settings {
        self.settings = Settings::from_form(form);

        if let Err(e) = self.store.save(&self.settings) {
            tracing::warn!(error = %e, "could not persist settings");
        }

        if !self.timer.is_running {
            self.set_mode(self.timer.mode);
        }

        self.settings
    }

    fn render_all(&mut self) {
        self.surface.mode_changed(self.timer.mode);
        self.surface.timer_changed(&self.timer);
        self.surface.running_changed(self.timer.is_running);
        self.surface.stats_changed(&self.stats);
    }
}
