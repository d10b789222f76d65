//! Terminal User Interface (TUI) for pomodoro.
//!
//! The timer screen: mode tabs, countdown, progress, session stats and a
//! settings form. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, FormState};
pub use ui::mode_color;

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::prelude::*;

use crate::config::{Config, Paths};
use crate::error::PomodoroError;
use crate::notify::chime::ring_bell;
use crate::notify::{BellSignal, SystemNotifier};
use crate::storage::MemoryStore;
use crate::timer::{IntervalTicks, SessionController, SettingsStore, Stats, Surface, TimerState};

/// How long to wait for input before draining ticks again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Mirrors the countdown into the terminal title.
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleSurface;

impl Surface for TitleSurface {
    fn mode_changed(&mut self, _mode: crate::timer::Mode) {}

    fn timer_changed(&mut self, timer: &TimerState) {
        let title = format!("{} - Pomodoro", timer.format_remaining());
        if let Err(e) = execute!(io::stdout(), SetTitle(title)) {
            tracing::trace!(error = %e, "could not set terminal title");
        }
    }

    fn running_changed(&mut self, _running: bool) {}

    fn stats_changed(&mut self, _stats: &Stats) {}
}

/// Build the controller used by the TUI, and the bell signal the chime
/// raises when it cannot play.
///
/// An unusable settings database degrades to in-memory settings.
#[must_use]
pub fn build_controller(paths: &Paths, config: &Config) -> (SessionController, BellSignal) {
    let store = SettingsStore::open(&paths.database).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "settings database unavailable, settings won't persist");
        SettingsStore::new(MemoryStore::new())
    });

    let notifier = SystemNotifier::from_config(&config.notifications, paths);
    let bell = notifier.bell().unwrap_or_default();

    let controller = SessionController::new(store)
        .with_ticks(IntervalTicks::new())
        .with_notifier(notifier);
    (controller, bell)
}

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(paths: &Paths, config: &Config) -> Result<(), PomodoroError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| PomodoroError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| PomodoroError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PomodoroError::Terminal(format!("Failed to create terminal: {e}")))?;

    let (controller, bell) = build_controller(paths, config);
    let mut app = App::new(controller.with_surface(TitleSurface), config.keys.clone());
    tracing::info!("tui started");
    let result = run_app(&mut terminal, &mut app, &bell);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    tracing::info!(
        completed = app.controller.stats().completed_pomodoros(),
        worked_minutes = app.controller.stats().total_worked_minutes(),
        "tui stopped"
    );
    result
}

/// Run the main application loop.
///
/// The bell is rung here, between frames, so it never lands inside one.
fn run_app<B: Backend + io::Write>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    bell: &BellSignal,
) -> Result<(), PomodoroError> {
    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomodoroError::Terminal(format!("Failed to draw: {e}")))?;

        event::handle_events(app, POLL_INTERVAL)?;
        app.pump();

        if bell.take() {
            if let Err(e) = ring_bell(terminal.backend_mut()) {
                tracing::debug!(error = %e, "could not ring bell");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotificationConfig;
    use crate::timer::Settings;

    #[test]
    fn test_build_controller_reads_saved_settings() {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        paths.ensure_dirs().unwrap();
        let settings = Settings {
            work_time: 40,
            ..Settings::default()
        };
        SettingsStore::open(&paths.database)
            .unwrap()
            .save(&settings)
            .unwrap();

        let config = Config {
            notifications: NotificationConfig {
                desktop: false,
                sound: false,
            },
            ..Config::default()
        };
        let (controller, bell) = build_controller(&paths, &config);

        assert_eq!(controller.settings(), &settings);
        assert_eq!(controller.timer().total_seconds(), 40 * 60);
        assert!(!bell.take());
    }

    #[test]
    fn test_build_controller_without_database() {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().join("missing"));

        let (controller, _bell) = build_controller(&paths, &Config::default());
        assert_eq!(controller.settings(), &Settings::default());
    }
}
