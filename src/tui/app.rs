//! Application state for the TUI.

use crate::config::KeyConfig;
use crate::timer::{Mode, SessionController, SettingsField, SettingsForm};

/// The open settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Text of the four inputs.
    pub form: SettingsForm,
    /// Input with the cursor.
    pub focus: SettingsField,
}

/// Longest value accepted in a settings input.
const MAX_INPUT_LEN: usize = 4;

/// Application state.
pub struct App {
    /// The session controller; all timer state lives here.
    pub controller: SessionController,
    /// Configured shortcuts.
    pub keys: KeyConfig,
    /// Settings form, when open.
    pub form: Option<FormState>,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create a new app instance.
    #[must_use]
    pub fn new(controller: SessionController, keys: KeyConfig) -> Self {
        Self {
            controller,
            keys,
            form: None,
            status: None,
            should_quit: false,
        }
    }

    /// Whether the settings form is open.
    #[must_use]
    pub const fn settings_open(&self) -> bool {
        self.form.is_some()
    }

    /// Apply any due ticks.
    pub fn pump(&mut self) {
        let before = self.controller.stats().completed_pomodoros();
        let mode = self.controller.timer().mode();

        if self.controller.pump() > 0 && self.controller.timer().mode() != mode {
            self.status = Some(if self.controller.stats().completed_pomodoros() > before {
                format!("Pomodoro done! Next: {}", self.controller.timer().mode())
            } else {
                "Break over, back to work".to_string()
            });
        }
    }

    /// Start or pause.
    pub fn toggle(&mut self) {
        self.controller.toggle();
        self.status = None;
    }

    /// Reset the current session.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.status = Some("Reset".to_string());
    }

    /// Skip to the next session.
    pub fn skip(&mut self) {
        self.controller.skip();
        self.status = Some(format!("Skipped. Next: {}", self.controller.timer().mode()));
    }

    /// Jump to a mode.
    pub fn select_mode(&mut self, mode: Mode) {
        self.controller.set_mode(mode);
        self.status = None;
    }

    /// Jump to the next mode tab.
    pub fn next_mode(&mut self) {
        let next = self.controller.timer().mode().next();
        self.select_mode(next);
    }

    /// Open the settings form pre-filled with the current settings.
    pub fn open_settings(&mut self) {
        self.form = Some(FormState {
            form: SettingsForm::from_settings(self.controller.settings()),
            focus: SettingsField::Work,
        });
    }

    /// Close the settings form without saving.
    pub fn close_settings(&mut self) {
        self.form = None;
    }

    /// Save the settings form and close it.
    pub fn save_settings(&mut self) {
        if let Some(state) = self.form.take() {
            self.controller.save_settings(&state.form);
            self.status = Some(if self.controller.timer().is_running() {
                "Settings saved; applies to the next session".to_string()
            } else {
                "Settings saved".to_string()
            });
        }
    }

    /// Move the cursor to the next input.
    pub fn focus_next(&mut self) {
        if let Some(state) = &mut self.form {
            state.focus = state.focus.next();
        }
    }

    /// Move the cursor to the previous input.
    pub fn focus_previous(&mut self) {
        if let Some(state) = &mut self.form {
            state.focus = state.focus.previous();
        }
    }

    /// Type into the focused input. Only digits are accepted.
    pub fn input_char(&mut self, c: char) {
        if let Some(state) = &mut self.form {
            let value = state.form.value_mut(state.focus);
            if c.is_ascii_digit() && value.len() < MAX_INPUT_LEN {
                value.push(c);
            }
        }
    }

    /// Delete the last character of the focused input.
    pub fn backspace(&mut self) {
        if let Some(state) = &mut self.form {
            state.form.value_mut(state.focus).pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::timer::{ManualTicks, SettingsStore};

    fn app() -> (App, ManualTicks) {
        let ticks = ManualTicks::new();
        let controller =
            SessionController::new(SettingsStore::new(MemoryStore::new())).with_ticks(ticks.clone());
        (App::new(controller, KeyConfig::default()), ticks)
    }

    #[test]
    fn test_form_edit_and_save() {
        let (mut app, _ticks) = app();
        app.open_settings();
        assert!(app.settings_open());

        app.backspace();
        app.backspace();
        app.input_char('1');
        app.input_char('x');
        app.input_char('0');

        app.save_settings();

        assert!(!app.settings_open());
        assert_eq!(app.controller.settings().work_time, 10);
        assert_eq!(app.controller.timer().total_seconds(), 600);
    }

    #[test]
    fn test_empty_field_saves_default() {
        let (mut app, _ticks) = app();
        app.open_settings();
        app.focus_next();
        app.backspace();
        app.save_settings();

        assert_eq!(app.controller.settings().short_break_time, 5);
    }

    #[test]
    fn test_close_discards_edits() {
        let (mut app, _ticks) = app();
        app.open_settings();
        app.input_char('9');
        app.close_settings();

        assert_eq!(app.controller.settings().work_time, 25);
    }

    #[test]
    fn test_input_length_is_capped() {
        let (mut app, _ticks) = app();
        app.open_settings();
        app.focus_previous();
        for _ in 0..10 {
            app.input_char('9');
        }
        let state = app.form.as_ref().unwrap();
        assert_eq!(state.focus, SettingsField::Sessions);
        assert_eq!(state.form.sessions.len(), MAX_INPUT_LEN);
    }

    #[test]
    fn test_pump_reports_completion() {
        let (mut app, ticks) = app();
        app.toggle();
        ticks.fire(1500);
        app.pump();

        assert_eq!(app.controller.timer().mode(), Mode::ShortBreak);
        assert!(app.status.as_deref().unwrap_or_default().contains("Short Break"));
    }

    #[test]
    fn test_next_mode_wraps() {
        let (mut app, _ticks) = app();
        app.next_mode();
        app.next_mode();
        app.next_mode();
        assert_eq!(app.controller.timer().mode(), Mode::Work);
    }
}
