//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::PomodoroError;
use crate::timer::Mode;
use crate::tui::app::App;

/// Key hints for the status bar.
pub const HELP: &str = "space:start/pause | r:reset | s:skip | 1-3/tab:mode | o:settings | q:quit";

/// Key hints while the settings form is open.
pub const FORM_HELP: &str = "tab/↑↓:field | 0-9:edit | enter:save | esc:cancel";

/// Poll for one terminal event and apply it.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App, timeout: Duration) -> Result<(), PomodoroError> {
    if event::poll(timeout)
        .map_err(|e| PomodoroError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| PomodoroError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key);
            }
        }
    }

    Ok(())
}

/// Apply a key press.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Timer shortcuts are suppressed while the form is open.
    if app.settings_open() {
        handle_form_key(app, key.code);
    } else {
        handle_timer_key(app, key.code);
    }
}

fn handle_form_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_settings(),
        KeyCode::Enter => app.save_settings(),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.input_char(c),
        _ => {}
    }
}

fn handle_timer_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(c) if c == app.keys.toggle => app.toggle(),
        KeyCode::Char(c) if c == app.keys.reset => app.reset(),
        KeyCode::Char('s') => app.skip(),
        KeyCode::Char('1') => app.select_mode(Mode::Work),
        KeyCode::Char('2') => app.select_mode(Mode::ShortBreak),
        KeyCode::Char('3') => app.select_mode(Mode::LongBreak),
        KeyCode::Tab => app.next_mode(),
        KeyCode::Char('o') => app.open_settings(),
        KeyCode::Char('?') => app.status = Some(HELP.to_string()),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}
