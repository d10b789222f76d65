//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Tabs},
    Frame,
};

use crate::timer::{Mode, SettingsField};
use crate::tui::app::{App, FormState};
use crate::tui::event::{FORM_HELP, HELP};

/// Theme colour of a mode.
#[must_use]
pub const fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Work => Color::Red,
        Mode::ShortBreak => Color::Green,
        Mode::LongBreak => Color::Blue,
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Mode tabs
            Constraint::Length(1), // Mode label
            Constraint::Length(3), // Countdown
            Constraint::Length(3), // Progress
            Constraint::Length(1), // Stats
            Constraint::Min(0),
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    render_label(frame, app, chunks[1]);
    render_countdown(frame, app, chunks[2]);
    render_progress(frame, app, chunks[3]);
    render_stats(frame, app, chunks[4]);
    render_status_bar(frame, app, chunks[6]);

    if let Some(form) = &app.form {
        render_settings(frame, form);
    }
}

fn render_tabs(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mode = app.controller.timer().mode();
    let titles: Vec<Line<'_>> = Mode::ALL
        .iter()
        .enumerate()
        .map(|(i, m)| Line::from(format!(" {} {} ", i + 1, m.tab_name())))
        .collect();
    let selected = Mode::ALL.iter().position(|m| *m == mode).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(mode_color(mode))
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(mode_color(mode)))
                .title(" Pomodoro "),
        );

    frame.render_widget(tabs, area);
}

fn render_label(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let timer = app.controller.timer();
    let state = if timer.is_running() { "running" } else { "paused" };
    let label = Paragraph::new(Line::from(vec![
        Span::styled(
            timer.mode().label(),
            Style::default()
                .fg(mode_color(timer.mode()))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ({state})"), Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(label, area);
}

fn render_countdown(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let timer = app.controller.timer();
    let clock = Paragraph::new(timer.format_remaining())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(mode_color(timer.mode()))
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM));

    frame.render_widget(clock, area);
}

fn render_progress(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let timer = app.controller.timer();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(mode_color(timer.mode())))
        .ratio(app.controller.progress().clamp(0.0, 1.0))
        .label(timer.format_remaining());

    frame.render_widget(gauge, area);
}

fn render_stats(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let stats = app.controller.stats();
    let line = format!(
        "{} pomodoros · {} worked",
        stats.completed_pomodoros(),
        stats.format_worked()
    );

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan)),
        area,
    );
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = if app.settings_open() {
        FORM_HELP
    } else {
        app.status.as_deref().unwrap_or(HELP)
    };

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

fn render_settings(frame: &mut Frame<'_>, state: &FormState) {
    let area = centered_rect(46, 8, frame.area());

    let lines: Vec<Line<'_>> = SettingsField::ALL
        .iter()
        .map(|field| {
            let focused = *field == state.focus;
            let value = state.form.value(*field);
            let cursor = if focused { "▏" } else { " " };
            let style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Line::from(vec![
                Span::raw(format!("{:<28}", field.label())),
                Span::styled(format!("{value}{cursor}"), style),
            ])
        })
        .collect();

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Settings "),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(form, area);
}

/// A rectangle of at most `width` x `height` centred in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::config::KeyConfig;
    use crate::storage::MemoryStore;
    use crate::timer::{ManualTicks, SessionController, SettingsStore};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        let controller = SessionController::new(SettingsStore::new(MemoryStore::new()))
            .with_ticks(ManualTicks::new());
        App::new(controller, KeyConfig::default())
    }

    #[test]
    fn test_renders_countdown_and_stats() {
        let screen = draw(&app());
        assert!(screen.contains("25:00"));
        assert!(screen.contains("Work Session"));
        assert!(screen.contains("0 pomodoros"));
        assert!(screen.contains("0h 0m"));
    }

    #[test]
    fn test_renders_settings_form() {
        let mut app = app();
        app.open_settings();
        let screen = draw(&app);
        assert!(screen.contains("Settings"));
        assert!(screen.contains("Sessions until long break"));
        assert!(screen.contains(FORM_HELP));
    }

    #[test]
    fn test_centered_rect_fits_small_area() {
        let area = Rect::new(0, 0, 10, 4);
        let rect = centered_rect(46, 8, area);
        assert_eq!(rect, area);
    }

    #[test]
    fn test_mode_colors_distinct() {
        assert_ne!(mode_color(Mode::Work), mode_color(Mode::ShortBreak));
        assert_ne!(mode_color(Mode::ShortBreak), mode_color(Mode::LongBreak));
    }
}
