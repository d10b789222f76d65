use colored::Colorize;

use crate::timer::{format_minutes, render_progress_bar, Mode, Settings, StatusSnapshot};

/// Format settings as pretty output
pub fn format_settings_pretty(settings: &Settings, title: &str) -> String {
    let mut output = format!("{}\n", title.bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for mode in Mode::ALL {
        output.push_str(&format!(
            "  {:<14}{}\n",
            format!("{}:", mode.tab_name()).dimmed(),
            format_minutes(settings.minutes_for(mode))
        ));
    }

    output.push_str(&format!(
        "  {:<14}every {} pomodoros\n",
        "Long break:".dimmed(),
        settings.sessions_until_long_break
    ));

    output
}

/// Format a status snapshot as pretty output
pub fn format_status_pretty(status: &StatusSnapshot) -> String {
    let timer = &status.timer;
    let state = if timer.is_running() { "▶" } else { "⏸" };

    let mut output = format!(
        "{} {}  {}  {}\n",
        state,
        timer.mode().label().bold(),
        timer.format_remaining().cyan(),
        render_progress_bar(status.progress, 20)
    );
    output.push_str(&format!(
        "  {} pomodoros · {} worked\n\n",
        status.stats.completed_pomodoros(),
        status.stats.format_worked()
    ));
    output.push_str(&format_settings_pretty(&status.settings, "Settings"));

    output
}
