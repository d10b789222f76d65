//! JSON output formatting for pomodoro.

use serde_json::json;

use crate::error::PomodoroError;
use crate::timer::{Settings, StatusSnapshot};

/// Format settings as JSON
///
/// # Errors
///
/// Returns `PomodoroError::Parse` if JSON serialization fails.
pub fn format_settings_json(settings: &Settings, title: &str) -> Result<String, PomodoroError> {
    let output = json!({
        "title": title,
        "settings": settings,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a status snapshot as JSON
///
/// # Errors
///
/// Returns `PomodoroError::Parse` if JSON serialization fails.
pub fn format_status_json(status: &StatusSnapshot) -> Result<String, PomodoroError> {
    Ok(serde_json::to_string_pretty(status)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_settings_json() {
        let out = format_settings_json(&Settings::default(), "Settings").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["title"], "Settings");
        assert_eq!(value["settings"]["longBreakTime"], 15);
    }
}
