//! Settings command implementation.

use crate::cli::args::{OutputFormat, SettingsCommands};
use crate::config::Paths;
use crate::error::PomodoroError;
use crate::output::format_settings;
use crate::timer::{Settings, SettingsForm, SettingsStore};

/// Execute settings subcommands.
///
/// # Errors
///
/// Returns an error if the settings store cannot be opened or written.
pub fn settings(
    paths: &Paths,
    cmd: SettingsCommands,
    format: OutputFormat,
) -> Result<String, PomodoroError> {
    let mut store = SettingsStore::open(&paths.database)?;

    match cmd {
        SettingsCommands::Show => format_settings(&store.load(), "Settings", format),

        SettingsCommands::Set {
            work,
            short_break,
            long_break,
            sessions,
        } => {
            let mut form = SettingsForm::from_settings(&store.load());
            if let Some(v) = work {
                form.work = v;
            }
            if let Some(v) = short_break {
                form.short_break = v;
            }
            if let Some(v) = long_break {
                form.long_break = v;
            }
            if let Some(v) = sessions {
                form.sessions = v;
            }

            let updated = Settings::from_form(&form);
            store.save(&updated)?;
            tracing::info!(settings = ?updated, "settings updated from command line");
            format_settings(&updated, "Settings saved", format)
        }

        SettingsCommands::Reset => {
            let defaults = Settings::default();
            store.save(&defaults)?;
            format_settings(&defaults, "Settings reset", format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> (tempfile::TempDir, Paths) {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        (dir, paths)
    }

    fn set(work: Option<&str>, sessions: Option<&str>) -> SettingsCommands {
        SettingsCommands::Set {
            work: work.map(str::to_string),
            short_break: None,
            long_break: None,
            sessions: sessions.map(str::to_string),
        }
    }

    #[test]
    fn test_set_keeps_unspecified_fields() {
        let (_dir, paths) = paths();
        settings(&paths, set(Some("10"), None), OutputFormat::Json).unwrap();
        settings(&paths, set(None, Some("2")), OutputFormat::Json).unwrap();

        let stored = SettingsStore::open(&paths.database).unwrap().load();
        assert_eq!(stored.work_time, 10);
        assert_eq!(stored.sessions_until_long_break, 2);
        assert_eq!(stored.short_break_time, 5);
    }

    #[test]
    fn test_set_invalid_value_falls_back_to_default() {
        let (_dir, paths) = paths();
        settings(&paths, set(Some("10"), None), OutputFormat::Json).unwrap();
        settings(&paths, set(Some("ten"), None), OutputFormat::Json).unwrap();

        let stored = SettingsStore::open(&paths.database).unwrap().load();
        assert_eq!(stored.work_time, 25);
    }

    #[test]
    fn test_set_negative_value_falls_back_to_default() {
        let (_dir, paths) = paths();
        settings(&paths, set(Some("10"), Some("3")), OutputFormat::Json).unwrap();
        settings(&paths, set(Some("-5"), None), OutputFormat::Json).unwrap();

        let stored = SettingsStore::open(&paths.database).unwrap().load();
        assert_eq!(stored.work_time, 25);
        assert_eq!(stored.sessions_until_long_break, 3);
    }

    #[test]
    fn test_reset() {
        let (_dir, paths) = paths();
        settings(&paths, set(Some("10"), Some("3")), OutputFormat::Json).unwrap();
        let out = settings(&paths, SettingsCommands::Reset, OutputFormat::Json).unwrap();

        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["settings"]["workTime"], 25);
        assert_eq!(
            SettingsStore::open(&paths.database).unwrap().load(),
            Settings::default()
        );
    }

    #[test]
    fn test_show_pretty() {
        let (_dir, paths) = paths();
        let out = settings(&paths, SettingsCommands::Show, OutputFormat::Pretty).unwrap();
        assert!(out.contains("25 minutes"));
        assert!(out.contains("every 4"));
    }
}
