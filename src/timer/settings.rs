//! Timer durations and their persistence.
//!
//! Settings are stored as one JSON object under [`SETTINGS_KEY`]. Reading
//! never fails: anything missing or malformed is replaced by defaults.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::mode::Mode;
use crate::error::PomodoroError;
use crate::storage::{Database, KeyValueStore};

/// Key of the persisted settings record.
pub const SETTINGS_KEY: &str = "pomodoroSettings";

const DEFAULT_WORK: u32 = 25;
const DEFAULT_SHORT_BREAK: u32 = 5;
const DEFAULT_LONG_BREAK: u32 = 15;
const DEFAULT_SESSIONS: u32 = 4;

/// Leading integer of a form field, the way a lenient number input reads it.
static LEADING_INT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?\d+)").unwrap_or_else(|e| panic!("Invalid integer regex: {e}"))
});

/// User-configurable durations, in minutes, and the long break cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Work session length in minutes.
    pub work_time: u32,
    /// Short break length in minutes.
    pub short_break_time: u32,
    /// Long break length in minutes.
    pub long_break_time: u32,
    /// Completed pomodoros between long breaks.
    pub sessions_until_long_break: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_time: DEFAULT_WORK,
            short_break_time: DEFAULT_SHORT_BREAK,
            long_break_time: DEFAULT_LONG_BREAK,
            sessions_until_long_break: DEFAULT_SESSIONS,
        }
    }
}

impl Settings {
    /// Minutes configured for a mode.
    #[must_use]
    pub const fn minutes_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_time,
            Mode::ShortBreak => self.short_break_time,
            Mode::LongBreak => self.long_break_time,
        }
    }

    /// Seconds configured for a mode.
    #[must_use]
    pub const fn seconds_for(&self, mode: Mode) -> u64 {
        self.minutes_for(mode) as u64 * 60
    }

    /// Build settings from raw form input, field by field.
    ///
    /// Each field that does not read as a positive integer falls back to its
    /// own default; the other fields are unaffected.
    #[must_use]
    pub fn from_form(form: &SettingsForm) -> Self {
        Self {
            work_time: parse_field(&form.work, DEFAULT_WORK),
            short_break_time: parse_field(&form.short_break, DEFAULT_SHORT_BREAK),
            long_break_time: parse_field(&form.long_break, DEFAULT_LONG_BREAK),
            sessions_until_long_break: parse_field(&form.sessions, DEFAULT_SESSIONS),
        }
    }

    /// Replace any zero field with its default.
    #[must_use]
    pub const fn sanitized(self) -> Self {
        const fn or(value: u32, default: u32) -> u32 {
            if value == 0 {
                default
            } else {
                value
            }
        }

        Self {
            work_time: or(self.work_time, DEFAULT_WORK),
            short_break_time: or(self.short_break_time, DEFAULT_SHORT_BREAK),
            long_break_time: or(self.long_break_time, DEFAULT_LONG_BREAK),
            sessions_until_long_break: or(self.sessions_until_long_break, DEFAULT_SESSIONS),
        }
    }
}

/// Parse a positive integer with a fallback.
///
/// Reads the leading integer of `input` (so `"12 min"` is 12 and `"7.5"` is
/// 7). Empty, non-numeric, zero, negative or out-of-range input yields
/// `default`.
#[must_use]
pub fn parse_field(input: &str, default: u32) -> u32 {
    LEADING_INT
        .captures(input)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(default)
}

/// One of the four inputs of the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    /// Work minutes
    Work,
    /// Short break minutes
    ShortBreak,
    /// Long break minutes
    LongBreak,
    /// Sessions until long break
    Sessions,
}

impl SettingsField {
    /// All fields in form order.
    pub const ALL: [Self; 4] = [Self::Work, Self::ShortBreak, Self::LongBreak, Self::Sessions];

    /// Input label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work (minutes)",
            Self::ShortBreak => "Short break (minutes)",
            Self::LongBreak => "Long break (minutes)",
            Self::Sessions => "Sessions until long break",
        }
    }

    /// Next field, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Work => Self::ShortBreak,
            Self::ShortBreak => Self::LongBreak,
            Self::LongBreak => Self::Sessions,
            Self::Sessions => Self::Work,
        }
    }

    /// Previous field, wrapping.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Work => Self::Sessions,
            Self::ShortBreak => Self::Work,
            Self::LongBreak => Self::ShortBreak,
            Self::Sessions => Self::LongBreak,
        }
    }
}

/// Raw text of the settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    /// Work minutes as typed.
    pub work: String,
    /// Short break minutes as typed.
    pub short_break: String,
    /// Long break minutes as typed.
    pub long_break: String,
    /// Sessions until long break as typed.
    pub sessions: String,
}

impl SettingsForm {
    /// Pre-fill the form from current settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            work: settings.work_time.to_string(),
            short_break: settings.short_break_time.to_string(),
            long_break: settings.long_break_time.to_string(),
            sessions: settings.sessions_until_long_break.to_string(),
        }
    }

    /// Text of a field.
    #[must_use]
    pub fn value(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::Work => &self.work,
            SettingsField::ShortBreak => &self.short_break,
            SettingsField::LongBreak => &self.long_break,
            SettingsField::Sessions => &self.sessions,
        }
    }

    /// Mutable text of a field.
    pub fn value_mut(&mut self, field: SettingsField) -> &mut String {
        match field {
            SettingsField::Work => &mut self.work,
            SettingsField::ShortBreak => &mut self.short_break,
            SettingsField::LongBreak => &mut self.long_break,
            SettingsField::Sessions => &mut self.sessions,
        }
    }
}

/// Decode a stored record. Only a JSON object is a record; serde would
/// otherwise also read an array as the fields in order.
fn parse_record(raw: &str) -> Result<Settings, PomodoroError> {
    match serde_json::from_str::<serde_json::Value>(raw)? {
        value @ serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
        other => Err(PomodoroError::Parse(format!(
            "settings record is not an object: {other}"
        ))),
    }
}

/// Settings persistence over a key-value store.
pub struct SettingsStore {
    store: Box<dyn KeyValueStore>,
}

impl SettingsStore {
    /// Wrap a key-value store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Open the on-disk store at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(path: &std::path::Path) -> Result<Self, PomodoroError> {
        Ok(Self::new(Database::open_at(path)?))
    }

    /// Load settings, substituting defaults for anything unusable.
    #[must_use]
    pub fn load(&self) -> Settings {
        let raw = match self.store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Settings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read settings, using defaults");
                return Settings::default();
            }
        };

        match parse_record(&raw) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                tracing::warn!(error = %e, "malformed settings record, using defaults");
                Settings::default()
            }
        }
    }

    /// Persist settings, replacing the whole record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    pub fn save(&mut self, settings: &Settings) -> Result<(), PomodoroError> {
        let json = serde_json::to_string(settings)?;
        self.store.set(SETTINGS_KEY, &json)?;
        tracing::debug!(record = %json, "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store_with(raw: &str) -> SettingsStore {
        let mut kv = MemoryStore::new();
        kv.set(SETTINGS_KEY, raw).unwrap();
        SettingsStore::new(kv)
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(
            (s.work_time, s.short_break_time, s.long_break_time, s.sessions_until_long_break),
            (25, 5, 15, 4)
        );
    }

    #[test]
    fn test_seconds_for_mode() {
        let s = Settings::default();
        assert_eq!(s.seconds_for(Mode::Work), 1500);
        assert_eq!(s.seconds_for(Mode::ShortBreak), 300);
        assert_eq!(s.seconds_for(Mode::LongBreak), 900);
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("10", 25), 10);
        assert_eq!(parse_field("  42 minutes", 25), 42);
        assert_eq!(parse_field("7.9", 25), 7);
        assert_eq!(parse_field("", 25), 25);
        assert_eq!(parse_field("abc", 25), 25);
        assert_eq!(parse_field("0", 25), 25);
        assert_eq!(parse_field("-3", 25), 25);
        assert_eq!(parse_field("99999999999999999999", 25), 25);
    }

    #[test]
    fn test_from_form_falls_back_per_field() {
        let form = SettingsForm {
            work: "10".to_string(),
            short_break: String::new(),
            long_break: "20".to_string(),
            sessions: "lots".to_string(),
        };

        let s = Settings::from_form(&form);
        assert_eq!(s.work_time, 10);
        assert_eq!(s.short_break_time, 5);
        assert_eq!(s.long_break_time, 20);
        assert_eq!(s.sessions_until_long_break, 4);
    }

    #[test]
    fn test_load_missing_record() {
        let store = SettingsStore::new(MemoryStore::new());
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_load_malformed_record() {
        assert_eq!(store_with("{not json").load(), Settings::default());
        assert_eq!(store_with("[1,2,3]").load(), Settings::default());
        assert_eq!(store_with("{\"workTime\":-5}").load(), Settings::default());
    }

    #[test]
    fn test_load_non_object_record() {
        assert_eq!(store_with("[1,1,1,1]").load(), Settings::default());
        assert_eq!(store_with("42").load(), Settings::default());
        assert_eq!(store_with("\"workTime\"").load(), Settings::default());
        assert_eq!(store_with("null").load(), Settings::default());
    }

    #[test]
    fn test_load_partial_record() {
        let s = store_with("{\"workTime\":50,\"sessionsUntilLongBreak\":0}").load();
        assert_eq!(s.work_time, 50);
        assert_eq!(s.short_break_time, 5);
        assert_eq!(s.sessions_until_long_break, 4);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut store = SettingsStore::new(MemoryStore::new());
        let settings = Settings {
            work_time: 10,
            short_break_time: 3,
            long_break_time: 30,
            sessions_until_long_break: 2,
        };

        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn test_on_disk_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("store.db");
        let settings = Settings {
            work_time: 10,
            ..Settings::default()
        };

        SettingsStore::open(&path).unwrap().save(&settings).unwrap();

        assert_eq!(SettingsStore::open(&path).unwrap().load(), settings);
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["workTime"], 25);
        assert_eq!(json["shortBreakTime"], 5);
        assert_eq!(json["longBreakTime"], 15);
        assert_eq!(json["sessionsUntilLongBreak"], 4);
    }

    #[test]
    fn test_form_field_access() {
        let mut form = SettingsForm::from_settings(&Settings::default());
        assert_eq!(form.value(SettingsField::LongBreak), "15");

        form.value_mut(SettingsField::Sessions).push('2');
        assert_eq!(form.sessions, "42");
        assert_eq!(SettingsField::Sessions.next(), SettingsField::Work);
        assert_eq!(SettingsField::Work.previous(), SettingsField::Sessions);
    }
}
