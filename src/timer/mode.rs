//! Timer modes.

use serde::{Deserialize, Serialize};

/// The kind of interval being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Focused work (one pomodoro)
    #[default]
    Work,
    /// Short rest between pomodoros
    ShortBreak,
    /// Extended rest every N pomodoros
    LongBreak,
}

impl Mode {
    /// All modes in tab order.
    pub const ALL: [Self; 3] = [Self::Work, Self::ShortBreak, Self::LongBreak];

    /// Stable identifier, matching the serialized form.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::ShortBreak => "shortBreak",
            Self::LongBreak => "longBreak",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work Session",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Short name for tabs.
    #[must_use]
    pub const fn tab_name(&self) -> &'static str {
        match self {
            Self::Work => "Pomodoro",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Check if this is a break mode.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }

    /// The next mode in tab order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Work => Self::ShortBreak,
            Self::ShortBreak => Self::LongBreak,
            Self::LongBreak => Self::Work,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_next_cycles() {
        let mut mode = Mode::Work;
        for _ in 0..3 {
            mode = mode.next();
        }
        assert_eq!(mode, Mode::Work);
    }

    #[test]
    fn test_mode_serializes_camel_case() {
        assert_eq!(serde_json::to_string(&Mode::ShortBreak).unwrap(), "\"shortBreak\"");
        for mode in Mode::ALL {
            assert_eq!(serde_json::to_string(&mode).unwrap(), format!("\"{}\"", mode.id()));
        }
    }

    #[test]
    fn test_is_break() {
        assert!(!Mode::Work.is_break());
        assert!(Mode::ShortBreak.is_break());
        assert!(Mode::LongBreak.is_break());
    }
}
