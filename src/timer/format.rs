//! Duration formatting for the countdown and stats.

use chrono::Duration;

/// Format a duration as MM:SS.
#[must_use]
pub fn format_duration_mmss(d: Duration) -> String {
    let total_seconds = d.num_seconds().abs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a number of seconds as MM:SS.
#[must_use]
pub fn format_seconds_mmss(seconds: u64) -> String {
    format_duration_mmss(Duration::seconds(i64::try_from(seconds).unwrap_or(i64::MAX)))
}

/// Format worked minutes as "Xh Ym".
#[must_use]
pub fn format_worked(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Format a whole number of minutes, e.g. "25 minutes" or "1 hour, 30 minutes".
#[must_use]
pub fn format_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => plural(m, "minute"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{}, {}", plural(h, "hour"), plural(m, "minute")),
    }
}

/// Render a progress bar for a fraction in `0.0..=1.0`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_mmss() {
        assert_eq!(format_duration_mmss(Duration::minutes(25)), "25:00");
        assert_eq!(format_duration_mmss(Duration::seconds(90)), "01:30");
        assert_eq!(format_duration_mmss(Duration::seconds(0)), "00:00");
    }

    #[test]
    fn test_format_seconds_mmss_beyond_an_hour() {
        assert_eq!(format_seconds_mmss(3600 * 2 + 5), "120:05");
    }

    #[test]
    fn test_format_worked() {
        assert_eq!(format_worked(0), "0h 0m");
        assert_eq!(format_worked(95), "1h 35m");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(25), "25 minutes");
        assert_eq!(format_minutes(1), "1 minute");
        assert_eq!(format_minutes(120), "2 hours");
        assert_eq!(format_minutes(61), "1 hour, 1 minute");
        assert_eq!(format_minutes(90), "1 hour, 30 minutes");
    }

    #[test]
    fn test_render_progress_bar() {
        let bar = render_progress_bar(0.5, 10);
        assert!(bar.contains("█████"));
        assert!(bar.contains("░░░░░"));
        assert_eq!(render_progress_bar(2.0, 4), "[████]");
    }
}
