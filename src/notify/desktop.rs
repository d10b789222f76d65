//! Desktop notifications.
//!
//! Delivery can block on the notification daemon, so the notifier sends
//! from a short-lived thread.

use std::thread::JoinHandle;

use notify_rust::Notification;

use crate::error::PomodoroError;
use crate::timer::Mode;

const SUMMARY: &str = "Pomodoro Timer";

/// Notification text for the mode being entered.
#[must_use]
pub const fn message_for(entering: Mode) -> &'static str {
    if entering.is_break() {
        "Time for a break! ☕"
    } else {
        "Time to work! 💪"
    }
}

/// Sends notifications through the platform notification service.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    /// Announce the mode being entered.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses the notification.
    pub fn notify(&self, entering: Mode) -> Result<(), PomodoroError> {
        Notification::new()
            .summary(SUMMARY)
            .body(message_for(entering))
            .appname("pomodoro")
            .icon("alarm-clock")
            .show()
            .map(|_| ())
            .map_err(|e| PomodoroError::Notification(e.to_string()))
    }

    /// Announce from a background thread. Failures are logged.
    pub fn notify_in_background(self, entering: Mode) -> JoinHandle<()> {
        spawn_logged(move || self.notify(entering))
    }
}

fn spawn_logged<F>(send: F) -> JoinHandle<()>
where
    F: FnOnce() -> Result<(), PomodoroError> + Send + 'static,
{
    std::thread::spawn(move || {
        if let Err(e) = send() {
            tracing::debug!(error = %e, "desktop notification skipped");
        }
    })
}
