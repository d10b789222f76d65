//! Session completion notifications.
//!
//! A finished session plays the chime and then announces the mode being
//! entered. Both are best-effort: a missing audio player or a refused
//! desktop notification is logged and otherwise ignored.

pub mod chime;
pub mod desktop;

pub use chime::{BellSignal, ChimePlayer};
pub use desktop::DesktopNotifier;

use crate::config::{NotificationConfig, Paths};
use crate::timer::Mode;

/// Receives session completion events.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Play the completion chime.
    fn play_chime(&mut self);

    /// Announce the mode that was just entered.
    fn announce(&mut self, entering: Mode);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn play_chime(&mut self) {}

    fn announce(&mut self, _entering: Mode) {}
}

/// Chime through the system audio player, announcements through the
/// desktop notification service.
#[derive(Debug, Default)]
pub struct SystemNotifier {
    chime: Option<ChimePlayer>,
    desktop: Option<DesktopNotifier>,
}

impl SystemNotifier {
    /// Build from configuration. Parts that are disabled or unavailable are
    /// left out.
    #[must_use]
    pub fn from_config(config: &NotificationConfig, paths: &Paths) -> Self {
        let chime = if config.sound {
            match ChimePlayer::prepare(&paths.chime_file()) {
                Ok(player) => Some(player),
                Err(e) => {
                    tracing::warn!(error = %e, "chime unavailable");
                    None
                }
            }
        } else {
            None
        };

        Self {
            chime,
            desktop: config.desktop.then_some(DesktopNotifier),
        }
    }

    /// Whether the chime is enabled.
    #[must_use]
    pub const fn has_chime(&self) -> bool {
        self.chime.is_some()
    }

    /// Whether desktop notifications are enabled.
    #[must_use]
    pub const fn has_desktop(&self) -> bool {
        self.desktop.is_some()
    }

    /// Bell requests from the chime, if the chime is enabled.
    #[must_use]
    pub fn bell(&self) -> Option<BellSignal> {
        self.chime.as_ref().map(ChimePlayer::bell)
    }
}

impl Notifier for SystemNotifier {
    fn play_chime(&mut self) {
        if let Some(chime) = &self.chime {
            chime.play();
        }
    }

    fn announce(&mut self, entering: Mode) {
        if let Some(desktop) = self.desktop {
            desktop.notify_in_background(entering);
        }
    }
}
