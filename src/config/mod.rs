//! Configuration management for pomodoro.
//!
//! This module handles loading configuration from `~/.pomodoro/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, KeyConfig, LoggingConfig, NotificationConfig};
