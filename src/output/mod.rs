//! Output formatting for pomodoro.
//!
//! This module provides formatters for displaying timer data in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::PomodoroError;
use crate::timer::{Settings, StatusSnapshot};

pub use json::*;
pub use pretty::*;

/// Format settings based on output format
///
/// # Errors
///
/// Returns `PomodoroError::Parse` if JSON serialization fails.
pub fn format_settings(
    settings: &Settings,
    title: &str,
    format: OutputFormat,
) -> Result<String, PomodoroError> {
    match format {
        OutputFormat::Pretty => Ok(format_settings_pretty(settings, title)),
        OutputFormat::Json => format_settings_json(settings, title),
    }
}

/// Format a status snapshot based on output format
///
/// # Errors
///
/// Returns `PomodoroError::Parse` if JSON serialization fails.
pub fn format_status(status: &StatusSnapshot, format: OutputFormat) -> Result<String, PomodoroError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(status)),
        OutputFormat::Json => format_status_json(status),
    }
}
