//! Command implementations for pomodoro.
//!
//! Every command returns the text to print; `main` does the printing.

mod completions;
mod settings;

pub use completions::{completion_install_instructions, completions, generate_completions, shell_from_str};
pub use settings::settings;

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::PomodoroError;
use crate::output::format_status;
use crate::timer::{SessionController, SettingsStore};

/// Execute status command
///
/// Shows the persisted settings and the session a fresh timer starts with.
///
/// # Errors
///
/// Returns an error if the settings store cannot be opened or output
/// formatting fails.
pub fn status(paths: &Paths, format: OutputFormat) -> Result<String, PomodoroError> {
    let store = SettingsStore::open(&paths.database)?;
    let controller = SessionController::new(store);
    format_status(&controller.snapshot(), format)
}
