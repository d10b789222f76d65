use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "pomodoro")]
#[command(about = "A Pomodoro timer for the terminal")]
#[command(long_about = "pomodoro - A Pomodoro timer for the terminal

Alternates work sessions with short and long breaks, counts completed
pomodoros, and plays a chime when a session ends.

QUICK START:
  pomodoro                         Open the timer
  pomodoro settings set --work 50  Use 50-minute work sessions
  pomodoro status                  Show the current settings

KEYS (in the timer):
  space   Start / pause
  r       Reset the session
  s       Skip to the next session
  1 2 3   Work / short break / long break
  o       Settings
  q       Quit

Data lives in ~/.pomodoro (override with --home or POMODORO_HOME).")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to the `general.default_output` config value.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Data directory (default: ~/.pomodoro)
    #[arg(long, global = true, env = "POMODORO_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive timer (default)
    ///
    /// # Keyboard Shortcuts
    ///
    ///   space          Start / pause (configurable: keys.toggle)
    ///   r              Reset session (configurable: keys.reset)
    ///   s              Skip to the next session
    ///   1/2/3, Tab     Select work / short break / long break
    ///   o              Open settings
    ///   q/Esc          Quit
    ///
    /// Shortcuts are disabled while the settings form is open.
    Tui,

    /// Show settings and the session the timer will start with
    Status,

    /// View or change timer durations
    ///
    /// # Examples
    ///
    ///   pomodoro settings show
    ///   pomodoro settings set --work 50 --short-break 10
    ///   pomodoro settings reset
    Settings(SettingsArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   pomodoro completions bash > ~/.bash_completion.d/pomodoro
    ///   pomodoro completions zsh --install
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Print installation instructions instead of the script
        #[arg(long)]
        install: bool,
    },
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

/// Settings subcommands.
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print the current settings
    Show,

    /// Change one or more settings
    ///
    /// Values that are not positive whole numbers fall back to that
    /// setting's default (25/5/15/4). Settings not given are kept.
    Set {
        /// Work session length in minutes
        #[arg(long, short = 'w', allow_hyphen_values = true)]
        work: Option<String>,

        /// Short break length in minutes
        #[arg(long, short = 's', allow_hyphen_values = true)]
        short_break: Option<String>,

        /// Long break length in minutes
        #[arg(long, short = 'l', allow_hyphen_values = true)]
        long_break: Option<String>,

        /// Work sessions before a long break
        #[arg(long, short = 'n', allow_hyphen_values = true)]
        sessions: Option<String>,
    },

    /// Restore the default settings
    Reset,
}
