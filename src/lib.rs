//! pomodoro - A Pomodoro timer for the terminal
//!
//! The heart of the crate is [`timer::SessionController`], a small state
//! machine that alternates work sessions with short and long breaks. The
//! terminal UI, notifications, tick source and settings storage plug into
//! it through traits.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod output;
pub mod storage;
pub mod timer;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::PomodoroError;
pub use timer::{Mode, SessionController, Settings};
