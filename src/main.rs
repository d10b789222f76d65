use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use pomodoro::cli::args::{Cli, Commands};
use pomodoro::cli::commands;
use pomodoro::config::{ColorSetting, Config, Paths};
use pomodoro::{logging, tui};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = Paths::resolve(cli.home).context("Failed to locate data directory")?;
    paths
        .ensure_dirs()
        .with_context(|| format!("Failed to create {}", paths.root.display()))?;
    let config = Config::load(&paths).context("Failed to load config.yaml")?;

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    logging::init(&paths, &config.logging).context("Failed to open log file")?;
    tracing::debug!(root = %paths.root.display(), "starting");

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        None | Some(Commands::Tui) => {
            tui::run(&paths, &config)?;
            String::new()
        }
        Some(Commands::Status) => commands::status(&paths, format)?,
        Some(Commands::Settings(args)) => commands::settings(&paths, args.command, format)?,
        Some(Commands::Completions { shell, install }) => commands::completions(&shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
