//! Hungry Snake, a terminal snake game.

mod cell;
mod config;
mod error;
mod food;
mod game;
mod input;
mod menu;
mod render;
mod snake;
mod states;
mod term;

use std::path::Path;

use anyhow::Context;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, EnvFilter};

use config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;
    let _log_guard = init_logging(&config)?;
    info!(?config, "Starting Hungry Snake");

    term::install_panic_hook();

    // The game restores the terminal itself before returning; the log guard
    // is dropped last so everything up to here gets flushed.
    let mut game = game::SnakeGame::new(&config)?;
    let result = game.run();
    if let Err(e) = &result {
        error!("Game stopped: {}", e);
    }
    info!("Bye");
    Ok(result?)
}

/// Logs go to a file: stdout is where the game is drawn.
fn init_logging(config: &Config) -> anyhow::Result<WorkerGuard> {
    let path = config.log_file.as_path();
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path {} has no file name", path.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("Cannot open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = match &config.log_level {
        Some(level) => EnvFilter::try_new(level).with_context(|| format!("Bad log level {:?}", level))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(guard)
}
