//! Startup configuration.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_GRID_SIZE: i32 = 15;
pub const DEFAULT_PERIOD_MS: u32 = 200;

pub const MIN_GRID_SIZE: i32 = 3;
pub const MAX_GRID_SIZE: i32 = 40;
pub const MAX_PERIOD_MS: u32 = 10_000;

/// Choices offered on the Settings page.
pub const AREA_SIZES: [(&str, i32); 3] = [("Small", 10), ("Medium", 20), ("Large", 40)];
pub const SPEEDS: [(&str, u32); 3] = [("Slow", 400), ("Medium", 200), ("Fast", 100)];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Side of the square playing grid, in cells
    pub grid_size: i32,
    /// Milliseconds between two simulation steps
    pub period_ms: u32,
    /// Where logs go. The terminal belongs to the game, so never stdout.
    pub log_file: PathBuf,
    /// Log filter directive; if unset, `RUST_LOG` or "info" applies
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_size: DEFAULT_GRID_SIZE,
            period_ms: DEFAULT_PERIOD_MS,
            log_file: env::temp_dir().join("hungry-snake.log"),
            log_level: None,
        }
    }
}

impl Config {
    /// Reads `SNAKE_GRID_SIZE`, `SNAKE_PERIOD_MS`, `SNAKE_LOG_FILE` and
    /// `SNAKE_LOG_LEVEL`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(raw) = lookup("SNAKE_GRID_SIZE") {
            let size = parse_in_range("SNAKE_GRID_SIZE", &raw, MIN_GRID_SIZE as i64, MAX_GRID_SIZE as i64)?;
            config.grid_size = size as i32;
        }

        if let Some(raw) = lookup("SNAKE_PERIOD_MS") {
            let period = parse_in_range("SNAKE_PERIOD_MS", &raw, 1, MAX_PERIOD_MS as i64)?;
            config.period_ms = period as u32;
        }

        if let Some(path) = lookup("SNAKE_LOG_FILE").filter(|p| !p.is_empty()) {
            config.log_file = PathBuf::from(path);
        }

        config.log_level = lookup("SNAKE_LOG_LEVEL").filter(|l| !l.is_empty());

        Ok(config)
    }
}

fn parse_in_range(key: &'static str, raw: &str, min: i64, max: i64) -> Result<i64> {
    let value: i64 = raw.trim().parse().map_err(|_| Error::NotANumber {
        key,
        value: raw.to_string(),
    })?;

    if value < min || value > max {
        return Err(Error::OutOfRange { key, value, min, max });
    }
    Ok(value)
}
