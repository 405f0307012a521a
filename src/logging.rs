use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Env, Target};
use log::LevelFilter;

/// Env var holding the log filter (env_logger syntax).
pub const FILTER_ENV: &str = "TASKDECK_LOG";

/// Where log lines go.
pub enum Sink<'a> {
    /// Append to a file.
    File(&'a Path),
    /// Standard error, for non-interactive commands.
    Stderr,
    /// Nothing; stderr would draw over the TUI.
    Off,
}

pub fn init(sink: Sink<'_>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().filter_or(FILTER_ENV, "info"));
    builder.format_timestamp_secs();

    match sink {
        Sink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        Sink::Stderr => {
            builder.target(Target::Stderr);
        }
        Sink::Off => {
            builder = env_logger::Builder::new();
            builder.filter_level(LevelFilter::Off);
        }
    }

    builder
        .try_init()
        .context("logger already initialised")?;
    Ok(())
}
