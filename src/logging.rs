//! File-only tracing setup; the terminal belongs to the UI.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub const LOG_ENV: &str = "POKEDEX_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Installs the global subscriber. Without a log file nothing is recorded.
pub fn init(file_path: Option<&Path>) -> io::Result<()> {
    let Some(path) = file_path else {
        return Ok(());
    };
    let path = if path.is_relative() {
        std::env::current_dir()?.join(path)
    } else {
        path.to_path_buf()
    };
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&path)
        .map_err(|error| {
            io::Error::new(
                error.kind(),
                format!("failed to open log file {}: {error}", path.display()),
            )
        })?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(file)
        .with_filter(env_filter());
    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .map_err(io::Error::other)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}
