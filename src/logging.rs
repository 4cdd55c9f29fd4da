//! Tracing subscriber setup

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::types::{Result, SalonError};

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "salontrack=debug,info"
    } else {
        "salontrack=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log to stderr (CLI commands and the server)
pub fn init_cli_logger(verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| SalonError::Config(format!("Failed to initialize logging: {}", e)))
}

/// Log to a file so the TUI's alternate screen stays clean
pub fn init_file_logger(verbose: bool, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| SalonError::Config(format!("Failed to initialize logging: {}", e)))
}
