use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use console::style;
use tracing_subscriber::EnvFilter;

pub fn info(msg: &str) {
    println!("{} {}", style("[INFO]").blue().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", style("[ERROR]").red().bold(), msg);
}

/// Sends `tracing` output to `path`. The terminal belongs to the dashboard.
pub fn init_file_logger(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("installing logger: {}", e))
}
