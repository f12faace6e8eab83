/// Tracing setup. The TUI owns stdout, so logs only go to a file when asked for.
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;

/// Install a plain-text fmt subscriber writing to `path`. Without a path nothing is installed
/// and tracing events are dropped.
pub fn init(path: Option<&Path>, level: Level) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;
    Ok(())
}
