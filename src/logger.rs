//! Logging setup on top of the `log` facade.
//!
//! Log lines look like `[2025-01-15 14:30:00.123 INFO stitchlog::service::parts] message`
//! and go to stderr when logging is enabled, and additionally to a log file
//! when one is configured. Database driver chatter is capped at `warn`.

use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use std::path::Path;

use crate::config::LoggingConfig;

/// Targets that are too chatty at `info`
const NOISY_TARGETS: [&str; 3] = ["sqlx", "sea_orm", "hyper"];

/// Build the dispatcher described by `config` without installing it.
///
/// Returns `None` when neither stderr nor a file output is configured.
pub fn build_dispatch(config: &LoggingConfig) -> Result<Option<fern::Dispatch>> {
    let level: LevelFilter = config
        .level
        .parse()
        .with_context(|| format!("Invalid logging level '{}'", config.level))?;

    if !config.enabled && config.file.is_none() {
        return Ok(None);
    }

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level);

    for target in NOISY_TARGETS {
        dispatch = dispatch.level_for(target, level.min(LevelFilter::Warn));
    }

    if config.enabled {
        dispatch = dispatch.chain(std::io::stderr());
    }

    if let Some(path) = &config.file {
        dispatch = dispatch.chain(open_log_file(path)?);
    }

    Ok(Some(dispatch))
}

/// Install the global logger. Call once at startup.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if let Some(dispatch) = build_dispatch(config)? {
        dispatch.apply().context("Failed to install logger")?;
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))
}
