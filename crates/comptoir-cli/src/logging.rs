// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};

use crate::config::Config;

/// Sends tracing output to the log file. The terminal belongs to the TUI, so nothing is
/// written to stdout or stderr.
pub fn init(config: &Config) -> Result<PathBuf> {
    let path = config.log_path()?;
    let file = open_log_file(&path)?;
    let filter = build_filter(&config.log_level())?;

    let subscriber = Registry::default().with(
        fmt::layer()
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .with_target(false)
            .with_filter(filter),
    );
    tracing::subscriber::set_global_default(subscriber)
        .context("install tracing subscriber")?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(path)
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
            format!(
                "open log file {} -- set [log].path or COMPTOIR_LOG_PATH to a writable file",
                path.display()
            )
        })
}

/// `RUST_LOG` wins over the configured level.
fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level {level:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_filter, open_log_file};
    use anyhow::Result;

    #[test]
    fn open_log_file_creates_missing_directories() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("nested").join("comptoir.log");
        open_log_file(&path)?;
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn configured_levels_build_filters() -> Result<()> {
        for level in ["trace", "debug", "info", "warn", "error"] {
            build_filter(level)?;
        }
        Ok(())
    }
}
