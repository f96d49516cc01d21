//! Tracing setup for the `churnpal` binary.
//!
//! Events go to stderr and to `<app root>/logs/churnpal_<timestamp>.log`, one
//! file per run. Stdout carries only the prediction. Only the newest
//! [`MAX_LOG_FILES`] runs are kept.

use std::{
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{AppDirError, AppDirs};

/// Number of per-run log files kept in the logs folder.
pub const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "churnpal";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Reasons logging could not be switched on.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    AppDir(#[from] AppDirError),
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile { path: PathBuf, source: io::Error },
    #[error("Failed to format log filename time: {0}")]
    FormatTime(#[from] time::error::Format),
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber. Calling it again is a no-op.
///
/// The caller decides whether a failure matters; the binary keeps running
/// without logs.
pub fn init() -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = AppDirs::locate()?.logs()?;
    let file_name = log_file_name(now_local_or_utc())?;
    let log_path = log_dir.join(&file_name);
    touch(&log_path)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&log_dir, &file_name));
    let timer = fmt::time::OffsetTime::new(
        UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
        DISPLAY_FORMAT,
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().with_timer(timer.clone()).with_writer(io::stderr))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    match prune_old_logs(&log_dir, MAX_LOG_FILES) {
        Ok(removed) if removed > 0 => tracing::debug!("Removed {removed} old log file(s)"),
        Ok(_) => {}
        Err(err) => tracing::warn!("Could not prune {}: {err}", log_dir.display()),
    }
    tracing::debug!("Logging to {}", log_path.display());
    Ok(())
}

const DISPLAY_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

fn touch(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .map_err(|source| LoggingError::CreateLogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Delete the oldest `.log` files beyond `keep`, returning how many went.
fn prune_old_logs(dir: &Path, keep: usize) -> io::Result<usize> {
    let mut logs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "log") && entry.file_type()?.is_file() {
            logs.push((entry.metadata()?.modified()?, path));
        }
    }
    logs.sort_by(|a, b| b.0.cmp(&a.0));
    let stale = logs.split_off(keep.min(logs.len()));
    for (_, path) in &stale {
        fs::remove_file(path)?;
    }
    Ok(stale.len())
}

fn log_file_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(format!("{LOG_FILE_PREFIX}_{}.log", now.format(NAME_FORMAT)?))
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
