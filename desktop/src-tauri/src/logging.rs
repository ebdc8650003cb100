//! Logging setup with file rotation.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

const LOGS_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "pdf2zh-desktop";
const LOG_FILE_SUFFIX: &str = "log";
const LOG_RETENTION_DAYS: usize = 7;
const DEFAULT_FILTER: &str = "info,pz_supervisor=debug";

/// Setup logging with console and rotating file output.
///
/// # Log Layers
/// - Console: Human-readable, colored output
/// - File: plain text, daily rotation, 7-day retention
///
/// Output of the pdf2zh process itself arrives under the `pdf2zh` target.
pub fn setup_logging(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let logs_dir = data_dir.join(LOGS_DIR);
    std::fs::create_dir_all(&logs_dir)?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(true);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(LOG_RETENTION_DAYS)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(&logs_dir)?;

    let file_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

/// Path of today's log file, shown in error dialogs.
///
/// The appender rotates on UTC dates.
pub fn current_log_path(data_dir: &Path) -> PathBuf {
    log_path_for(data_dir, chrono::Utc::now())
}

pub(crate) fn log_path_for(data_dir: &Path, now: chrono::DateTime<chrono::Utc>) -> PathBuf {
    let today = now.format("%Y-%m-%d");
    data_dir
        .join(LOGS_DIR)
        .join(format!("{LOG_FILE_PREFIX}.{today}.{LOG_FILE_SUFFIX}"))
}
