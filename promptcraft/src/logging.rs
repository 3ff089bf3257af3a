use anyhow::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directory holding one log file per run, under the user config directory.
pub fn logs_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(anyhow::anyhow!("Could not find config directory"))?
        .join("promptcraft");
    Ok(config_dir.join("logs"))
}

/// Initialize tracing with file-based logging.
/// Logs go to ~/.config/promptcraft/logs/promptcraft-YYYY-MM-DD-HH-MM-SS.log so
/// they never interleave with command output.
pub fn init_logging() -> Result<PathBuf> {
    let logs_dir = logs_dir()?;
    let (log_path, guard) = init_logging_in(&logs_dir)?;

    // Keep the guard alive for the lifetime of the program
    std::mem::forget(guard);

    Ok(log_path)
}

fn init_logging_in(logs_dir: &Path) -> Result<(PathBuf, WorkerGuard)> {
    std::fs::create_dir_all(logs_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_filename = format!("promptcraft-{}.log", timestamp);
    let log_path = logs_dir.join(&log_filename);

    let file_appender = tracing_appender::rolling::never(logs_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    // Default to INFO, overridable with RUST_LOG
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    Ok((log_path, guard))
}
