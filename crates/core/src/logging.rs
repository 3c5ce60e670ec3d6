use crate::error::{Result, XrefError};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const ENV_LOG_DIR: &str = "XREFSCOPE_LOG_DIR";
const DEFAULT_LOG_DIR: &str = ".xrefscope/logs";

/// `$XREFSCOPE_LOG_DIR`, else `~/.xrefscope/logs`.
pub fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_LOG_DIR) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_LOG_DIR)
}

/// Install the global subscriber. Keep the returned guard alive for as long
/// as file logging is wanted; dropping it flushes the appender.
pub fn init_logging(component: &str, to_stderr: bool) -> Result<WorkerGuard> {
    init_logging_in(log_dir(), component, to_stderr)
}

pub fn init_logging_in(
    log_dir: PathBuf,
    component: &str,
    to_stderr: bool,
) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&log_dir)?;

    // Files are named <component>.<date>
    let file_appender = tracing_appender::rolling::daily(&log_dir, component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    let installed = if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).try_init()
    } else {
        registry.try_init()
    };
    installed.map_err(|e| XrefError::Logging(e.to_string()))?;

    Ok(guard)
}
