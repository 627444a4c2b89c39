//! File logging for applications embedding the orchestrator.

use std::path::PathBuf;

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};

use crate::config::{ConfigPaths, LoggingConfig};

const LOG_FILE: &str = "deckwright.log";

/// Where log lines go: `config.path` if set, else `deckwright.log` in the
/// logs directory.
pub fn log_file(config: &LoggingConfig, paths: &ConfigPaths) -> PathBuf {
    config
        .path
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.logs_dir.join(LOG_FILE))
}

/// Starts a size-rotated file logger. `RUST_LOG` wins over `config.level`.
/// Logging stops when the returned handle is dropped.
pub fn init_logging(
    config: &LoggingConfig,
    paths: &ConfigPaths,
) -> Result<LoggerHandle, FlexiLoggerError> {
    let file = FileSpec::try_from(log_file(config, paths))?;
    let handle = Logger::try_with_env_or_str(&config.level)?
        .log_to_file(file)
        .rotate(
            Criterion::Size(config.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.rotate_keep),
        )
        .start()?;
    log::info!("logging at level {}", config.level);
    Ok(handle)
}
