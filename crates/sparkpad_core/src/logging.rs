//! Logging bootstrap and safety policy.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//!
//! # Invariants
//! - Initialization is idempotent for the same level and directory.
//! - Re-initialization with a different level or directory is rejected.
//! - Initialization never panics.
//! - Log lines carry metadata only, never note content.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "sparkpad";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const SUPPORTED_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Default level used when the embedder has no preference.
pub fn default_log_level() -> &'static str {
    "info"
}

/// Initializes rolling-file logging with the given level and directory.
///
/// Repeated calls with the same arguments are no-ops; attempts to
/// reconfigure return a human-readable error string instead of
/// switching state mid-process.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = normalize_level(level)?;
    let log_dir = normalize_log_dir(log_dir)?;

    if let Some(state) = LOGGING_STATE.get() {
        if state.log_dir != log_dir {
            return Err(format!(
                "logging already initialized at `{}`; refusing to switch to `{}`",
                state.log_dir.display(),
                log_dir.display()
            ));
        }
        if state.level != level {
            return Err(format!(
                "logging already initialized with level `{}`; refusing to switch to `{level}`",
                state.level
            ));
        }
        return Ok(());
    }

    LOGGING_STATE
        .get_or_try_init(|| -> Result<LoggingState, String> {
            std::fs::create_dir_all(&log_dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", log_dir.display())
            })?;

            let logger = Logger::try_with_str(level)
                .map_err(|err| format!("invalid log level `{level}`: {err}"))?
                .log_to_file(
                    FileSpec::default()
                        .directory(log_dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
                .map_err(|err| format!("failed to start logger: {err}"))?;

            info!(
                "event=core_init module=logging status=ok level={level} version={}",
                env!("CARGO_PKG_VERSION")
            );

            Ok(LoggingState {
                level,
                log_dir,
                _logger: logger,
            })
        })
        .map(|_| ())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    let wanted = level.trim().to_lowercase();
    SUPPORTED_LEVELS
        .iter()
        .find(|supported| **supported == wanted)
        .copied()
        .ok_or_else(|| format!("unsupported log level `{level}`"))
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log directory is empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log directory `{trimmed}` is not absolute"));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{normalize_level, normalize_log_dir};

    #[test]
    fn level_normalization_accepts_case_and_whitespace() {
        assert_eq!(normalize_level("  INFO "), Ok("info"));
        assert_eq!(normalize_level("warn"), Ok("warn"));
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn log_dir_must_be_absolute_and_non_empty() {
        assert!(normalize_log_dir("").is_err());
        assert!(normalize_log_dir("relative/logs").is_err());
        assert!(normalize_log_dir("/var/log/sparkpad").is_ok());
    }
}
