//! Log output for the filesystem guard.
//!
//! Library code only emits `tracing` events. [`init`] installs the one
//! global subscriber, choosing between two sinks:
//!
//! - **File**: daily-rotated `{app_name}.log` files, written off-thread,
//!   under `<data_local_dir>/{app_name}/logs` unless `log_dir` is set
//! - **Stderr**: warnings and above, overridable with `RUST_LOG`
//!
//! ```toml
//! [logging]
//! enabled = true
//! level = "debug"
//! log_dir = "/var/log/acton-fs-guard"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Level used for the stderr sink when `RUST_LOG` is unset.
const STDERR_DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

/// Keeps the file writer's background thread alive for the whole process.
static FILE_WRITER: OnceLock<WorkerGuard> = OnceLock::new();

/// The `[logging]` table of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write to rotating files instead of stderr.
    pub enabled: bool,
    /// Names both the log files and the default log directory.
    pub app_name: String,
    /// Overrides the default log directory.
    pub log_dir: Option<PathBuf>,
    /// Minimum level written to the log files.
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            app_name: env!("CARGO_PKG_NAME").to_string(),
            log_dir: None,
            level: LogLevel::default(),
        }
    }
}

impl LoggingConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches from the stderr sink to file logging.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    #[must_use]
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    #[must_use]
    pub fn with_log_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Directory the file sink writes to.
    ///
    /// # Errors
    ///
    /// Fails when no `log_dir` is set and the platform has no local data
    /// directory.
    pub fn resolved_log_dir(&self) -> Result<PathBuf, LoggingError> {
        match &self.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .map(|data| data.join(&self.app_name).join("logs"))
                .ok_or(LoggingError::NoLogDir),
        }
    }
}

/// Minimum severity written by the file sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Where [`init`] sent log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Rotating files in this directory.
    File {
        /// The log directory.
        dir: PathBuf,
    },
    /// Standard error.
    Stderr,
}

impl fmt::Display for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { dir } => write!(f, "log files in '{}'", dir.display()),
            Self::Stderr => write!(f, "stderr"),
        }
    }
}

/// Failure to set up log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    /// File logging needs a directory and none could be derived.
    NoLogDir,
    /// The log directory could not be created.
    CreateDir {
        /// The directory that was attempted.
        path: PathBuf,
        /// The OS error.
        reason: String,
    },
    /// Another global subscriber is already installed.
    Install {
        /// The reason reported by `tracing-subscriber`.
        reason: String,
    },
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLogDir => write!(
                f,
                "no local data directory for log files; set logging.log_dir"
            ),
            Self::CreateDir { path, reason } => {
                write!(f, "cannot create log directory '{}': {}", path.display(), reason)
            }
            Self::Install { reason } => write!(f, "cannot install log subscriber: {}", reason),
        }
    }
}

impl std::error::Error for LoggingError {}

/// Installs the global subscriber described by `config`.
///
/// With `enabled` set, events at `level` and above go to daily-rotated files;
/// otherwise warnings and above go to stderr, filtered by `RUST_LOG` when set.
/// Call once per process.
///
/// # Errors
///
/// Fails when the log directory cannot be resolved or created, or when a
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<LogSink, LoggingError> {
    if config.enabled {
        let dir = config.resolved_log_dir()?;
        install_file_sink(&dir, config)?;
        Ok(LogSink::File { dir })
    } else {
        install_stderr_sink()?;
        Ok(LogSink::Stderr)
    }
}

fn install_file_sink(dir: &Path, config: &LoggingConfig) -> Result<(), LoggingError> {
    std::fs::create_dir_all(dir).map_err(|e| LoggingError::CreateDir {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let appender = tracing_appender::rolling::daily(dir, format!("{}.log", config.app_name));
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .with(LevelFilter::from(config.level))
        .try_init()
        .map_err(|e| LoggingError::Install {
            reason: e.to_string(),
        })?;

    // try_init succeeds at most once per process, so the slot is empty here.
    let _ = FILE_WRITER.set(guard);
    Ok(())
}

fn install_stderr_sink() -> Result<(), LoggingError> {
    let filter = EnvFilter::builder()
        .with_default_directive(STDERR_DEFAULT_LEVEL.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init()
        .map_err(|e| LoggingError::Install {
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_uses_stderr_and_crate_name() {
        let config = LoggingConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.app_name, "acton-fs-guard");
        assert_eq!(config.level, LogLevel::Info);
    }

    #[test]
    fn default_log_dir_is_named_after_app() {
        if let Ok(dir) = LoggingConfig::default().resolved_log_dir() {
            assert!(dir.ends_with("acton-fs-guard/logs"));
        }
        if let Ok(dir) = LoggingConfig::new().with_app_name("indexer").resolved_log_dir() {
            assert!(dir.ends_with("indexer/logs"));
        }
    }

    #[test]
    fn explicit_log_dir_wins() {
        let config = LoggingConfig::new().with_log_dir("/custom/logs");
        assert_eq!(config.resolved_log_dir().unwrap(), PathBuf::from("/custom/logs"));
    }

    #[test]
    fn level_maps_to_filter() {
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
    }

    #[test]
    fn level_deserializes_lowercase() {
        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, LogLevel::Debug);
    }

    #[test]
    fn file_sink_reports_uncreatable_directory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let config = LoggingConfig::new().enabled().with_log_dir(blocker.join("logs"));
        let err = init(&config).unwrap_err();

        assert!(matches!(err, LoggingError::CreateDir { .. }));
        assert!(err.to_string().contains("not-a-dir"));
    }

    #[test]
    fn sink_display() {
        let sink = LogSink::File {
            dir: PathBuf::from("/var/log/guard"),
        };
        assert_eq!(sink.to_string(), "log files in '/var/log/guard'");
        assert_eq!(LogSink::Stderr.to_string(), "stderr");
    }
}
