//! Subscriber setup for `resourceful` events.
//!
//! The library only emits events; `resourceful-cli` (or any embedding binary)
//! installs a subscriber once through [`init_logging`]. What gets emitted:
//!
//! | Level | Target | Event |
//! |---|---|---|
//! | `trace` | `resourceful::manager` | cache hit |
//! | `debug` | `resourceful::manager` | resource loaded, in-place update unsupported, evicted during load |
//! | `debug` | `resourceful::registry` | manager created |
//! | `info` | `resourceful::import`, `resourceful::manifest` | handles registered in bulk |
//! | `warn` | `resourceful::manager`, `resourceful::prebuilt` | loader returned nothing, file unreadable |
//!
//! Loader calls also run inside a `resource_load` span (see [`LoadSpan`](super::LoadSpan)).

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

impl LogFormat {
    /// Parse `"json"` or `"pretty"` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}

/// Subscriber settings, usually read by [`config::load`](crate::config::load).
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive, e.g. `"info"` or `"resourceful::manager=trace"`.
    pub level: String,
    /// Append JSON logs to this file. Pretty output always goes to stderr.
    pub output_path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
            output_path: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Failed to open log file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Subscriber already initialized")]
    AlreadyInitialized,
}

/// Install the global subscriber described by `config`.
///
/// Fails with [`LogError::AlreadyInitialized`] on a second call.
pub fn init_logging(config: &LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LogError::InvalidFilter(e.to_string()))?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match (config.format, &config.output_path) {
        (LogFormat::Pretty, _) => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        (LogFormat::Json, Some(path)) => {
            let file = open_log_file(path)?;
            registry
                .with(fmt::layer().json().with_writer(Mutex::new(file)))
                .try_init()
        }
        (LogFormat::Json, None) => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    installed.map_err(|_| LogError::AlreadyInitialized)
}

fn open_log_file(path: &Path) -> Result<std::fs::File, LogError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogError::FileOpen {
            path: path.to_path_buf(),
            source,
        })
}
