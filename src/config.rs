//! Configuration loading from environment variables.
//!
//! All configuration values are loaded from `RESOURCEFUL_*` environment
//! variables with sensible defaults. Invalid values fall back to defaults
//! without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `RESOURCEFUL_LOAD_POLICY` | racy | `racy` or `exclusive` first-load handling |
//! | `RESOURCEFUL_SUGGESTION_CUTOFF` | 0.6 | Minimum similarity for "did you mean" hints, clamped to `[0, 1]` |
//! | `RESOURCEFUL_LOG_LEVEL` | info | `tracing` env-filter directive |
//! | `RESOURCEFUL_LOG_FORMAT` | json | `json` or `pretty` |
//! | `RESOURCEFUL_LOG_FILE` | (unset) | Write JSON logs to this file instead of stderr |

use std::path::PathBuf;

use serde::Serialize;

use crate::manager::{LoadPolicy, ManagerConfig};
use crate::suggest::DEFAULT_CUTOFF;
use crate::telemetry::{LogConfig, LogFormat};

pub const LOAD_POLICY_VAR: &str = "RESOURCEFUL_LOAD_POLICY";
pub const SUGGESTION_CUTOFF_VAR: &str = "RESOURCEFUL_SUGGESTION_CUTOFF";
pub const LOG_LEVEL_VAR: &str = "RESOURCEFUL_LOG_LEVEL";
pub const LOG_FORMAT_VAR: &str = "RESOURCEFUL_LOG_FORMAT";
pub const LOG_FILE_VAR: &str = "RESOURCEFUL_LOG_FILE";

/// Effective configuration summary (serializable).
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub load_policy: &'static str,
    pub suggestion_cutoff: f64,
    pub log_level: String,
    pub log_format: &'static str,
    pub log_file: Option<PathBuf>,
}

/// All configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub manager: ManagerConfig,
    pub log: LogConfig,
}

fn parse_f64(key: &str, default: f64) -> f64 {
    match std::env::var(key) {
        Ok(val) => val.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(default),
        Err(_) => default,
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Load manager configuration from environment.
fn load_manager_config() -> ManagerConfig {
    let load_policy = non_empty_var(LOAD_POLICY_VAR)
        .and_then(|v| LoadPolicy::parse(&v))
        .unwrap_or_default();
    let suggestion_cutoff = parse_f64(SUGGESTION_CUTOFF_VAR, DEFAULT_CUTOFF).clamp(0.0, 1.0);
    ManagerConfig { load_policy, suggestion_cutoff }
}

/// Load logging configuration from environment.
fn load_log_config() -> LogConfig {
    let defaults = LogConfig::default();
    let level = non_empty_var(LOG_LEVEL_VAR).unwrap_or(defaults.level);
    let format = non_empty_var(LOG_FORMAT_VAR)
        .and_then(|v| LogFormat::parse(&v))
        .unwrap_or(defaults.format);
    let output_path = non_empty_var(LOG_FILE_VAR).map(PathBuf::from);
    LogConfig { format, level, output_path }
}

/// Load all configuration from environment variables.
///
/// Missing or invalid values fall back to safe defaults without panicking.
pub fn load() -> EnvConfig {
    EnvConfig {
        manager: load_manager_config(),
        log: load_log_config(),
    }
}

impl EnvConfig {
    /// Return a serializable summary of all effective values.
    pub fn effective_config(&self) -> EffectiveConfig {
        EffectiveConfig {
            load_policy: self.manager.load_policy.as_str(),
            suggestion_cutoff: self.manager.suggestion_cutoff,
            log_level: self.log.level.clone(),
            log_format: self.log.format.as_str(),
            log_file: self.log.output_path.clone(),
        }
    }
}
