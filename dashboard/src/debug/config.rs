//! Logging configuration from environment variables

use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "dashboard=info,warn";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level filter (e.g., "dashboard=debug,info")
    pub log_level: String,
    /// Directory for daily-rotated log files. No file output when unset.
    pub log_dir: Option<PathBuf>,
    /// Log file name prefix inside `log_dir`
    pub file_prefix: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
            file_prefix: "dashboard.log".to_string(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            log_level: lib_utils::get_env_or("RUST_LOG", DEFAULT_LOG_LEVEL),
            log_dir: lib_utils::get_env_opt("DASHBOARD_LOG_DIR").map(PathBuf::from),
            json: lib_utils::get_env_opt("DASHBOARD_LOG_JSON")
                .map(|v| v == "1")
                .unwrap_or(false),
            ..Self::default()
        }
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }

    /// Full path of today's file is `log_dir/file_prefix.YYYY-MM-DD`.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| dir.join(&self.file_prefix))
    }
}
