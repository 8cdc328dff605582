//! Logging initialization

use super::config::{LogConfig, DEFAULT_LOG_LEVEL};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the non-blocking file writer alive. Hold it until the program exits;
/// buffered log lines are flushed when it drops.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize logging from the environment.
///
/// Sets up:
/// - an `EnvFilter` from `RUST_LOG`, defaulting to `dashboard=info,warn`
/// - human-readable (or JSON, with `DASHBOARD_LOG_JSON=1`) output on stderr
/// - a daily-rotated file in `DASHBOARD_LOG_DIR` when that is set, written
///   through a non-blocking appender
/// - a panic hook that records panics as error events
pub fn init() -> LogGuard {
    init_with(&LogConfig::from_env())
}

pub fn init_with(config: &LogConfig) -> LogGuard {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let plain_layer = (!config.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
    });
    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
    });

    let mut guard = None;
    let file_layer = match &config.log_dir {
        Some(dir) => match fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
                let (non_blocking, worker) = tracing_appender::non_blocking(appender);
                guard = Some(worker);
                Some(
                    fmt::layer()
                        .with_writer(non_blocking)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_ansi(false), // No ANSI codes in log files
                )
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log directory: {}", e);
                None
            }
        },
        None => None,
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(plain_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init();

    if let Err(e) = installed {
        eprintln!("Warning: Logging already initialized: {}", e);
        return LogGuard { _file: guard };
    }

    tracing::debug!(
        log_level = %config.log_level,
        log_file = ?config.log_file(),
        json = config.json,
        "Logging initialized"
    );

    setup_panic_hook();

    LogGuard { _file: guard }
}

/// Log panics with their location before the default hook runs.
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        tracing::error!(location = %location, message = %message, "Application panic");

        default_panic(panic_info);
    }));
}
