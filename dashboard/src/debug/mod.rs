//! # Logging
//!
//! Structured logging for the binding layer and the driver binary, built on
//! `tracing`. Every network call runs in a span carrying the endpoint name,
//! method, path and a request id; cache hits and coalescing are logged at
//! `debug`, successful mutations at `info`, failures at `warn`/`error`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! // Initialize at startup and keep the guard alive
//! let _guard = dashboard::debug::init_logger();
//!
//! tracing::info!(endpoint = "getStatics", duration_ms = 42, "API call completed");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default `dashboard=info,warn`)
//! - `DASHBOARD_LOG_DIR`: Also write daily-rotated files to this directory
//! - `DASHBOARD_LOG_JSON`: Emit JSON lines on stderr (1=on)

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::{init as init_logger, init_with as init_logger_with, LogGuard};
