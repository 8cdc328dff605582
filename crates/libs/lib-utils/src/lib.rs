//! # Utilities Library
//!
//! Shared helpers for environment variables, time formatting, and form input validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_opt, get_env_or, get_env_parse};
pub use time::{format_display_date, now_utc, parse_utc};
pub use validation::{validate_email, validate_not_empty, validate_one_time_code, validate_positive};
