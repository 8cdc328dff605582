//! # Common Error Types
//!
//! Error handling for the API binding layer and the driver binary.
//!
//! ## Error Categories
//!
//! Every failure that happens while talking to the backend is normalized into
//! one structured [`ApiError`] `{ kind, status, message, raw }`:
//!
//! - **Network**: the request never produced a response (connection refused, timeout, DNS)
//! - **Http**: the backend answered with a non-2xx status
//! - **Decode**: the body was not JSON, or not the shape the caller asked for
//! - **Rejected**: a 2xx envelope carrying `success: false`
//! - **InvalidArgument**: the call was refused before any request was built
//!   (missing id, zero page size, body encoding mismatch)
//!
//! `ApiError` is `Clone` because one coalesced request fans its result out to
//! every waiting caller.
//!
//! [`AppError`] wraps `ApiError` together with configuration and storage
//! failures for the binary.
//!
//! ```rust
//! use dashboard::core::error::{ApiError, ApiErrorKind};
//!
//! let err = ApiError::http(404, "Blog not found", Some(r#"{"success":false}"#.to_string()));
//! assert_eq!(err.kind, ApiErrorKind::Http);
//! assert_eq!(err.status, Some(404));
//! assert_eq!(err.to_string(), "HTTP error: Blog not found");
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Category of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    Network,
    Http,
    Decode,
    Rejected,
    InvalidArgument,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApiErrorKind::Network => "Network",
            ApiErrorKind::Http => "HTTP",
            ApiErrorKind::Decode => "Decode",
            ApiErrorKind::Rejected => "Rejected",
            ApiErrorKind::InvalidArgument => "Invalid argument",
        };
        f.write_str(label)
    }
}

/// Normalized failure of a query or mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind} error: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Human-readable message, taken from the backend envelope when present.
    pub message: String,
    /// Raw response body, kept for diagnostics.
    pub raw: Option<String>,
}

impl ApiError {
    pub fn network(message: impl fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: message.to_string(),
            raw: None,
        }
    }

    pub fn http(status: u16, message: impl Into<String>, raw: Option<String>) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            status: Some(status),
            message: message.into(),
            raw,
        }
    }

    pub fn decode(message: impl Into<String>, raw: Option<String>) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            status: None,
            message: message.into(),
            raw,
        }
    }

    pub fn rejected(status: u16, message: impl Into<String>, raw: Option<String>) -> Self {
        Self {
            kind: ApiErrorKind::Rejected,
            status: Some(status),
            message: message.into(),
            raw,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::InvalidArgument,
            status: None,
            message: message.into(),
            raw: None,
        }
    }

    /// Attach the status code of the response that failed to decode.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// True for 401/403, i.e. the stored token is missing, expired or revoked.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403)) && self.kind != ApiErrorKind::Decode
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::decode(format!("Failed to parse response: {}", err), None)
        } else if err.is_builder() {
            ApiError::invalid_argument(format!("Failed to build request: {}", err))
        } else {
            ApiError::network(format!("Network error: {}", err))
        }
    }
}

/// Application-wide error type for the driver binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed backend call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Persisted session storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Input rejected before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(format!("JSON error: {}", err))
    }
}
