//! # Core Abstractions
//!
//! Error types and the traits the rest of the crate is written against.
//!
//! ## Modules
//!
//! - **[`error`]**: [`ApiError`] for everything the binding layer returns,
//!   [`AppError`] for the binary
//! - **[`service`]**: [`Transport`] (how requests reach the backend) and
//!   [`TokenSource`] (where the bearer token comes from)
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dashboard::core::service::Transport;
//! use dashboard::services::api::ApiClient;
//! use dashboard::services::session::AuthContext;
//!
//! // In production: the reqwest-backed client
//! let transport: Arc<dyn Transport> =
//!     Arc::new(ApiClient::new("https://api.example.com", AuthContext::anonymous()));
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, ApiErrorKind, AppError, Result};
pub use service::{TokenSource, Transport};
