//! # Services Module
//!
//! Everything that talks to the outside world.
//!
//! ```text
//! services/
//! ├── api/        - Endpoint registry, query cache, HTTP client
//! └── session.rs  - AuthContext and token storage
//! ```
//!
//! The bearer token is never global: an [`session::AuthContext`] is handed to
//! [`api::ApiClient`] at construction and read on every request.

pub mod api;
pub mod session;
