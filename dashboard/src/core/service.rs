//! # Service Traits
//!
//! Seams for dependency injection, so the query cache can be exercised without
//! a network and the HTTP client without real client storage.

use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::ApiError;
use crate::services::api::request::ApiRequest;

/// Sends one fully built request and returns the parsed JSON body.
///
/// Implementations normalize every failure into [`ApiError`]. The production
/// implementation is [`crate::services::api::ApiClient`]; tests substitute an
/// in-process transport.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// Supplies the current bearer token.
///
/// Called on every request, so a token refreshed mid-session is picked up by
/// the very next call.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Option<String>;
}
