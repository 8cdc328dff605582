//! # Mutations
//!
//! A [`Mutation`] triggers one write. It never reads from or coalesces
//! through the cache; on success it invalidates the endpoint's tags before
//! returning, so observed queries are already refetching when the caller
//! resumes. A failed mutation leaves the cache untouched.

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::dto::envelope::MutationResponse;
use tracing::{info, warn};

use crate::core::error::ApiError;
use super::args::Args;
use super::cache::QueryCache;
use super::endpoint::Endpoint;
use super::envelope::{decode_data, decode_envelope};
use super::request::RequestBody;

#[derive(Clone)]
pub struct Mutation {
    endpoint: &'static Endpoint,
    cache: QueryCache,
}

impl Mutation {
    pub(crate) fn new(endpoint: &'static Endpoint, cache: QueryCache) -> Self {
        Self { endpoint, cache }
    }

    pub fn endpoint(&self) -> &'static Endpoint {
        self.endpoint
    }

    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint.name))]
    pub async fn trigger(&self, args: &Args, body: RequestBody) -> Result<MutationResponse, ApiError> {
        let value = self.send(args, body).await?;
        let response = decode_envelope::<Value>(&value)?;
        self.invalidate();
        Ok(response)
    }

    /// Like [`Mutation::trigger`], returning the envelope's typed `data`.
    pub async fn trigger_typed<T: DeserializeOwned>(&self, args: &Args, body: RequestBody) -> Result<T, ApiError> {
        let value = self.send(args, body).await?;
        let data = decode_data::<T>(&value)?;
        self.invalidate();
        Ok(data)
    }

    async fn send(&self, args: &Args, body: RequestBody) -> Result<Value, ApiError> {
        let request = self.endpoint.build(args, body)?;
        self.cache.transport().send(request).await.map_err(|e| {
            warn!(endpoint = self.endpoint.name, error = %e, "Mutation failed");
            e
        })
    }

    fn invalidate(&self) {
        if self.endpoint.invalidates.is_empty() {
            info!(endpoint = self.endpoint.name, "Mutation succeeded");
            return;
        }
        let refreshed = self.cache.invalidate(self.endpoint.invalidates);
        info!(
            endpoint = self.endpoint.name,
            tags = ?self.endpoint.invalidates,
            refreshed,
            "Mutation succeeded, invalidated cached queries"
        );
    }
}

impl std::fmt::Debug for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mutation")
            .field("endpoint", &self.endpoint.name)
            .finish()
    }
}
