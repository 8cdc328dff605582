//! # Resource Registry
//!
//! Endpoint tables are registered once per resource group. Registration
//! checks the table and returns a [`Resource`] that hands out a
//! [`QueryHandle`] or [`Mutation`] per endpoint name. Typed wrappers in
//! [`super::resources`] sit on top of it.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dashboard::services::api::{ApiClient, Args, QueryCache, Registry};
//! use dashboard::services::api::resources::faq;
//! use dashboard::services::session::AuthContext;
//!
//! # async fn run() -> Result<(), dashboard::core::ApiError> {
//! let client = ApiClient::new("http://localhost:5000", AuthContext::anonymous());
//! let registry = Registry::new(QueryCache::new(Arc::new(client)));
//! let faqs = registry.register_resource("faq", faq::ENDPOINTS)?;
//!
//! let mut handle = faqs.query("getFaq", &Args::new())?;
//! handle.settled().await;
//! # Ok(())
//! # }
//! ```

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::dto::envelope::ListPage;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::ApiError;
use super::args::Args;
use super::cache::QueryCache;
use super::endpoint::{BodyEncoding, Endpoint, EndpointKind};
use super::envelope::{decode_data, decode_list};
use super::mutation::Mutation;
use super::query::QueryHandle;

/// Registers resource groups against one cache.
///
/// Endpoint names are cache-key prefixes, so they must be unique across every
/// group registered here.
#[derive(Debug)]
pub struct Registry {
    cache: QueryCache,
    names: Mutex<HashSet<&'static str>>,
}

impl Registry {
    pub fn new(cache: QueryCache) -> Self {
        Self {
            cache,
            names: Mutex::new(HashSet::new()),
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn register_resource(
        &self,
        group: &'static str,
        endpoints: &'static [Endpoint],
    ) -> Result<Resource, ApiError> {
        let mut by_name = HashMap::with_capacity(endpoints.len());
        for endpoint in endpoints {
            check(group, endpoint)?;
            if by_name.insert(endpoint.name, endpoint).is_some() {
                return Err(ApiError::invalid_argument(format!(
                    "{group}: endpoint {} is declared twice",
                    endpoint.name
                )));
            }
        }

        let mut names = self.names.lock();
        if let Some(taken) = by_name.keys().find(|name| names.contains(*name)) {
            return Err(ApiError::invalid_argument(format!(
                "{group}: endpoint {taken} is already registered"
            )));
        }
        names.extend(by_name.keys().copied());
        drop(names);

        debug!(group, endpoints = endpoints.len(), "Registered resource");
        Ok(Resource {
            group,
            cache: self.cache.clone(),
            endpoints: Arc::new(by_name),
        })
    }
}

fn check(group: &str, endpoint: &Endpoint) -> Result<(), ApiError> {
    let problem = match endpoint.kind {
        EndpointKind::Query if endpoint.body != BodyEncoding::None => Some("a query cannot take a body"),
        EndpointKind::Query if !endpoint.invalidates.is_empty() => Some("a query cannot invalidate tags"),
        EndpointKind::Mutation if !endpoint.provides.is_empty() => Some("a mutation cannot provide tags"),
        _ if endpoint.name.is_empty() => Some("endpoint name is empty"),
        _ if !endpoint.path.starts_with('/') => Some("path must start with '/'"),
        _ => None,
    };
    match problem {
        Some(problem) => Err(ApiError::invalid_argument(format!(
            "{group}: {}: {problem}",
            endpoint.name
        ))),
        None => Ok(()),
    }
}

/// Accessors for one registered group.
#[derive(Debug, Clone)]
pub struct Resource {
    group: &'static str,
    cache: QueryCache,
    endpoints: Arc<HashMap<&'static str, &'static Endpoint>>,
}

impl Resource {
    pub fn group(&self) -> &'static str {
        self.group
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn endpoint(&self, name: &str) -> Result<&'static Endpoint, ApiError> {
        self.endpoints.get(name).copied().ok_or_else(|| {
            ApiError::invalid_argument(format!("{}: unknown endpoint {name}", self.group))
        })
    }

    /// Sorted endpoint names.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.endpoints.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Subscribe to a query endpoint.
    pub fn query(&self, name: &str, args: &Args) -> Result<QueryHandle, ApiError> {
        self.cache.subscribe(self.query_endpoint(name)?, args)
    }

    /// One-shot query through the cache.
    pub async fn fetch(&self, name: &str, args: &Args) -> Result<Value, ApiError> {
        let endpoint = self.query_endpoint(name)?;
        self.cache.fetch(endpoint, args).await
    }

    /// One-shot list query, normalized.
    pub async fn fetch_list<T: DeserializeOwned>(&self, name: &str, args: &Args) -> Result<ListPage<T>, ApiError> {
        decode_list(&self.fetch(name, args).await?)
    }

    /// One-shot query decoding the envelope's `data`.
    pub async fn fetch_data<T: DeserializeOwned>(&self, name: &str, args: &Args) -> Result<T, ApiError> {
        decode_data(&self.fetch(name, args).await?)
    }

    pub fn mutation(&self, name: &str) -> Result<Mutation, ApiError> {
        let endpoint = self.endpoint(name)?;
        if endpoint.is_query() {
            return Err(ApiError::invalid_argument(format!(
                "{}: {name} is a query",
                self.group
            )));
        }
        Ok(Mutation::new(endpoint, self.cache.clone()))
    }

    fn query_endpoint(&self, name: &str) -> Result<&'static Endpoint, ApiError> {
        let endpoint = self.endpoint(name)?;
        if !endpoint.is_query() {
            return Err(ApiError::invalid_argument(format!(
                "{}: {name} is a mutation",
                self.group
            )));
        }
        Ok(endpoint)
    }
}
