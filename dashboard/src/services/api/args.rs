//! # Query Arguments
//!
//! Arguments a caller passes to an endpoint, and the cache key derived from
//! them. Defaults are applied before the key is computed, so `Args::new()` and
//! `Args::new().page(1)` address the same cache entry.

use serde_json::{Map, Value};
use std::fmt;

use crate::core::error::ApiError;
use super::endpoint::{Endpoint, Param};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Arguments for one endpoint invocation.
///
/// Only the fields the endpoint declares are used; the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pub id: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub service_id: Option<String>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments for a single-resource endpoint.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    /// Apply defaults and validate against `endpoint`.
    pub fn resolve(&self, endpoint: &Endpoint) -> Result<ResolvedArgs, ApiError> {
        let id = if endpoint.needs_id() {
            Some(valid_id(endpoint.name, self.id.as_deref())?)
        } else {
            None
        };

        let mut params = Vec::with_capacity(endpoint.params.len());
        for param in endpoint.params {
            let value = match param {
                Param::Page => positive(endpoint.name, "page", self.page.unwrap_or(DEFAULT_PAGE))?,
                Param::Limit => positive(endpoint.name, "limit", self.limit.unwrap_or(DEFAULT_LIMIT))?,
                Param::Status => self.status.clone().unwrap_or_default(),
                Param::Category => self.category.clone().unwrap_or_default(),
                Param::ServiceId => match self.service_id.as_deref().map(str::trim) {
                    Some(s) if !s.is_empty() => s.to_string(),
                    _ => {
                        return Err(ApiError::invalid_argument(format!(
                            "{} requires a non-empty service_id",
                            endpoint.name
                        )))
                    }
                },
            };
            params.push((*param, value));
        }

        Ok(ResolvedArgs { id, params })
    }
}

fn valid_id(endpoint: &str, id: Option<&str>) -> Result<String, ApiError> {
    let id = id.map(str::trim).unwrap_or_default();
    if id.is_empty() {
        return Err(ApiError::invalid_argument(format!(
            "{endpoint} requires a non-empty id"
        )));
    }
    if id.contains(['/', '?', '#']) {
        return Err(ApiError::invalid_argument(format!(
            "{endpoint} got an id with reserved characters: {id}"
        )));
    }
    Ok(id.to_string())
}

fn positive(endpoint: &str, name: &str, value: u32) -> Result<String, ApiError> {
    if value == 0 {
        return Err(ApiError::invalid_argument(format!(
            "{endpoint}: {name} must be a positive integer"
        )));
    }
    Ok(value.to_string())
}

/// Arguments after defaults, in the endpoint's declared parameter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgs {
    pub id: Option<String>,
    pub params: Vec<(Param, String)>,
}

impl ResolvedArgs {
    /// Deterministic JSON form used in cache keys.
    pub fn to_json(&self) -> String {
        let mut map = Map::new();
        if let Some(id) = &self.id {
            map.insert("id".to_string(), Value::String(id.clone()));
        }
        for (param, value) in &self.params {
            map.insert(param.key().to_string(), Value::String(value.clone()));
        }
        Value::Object(map).to_string()
    }
}

/// Address of one cached query result: endpoint name plus serialized arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    pub endpoint: &'static str,
    pub args: String,
}

impl CacheKey {
    pub fn new(endpoint: &'static str, args: &ResolvedArgs) -> Self {
        Self {
            endpoint,
            args: args.to_json(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.endpoint, self.args)
    }
}
