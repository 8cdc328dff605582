//! # Backend API Binding Layer
//!
//! Declarative REST endpoints grouped by resource, a query cache with request
//! coalescing and tag invalidation, and the reqwest client that carries
//! requests to the backend.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs        - Module exports and documentation
//! ├── client.rs     - ApiClient, the reqwest Transport
//! ├── endpoint.rs   - Endpoint descriptors, tags, parameters
//! ├── args.rs       - Call arguments, defaults, cache keys
//! ├── request.rs    - Request bodies (JSON, multipart) and ApiRequest
//! ├── envelope.rs   - Response envelope normalization
//! ├── cache.rs      - QueryCache: coalescing, state, invalidation
//! ├── query.rs      - QueryHandle: live view of one cache entry
//! ├── mutation.rs   - Mutation triggers
//! ├── registry.rs   - Resource registration
//! └── resources/    - One module per backend resource
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! QueryHandle ──subscribe──> QueryCache ──coalesced fetch──> Transport ──> backend
//!      ▲                         │
//!      └──── watch::Receiver ◄───┘
//!
//! Mutation ──send──> Transport ──ok──> QueryCache::invalidate(tags)
//! ```

pub mod args;
pub mod cache;
pub mod client;
pub mod endpoint;
pub mod envelope;
pub mod mutation;
pub mod query;
pub mod registry;
pub mod request;
pub mod resources;

#[cfg(test)]
pub(crate) mod testing;

pub use args::{Args, CacheKey};
pub use cache::{QueryCache, QueryState, QueryStatus, DEFAULT_KEEP_UNUSED};
pub use client::ApiClient;
pub use endpoint::{BodyEncoding, Endpoint, EndpointKind, Param, Tag};
pub use mutation::Mutation;
pub use query::QueryHandle;
pub use registry::{Registry, Resource};
pub use request::{ApiRequest, FilePart, HttpMethod, MultipartBody, RequestBody};
pub use resources::Api;
