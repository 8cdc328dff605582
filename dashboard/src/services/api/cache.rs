//! # Query Cache
//!
//! Argument-keyed cache of query results with request coalescing, per-entry
//! state, tag invalidation and subscriber-counted eviction.
//!
//! ## Entry lifecycle
//!
//! ```text
//! Uninitialized ──fetch──▶ Loading ──▶ Success | Error
//! Success | Error ──invalidate / refetch──▶ Refetching ──▶ Success | Error
//! ```
//!
//! - An entry is created by the first [`QueryCache::subscribe`] or
//!   [`QueryCache::fetch`] for its key.
//! - At most one request per key is in flight. Later callers join it through
//!   a [`Shared`] future and receive the same result.
//! - Every fetch runs on its own tokio task, so it completes and populates the
//!   entry even when every observer has gone away.
//! - When the last [`QueryHandle`] is dropped the entry is evicted, unless a
//!   request is still in flight. Results nobody observes (one-shot fetches,
//!   requests that outlived their observers) are kept for reuse for
//!   [`DEFAULT_KEEP_UNUSED`] and swept by the next `subscribe` or `fetch`
//!   after that.
//! - [`QueryCache::invalidate`] refetches observed entries carrying a tag and
//!   evicts unobserved ones.
//!
//! The entry map sits behind a `parking_lot::Mutex` that is never held
//! across an `.await`.

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::core::error::ApiError;
use crate::core::service::Transport;
use super::args::{Args, CacheKey};
use super::endpoint::{Endpoint, Tag};
use super::query::QueryHandle;
use super::request::{ApiRequest, RequestBody};

/// How long an unobserved result stays reusable.
pub const DEFAULT_KEEP_UNUSED: Duration = Duration::from_secs(60);

pub type FetchResult = Result<Value, ApiError>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum QueryStatus {
    #[default]
    Uninitialized,
    Loading,
    Success,
    Error,
    Refetching,
}

/// Observable state of one cache entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QueryState {
    pub status: QueryStatus,
    /// Last successful response body. Kept when a later fetch fails.
    pub data: Option<Value>,
    pub error: Option<ApiError>,
    /// Invalidated since the data was fetched.
    pub is_stale: bool,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl QueryState {
    /// First fetch in progress, no data yet.
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    /// Any fetch in progress.
    pub fn is_fetching(&self) -> bool {
        matches!(self.status, QueryStatus::Loading | QueryStatus::Refetching)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.status, QueryStatus::Success | QueryStatus::Error)
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    fn fetching_status(&self) -> QueryStatus {
        if self.data.is_some() || self.error.is_some() {
            QueryStatus::Refetching
        } else {
            QueryStatus::Loading
        }
    }

    fn needs_fetch(&self) -> bool {
        matches!(self.status, QueryStatus::Uninitialized | QueryStatus::Error) || self.is_stale
    }
}

struct Entry {
    endpoint: &'static Endpoint,
    request: ApiRequest,
    state: watch::Sender<QueryState>,
    subscribers: usize,
    in_flight: Option<SharedFetch>,
    /// Id of the fetch in `in_flight`, so a completion never lands on a
    /// recreated entry.
    fetch_id: u64,
    /// Bumped by every invalidation.
    generation: u64,
    /// Set while settled with no subscribers.
    idle_since: Option<Instant>,
}

impl Entry {
    fn new(endpoint: &'static Endpoint, request: ApiRequest) -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            endpoint,
            request,
            state,
            subscribers: 0,
            in_flight: None,
            fetch_id: 0,
            generation: 0,
            idle_since: None,
        }
    }
}

struct Inner {
    transport: Arc<dyn Transport>,
    entries: Mutex<HashMap<CacheKey, Entry>>,
    next_fetch_id: AtomicU64,
    keep_unused: Duration,
}

/// Shared query cache. Cloning is cheap and every clone sees the same entries.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl QueryCache {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_keep_unused(transport, DEFAULT_KEEP_UNUSED)
    }

    /// Cache whose unobserved results expire after `keep_unused`.
    pub fn with_keep_unused(transport: Arc<dyn Transport>, keep_unused: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                entries: Mutex::new(HashMap::new()),
                next_fetch_id: AtomicU64::new(1),
                keep_unused,
            }),
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.inner.transport
    }

    /// Observe a query. Starts a fetch unless one is already running or a
    /// fresh result is cached.
    ///
    /// Must be called from within a tokio runtime.
    pub fn subscribe(&self, endpoint: &'static Endpoint, args: &Args) -> Result<QueryHandle, ApiError> {
        let (key, request) = prepare(endpoint, args)?;

        let mut entries = self.inner.entries.lock();
        sweep_idle(&mut entries, self.inner.keep_unused);
        let entry = entries
            .entry(key.clone())
            .or_insert_with(|| Entry::new(endpoint, request));
        entry.subscribers += 1;
        entry.idle_since = None;
        let receiver = entry.state.subscribe();

        if entry.in_flight.is_some() {
            debug!(key = %key, "Joining in-flight query");
        } else if entry.state.borrow().needs_fetch() {
            start_fetch(&self.inner, &key, entry);
        } else {
            debug!(key = %key, "Cache hit");
        }
        drop(entries);

        Ok(QueryHandle::new(self.clone(), key, receiver))
    }

    /// One-shot query sharing the cache and any in-flight request, without
    /// subscribing.
    pub async fn fetch(&self, endpoint: &'static Endpoint, args: &Args) -> FetchResult {
        let (key, request) = prepare(endpoint, args)?;

        let pending = {
            let mut entries = self.inner.entries.lock();
            sweep_idle(&mut entries, self.inner.keep_unused);
            let entry = entries
                .entry(key.clone())
                .or_insert_with(|| Entry::new(endpoint, request));

            if let Some(in_flight) = entry.in_flight.clone() {
                debug!(key = %key, "Joining in-flight query");
                in_flight
            } else {
                let cached = {
                    let state = entry.state.borrow();
                    if state.is_success() && !state.is_stale {
                        state.data.clone()
                    } else {
                        None
                    }
                };
                match cached {
                    Some(data) => {
                        debug!(key = %key, "Cache hit");
                        if entry.subscribers == 0 {
                            entry.idle_since = Some(Instant::now());
                        }
                        return Ok(data);
                    }
                    None => start_fetch(&self.inner, &key, entry),
                }
            }
        };

        pending.await
    }

    /// Refetch one entry, or join its in-flight request.
    pub async fn refetch(&self, key: &CacheKey) -> FetchResult {
        let pending = {
            let mut entries = self.inner.entries.lock();
            match entries.get_mut(key) {
                Some(entry) => match entry.in_flight.clone() {
                    Some(in_flight) => in_flight,
                    None => start_fetch(&self.inner, key, entry),
                },
                None => {
                    return Err(ApiError::invalid_argument(format!(
                        "{key} is not cached"
                    )))
                }
            }
        };

        pending.await
    }

    /// Mark every entry providing any of `tags` stale.
    ///
    /// Observed entries are refetched (an entry already in flight is fetched
    /// again once that request lands). Unobserved entries are evicted.
    /// Returns the number of entries affected.
    pub fn invalidate(&self, tags: &[Tag]) -> usize {
        let mut entries = self.inner.entries.lock();
        let mut evicted = Vec::new();
        let mut affected = 0;

        for (key, entry) in entries.iter_mut() {
            if !entry.endpoint.provides_any(tags) {
                continue;
            }
            affected += 1;
            entry.generation += 1;

            if entry.subscribers == 0 && entry.in_flight.is_none() {
                evicted.push(key.clone());
            } else if entry.subscribers == 0 || entry.in_flight.is_some() {
                // Resolved when the in-flight request completes.
                entry.state.send_modify(|state| state.is_stale = true);
            } else {
                debug!(key = %key, "Refetching invalidated query");
                entry.state.send_modify(|state| state.is_stale = true);
                start_fetch(&self.inner, key, entry);
            }
        }

        for key in &evicted {
            debug!(key = %key, "Evicting invalidated query");
            entries.remove(key);
        }

        affected
    }

    /// Current state of an entry, without subscribing.
    pub fn snapshot(&self, key: &CacheKey) -> Option<QueryState> {
        self.inner
            .entries
            .lock()
            .get(key)
            .map(|entry| entry.state.borrow().clone())
    }

    pub fn subscribers(&self, key: &CacheKey) -> usize {
        self.inner
            .entries
            .lock()
            .get(key)
            .map_or(0, |entry| entry.subscribers)
    }

    /// Drop every unobserved entry with no request in flight.
    pub fn prune(&self) -> usize {
        let mut entries = self.inner.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.subscribers > 0 || entry.in_flight.is_some());
        before - entries.len()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.inner.entries.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn retain(&self, key: &CacheKey) {
        if let Some(entry) = self.inner.entries.lock().get_mut(key) {
            entry.subscribers += 1;
        }
    }

    pub(crate) fn release(&self, key: &CacheKey) {
        let mut entries = self.inner.entries.lock();
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        entry.subscribers = entry.subscribers.saturating_sub(1);
        if entry.subscribers == 0 && entry.in_flight.is_none() {
            debug!(key = %key, "Evicting unobserved query");
            entries.remove(key);
        }
    }
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.len())
            .finish()
    }
}

fn sweep_idle(entries: &mut HashMap<CacheKey, Entry>, keep_unused: Duration) {
    entries.retain(|key, entry| {
        let expired = entry.subscribers == 0
            && entry.in_flight.is_none()
            && entry.idle_since.is_some_and(|since| since.elapsed() >= keep_unused);
        if expired {
            debug!(key = %key, "Evicting expired unobserved query");
        }
        !expired
    });
}

fn prepare(endpoint: &'static Endpoint, args: &Args) -> Result<(CacheKey, ApiRequest), ApiError> {
    if !endpoint.is_query() {
        return Err(ApiError::invalid_argument(format!(
            "{} is a mutation and cannot be cached",
            endpoint.name
        )));
    }
    let key = endpoint.cache_key(args)?;
    let request = endpoint.build(args, RequestBody::Empty)?;
    Ok((key, request))
}

/// Move the entry into a fetching state and launch a request.
fn start_fetch(inner: &Arc<Inner>, key: &CacheKey, entry: &mut Entry) -> SharedFetch {
    entry.state.send_modify(|state| state.status = state.fetching_status());
    launch(inner, key, entry)
}

/// Spawn the request for `entry` and record it as in flight. The caller owns
/// the state transition.
fn launch(inner: &Arc<Inner>, key: &CacheKey, entry: &mut Entry) -> SharedFetch {
    let fetch_id = inner.next_fetch_id.fetch_add(1, Ordering::Relaxed);
    let generation = entry.generation;
    let transport = inner.transport.clone();
    let request = entry.request.clone();
    let weak: Weak<Inner> = Arc::downgrade(inner);
    let task_key = key.clone();

    let fetch = async move {
        let result = transport.send(request).await;
        if let Some(inner) = weak.upgrade() {
            complete(&inner, &task_key, fetch_id, generation, &result);
        }
        result
    }
    .boxed()
    .shared();

    entry.in_flight = Some(fetch.clone());
    entry.fetch_id = fetch_id;
    tokio::spawn(fetch.clone());
    fetch
}

fn complete(inner: &Arc<Inner>, key: &CacheKey, fetch_id: u64, generation: u64, result: &FetchResult) {
    let mut entries = inner.entries.lock();
    let Some(entry) = entries.get_mut(key) else {
        return;
    };
    if entry.fetch_id != fetch_id {
        return;
    }
    entry.in_flight = None;

    let stale = entry.generation != generation;
    let observed = entry.subscribers > 0;
    let restart = stale && observed;

    if let Err(e) = result {
        warn!(key = %key, error = %e, "Query failed");
    }

    entry.state.send_modify(|state| {
        match result {
            Ok(value) => {
                state.data = Some(value.clone());
                state.error = None;
                state.fetched_at = Some(lib_utils::now_utc());
                state.status = QueryStatus::Success;
            }
            Err(e) => {
                state.error = Some(e.clone());
                state.status = QueryStatus::Error;
            }
        }
        state.is_stale = stale;
        if restart {
            state.status = QueryStatus::Refetching;
        }
    });

    if restart {
        debug!(key = %key, "Invalidated while in flight, fetching again");
        launch(inner, key, entry);
    } else if stale {
        debug!(key = %key, "Evicting invalidated query");
        entries.remove(key);
    } else if !observed {
        entry.idle_since = Some(Instant::now());
    }
}
