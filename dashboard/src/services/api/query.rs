//! # Live Query Handles
//!
//! A [`QueryHandle`] is one subscription to a cache entry. It exposes the
//! entry's current `{ data, error, is_loading }` and updates in place as the
//! entry changes. Dropping the last handle for a key lets the cache evict it.
//!
//! ```rust,no_run
//! # async fn example(contacts: dashboard::services::api::resources::contact::ContactApi) -> Result<(), dashboard::core::ApiError> {
//! use dashboard::services::api::resources::contact::ContactFilter;
//!
//! let mut handle = contacts.contacts(&ContactFilter::default())?;
//! let state = handle.settled().await;
//! if let Some(page) = handle.decode_list::<shared::dto::contact::Contact>()? {
//!     println!("{} of {} contacts", page.len(), page.meta.total);
//! }
//! # let _ = state;
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::dto::envelope::ListPage;
use std::fmt;
use tokio::sync::watch;

use crate::core::error::ApiError;
use super::args::CacheKey;
use super::cache::{FetchResult, QueryCache, QueryState};
use super::envelope::{decode_data, decode_list};

pub struct QueryHandle {
    cache: QueryCache,
    key: CacheKey,
    receiver: watch::Receiver<QueryState>,
}

impl QueryHandle {
    pub(crate) fn new(cache: QueryCache, key: CacheKey, receiver: watch::Receiver<QueryState>) -> Self {
        Self { cache, key, receiver }
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    pub fn state(&self) -> QueryState {
        self.receiver.borrow().clone()
    }

    pub fn data(&self) -> Option<Value> {
        self.receiver.borrow().data.clone()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.receiver.borrow().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.receiver.borrow().is_loading()
    }

    pub fn is_fetching(&self) -> bool {
        self.receiver.borrow().is_fetching()
    }

    /// Typed `data` of the cached envelope, `None` before the first success.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>, ApiError> {
        let state = self.receiver.borrow();
        state.data.as_ref().map(decode_data::<T>).transpose()
    }

    /// Cached list response as a normalized page.
    pub fn decode_list<T: DeserializeOwned>(&self) -> Result<Option<ListPage<T>>, ApiError> {
        let state = self.receiver.borrow();
        state.data.as_ref().map(decode_list::<T>).transpose()
    }

    /// Fetch again, or join the request already in flight.
    pub async fn refetch(&self) -> FetchResult {
        self.cache.refetch(&self.key).await
    }

    /// Wait for the next state change. `None` once the entry is gone.
    pub async fn changed(&mut self) -> Option<QueryState> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Wait until no fetch is running and return the settled state.
    pub async fn settled(&mut self) -> QueryState {
        if let Ok(state) = self.receiver.wait_for(QueryState::is_settled).await {
            return state.clone();
        }
        self.receiver.borrow().clone()
    }
}

impl Clone for QueryHandle {
    fn clone(&self) -> Self {
        self.cache.retain(&self.key);
        Self {
            cache: self.cache.clone(),
            key: self.key.clone(),
            receiver: self.receiver.clone(),
        }
    }
}

impl Drop for QueryHandle {
    fn drop(&mut self) {
        self.cache.release(&self.key);
    }
}

impl fmt::Debug for QueryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.receiver.borrow();
        f.debug_struct("QueryHandle")
            .field("key", &self.key)
            .field("status", &state.status)
            .field("is_stale", &state.is_stale)
            .finish()
    }
}
