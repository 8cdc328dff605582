//! # Session and Bearer Tokens
//!
//! [`AuthContext`] is handed to the HTTP client at construction time and
//! resolves the bearer token on every request through a [`TokenSource`].
//!
//! Sources provided here:
//!
//! - [`StaticToken`]: in-memory token, replaceable at runtime
//! - [`FileTokenStore`]: persisted client storage, a JSON file holding the
//!   token under [`ACCESS_TOKEN_KEY`], re-read on every call through
//!   `tokio::fs`
//! - [`AuthContext::from_fn`]: any closure

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

use crate::core::error::AppError;
use crate::core::service::TokenSource;

/// Key the access token is stored under in persisted client storage.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Bearer-token provider shared by every request of one client.
#[derive(Clone)]
pub struct AuthContext {
    source: Arc<dyn TokenSource>,
}

impl AuthContext {
    pub fn new(source: impl TokenSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Context backed by a closure, e.g. a lookup in some other session store.
    pub fn from_fn<F>(lookup: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self::new(FnTokenSource(lookup))
    }

    /// Context that never has a token.
    pub fn anonymous() -> Self {
        Self::from_fn(|| None)
    }

    /// Current token, trimmed; blank tokens count as absent.
    pub async fn token(&self) -> Option<String> {
        self.source
            .token()
            .await
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// `Authorization` header value for the current token.
    pub async fn bearer(&self) -> Option<String> {
        self.token().await.map(|t| format!("Bearer {}", t))
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext").finish_non_exhaustive()
    }
}

struct FnTokenSource<F>(F);

#[async_trait]
impl<F> TokenSource for FnTokenSource<F>
where
    F: Fn() -> Option<String> + Send + Sync,
{
    async fn token(&self) -> Option<String> {
        (self.0)()
    }
}

/// In-memory token that can be swapped while requests are being made.
#[derive(Debug, Default)]
pub struct StaticToken {
    token: RwLock<Option<String>>,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Option<String> {
        self.token.read().clone()
    }
}

#[async_trait]
impl<T: TokenSource> TokenSource for Arc<T> {
    async fn token(&self) -> Option<String> {
        (**self).token().await
    }
}

/// Persisted client storage: a small JSON object on disk.
///
/// Other keys in the file are preserved when the token is saved or cleared.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `token` under [`ACCESS_TOKEN_KEY`].
    pub async fn save(&self, token: &str) -> Result<(), AppError> {
        let mut storage = self.read_storage().await?;
        storage.insert(ACCESS_TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_storage(&storage).await
    }

    /// Remove the stored token, e.g. on logout.
    pub async fn clear(&self) -> Result<(), AppError> {
        let mut storage = self.read_storage().await?;
        if storage.remove(ACCESS_TOKEN_KEY).is_some() {
            self.write_storage(&storage).await?;
        }
        Ok(())
    }

    async fn read_storage(&self) -> Result<Map<String, Value>, AppError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Map::new()),
            Ok(contents) => match serde_json::from_str::<Value>(&contents)? {
                Value::Object(map) => Ok(map),
                _ => Err(AppError::Storage(format!(
                    "{} does not contain a JSON object",
                    self.path.display()
                ))),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_storage(&self, storage: &Map<String, Value>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(storage)?).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenSource for FileTokenStore {
    async fn token(&self) -> Option<String> {
        match self.read_storage().await {
            Ok(storage) => storage
                .get(ACCESS_TOKEN_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read token storage");
                None
            }
        }
    }
}
