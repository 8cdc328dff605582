//! In-process [`Transport`] for cache and resource tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::core::error::ApiError;
use crate::core::service::Transport;
use super::request::ApiRequest;

type Handler = Box<dyn Fn(&ApiRequest) -> Result<Value, ApiError> + Send + Sync>;

pub(crate) struct MockTransport {
    handler: Mutex<Handler>,
    calls: Mutex<Vec<ApiRequest>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockTransport {
    pub(crate) fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&ApiRequest) -> Result<Value, ApiError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Mutex::new(Box::new(handler)),
            calls: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    /// Every request is recorded, then held until the test adds a permit.
    pub(crate) fn gated<F>(handler: F) -> (Arc<Self>, Arc<Semaphore>)
    where
        F: Fn(&ApiRequest) -> Result<Value, ApiError> + Send + Sync + 'static,
    {
        let gate = Arc::new(Semaphore::new(0));
        let transport = Arc::new(Self {
            handler: Mutex::new(Box::new(handler)),
            calls: Mutex::new(Vec::new()),
            gate: Some(gate.clone()),
        });
        (transport, gate)
    }

    pub(crate) fn set_handler<F>(&self, handler: F)
    where
        F: Fn(&ApiRequest) -> Result<Value, ApiError> + Send + Sync + 'static,
    {
        *self.handler.lock() = Box::new(handler);
    }

    pub(crate) fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().clone()
    }

    pub(crate) fn call_count(&self, endpoint: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.endpoint == endpoint).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.calls.lock().push(request.clone());
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        let handler = self.handler.lock();
        (*handler)(&request)
    }
}
