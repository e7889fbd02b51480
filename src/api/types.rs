//! Shared types for the HTTP layer.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::store::KvStore;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub store: Option<Arc<dyn KvStore>>,
    pub development: bool,
}

impl ApiContext {
    pub fn new(store: Option<Arc<dyn KvStore>>, development: bool) -> Self {
        Self { store, development }
    }

    /// The configured store, or 503 when persistence is disabled.
    pub fn require_store(&self) -> Result<Arc<dyn KvStore>, ApiError> {
        self.store.clone().ok_or(ApiError::ServiceUnavailable)
    }

    /// Run blocking store work off the async executor.
    pub async fn with_store<T, F>(&self, failure: &'static str, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn KvStore) -> Result<T, ApiError> + Send + 'static,
    {
        let store = self.require_store()?;
        tokio::task::spawn_blocking(move || work(store.as_ref()))
            .await
            .map_err(|e| ApiError::internal(failure, e, self.development))?
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store_configured: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponseReply {
    pub success: bool,
    pub response_id: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEmailReply {
    pub success: bool,
    pub email_id: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsesReply {
    pub success: bool,
    pub responses: Vec<Value>,
    pub emails: Vec<Value>,
    pub total_responses: usize,
    pub total_emails: usize,
}
