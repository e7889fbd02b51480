//! Key-value storage adapter for submitted responses and emails.
//!
//! The HTTP layer only ever talks to [`KvStore`]; which backend sits
//! behind it is decided once at startup from [`ServerConfig`].

pub mod memory;
pub mod records;
pub mod upstash;

use std::sync::Arc;

use thiserror::Error;

use crate::config::{ServerConfig, StoreBackend};

pub use memory::MemoryStore;
pub use upstash::UpstashStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store not configured: {0}")]
    NotConfigured(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Upstash returned {status}: {body}")]
    Upstash { status: u16, body: String },

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Minimal Redis-like command set used by the record repository.
///
/// Calls block; async callers go through `spawn_blocking`.
pub trait KvStore: Send + Sync {
    fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError>;

    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Prepend `member` to `list` (LPUSH).
    fn list_push(&self, list: &str, member: &str) -> Result<(), StoreError>;

    /// Inclusive range with LRANGE index rules; negative indices count
    /// from the end.
    fn list_range(&self, list: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError>;

    fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError>;
}

/// Resolve LRANGE `start`/`stop` against a list of `len` items.
/// Returns `None` when the range selects nothing.
pub(crate) fn resolve_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if len == 0 || start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

/// Build the configured backend, or `None` when storage is disabled.
pub fn from_config(config: &ServerConfig) -> Result<Option<Arc<dyn KvStore>>, StoreError> {
    match &config.store {
        StoreBackend::None => Ok(None),
        StoreBackend::Memory => Ok(Some(Arc::new(MemoryStore::new()))),
        StoreBackend::Upstash { url, token } => {
            let store = UpstashStore::new(url, token, config.store_timeout_secs)?;
            Ok(Some(Arc::new(store)))
        }
    }
}
