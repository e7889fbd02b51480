//! In-process store. Used in development and by the API tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use super::{resolve_range, KvStore, StoreError};

#[derive(Default)]
struct Inner {
    values: HashMap<String, Value>,
    lists: HashMap<String, Vec<String>>,
    hashes: HashMap<String, HashMap<String, String>>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read back a hash field written through [`KvStore::hash_set`].
    pub fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .lock()?
            .hashes
            .get(key)
            .and_then(|h| h.get(field))
            .cloned())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl KvStore for MemoryStore {
    fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.lock()?.values.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.lock()?.values.get(key).cloned())
    }

    fn list_push(&self, list: &str, member: &str) -> Result<(), StoreError> {
        self.lock()?
            .lists
            .entry(list.to_string())
            .or_default()
            .insert(0, member.to_string());
        Ok(())
    }

    fn list_range(&self, list: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let inner = self.lock()?;
        let Some(items) = inner.lists.get(list) else {
            return Ok(Vec::new());
        };
        Ok(match resolve_range(items.len(), start, stop) {
            Some((from, to)) => items[from..=to].to_vec(),
            None => Vec::new(),
        })
    }

    fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?
            .hashes
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_then_get() {
        let store = MemoryStore::new();
        store.set("a", &json!({ "x": 1 })).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(json!({ "x": 1 })));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn list_push_prepends() {
        let store = MemoryStore::new();
        store.list_push("ids", "first").unwrap();
        store.list_push("ids", "second").unwrap();
        assert_eq!(store.list_range("ids", 0, -1).unwrap(), vec!["second", "first"]);
        assert_eq!(store.list_range("ids", 0, 0).unwrap(), vec!["second"]);
        assert!(store.list_range("other", 0, -1).unwrap().is_empty());
    }

    #[test]
    fn hash_fields() {
        let store = MemoryStore::new();
        store.hash_set("h", "email", "a@b.co").unwrap();
        assert_eq!(store.hash_get("h", "email").unwrap().as_deref(), Some("a@b.co"));
        assert_eq!(store.hash_get("h", "other").unwrap(), None);
    }
}
