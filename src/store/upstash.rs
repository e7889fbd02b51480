//! Upstash Redis over its REST interface.
//!
//! Each command is a JSON array POSTed to the database URL with a
//! bearer token; the reply is `{"result": ...}` or `{"error": "..."}`.
//! Values are stored as JSON text so other Upstash clients read the
//! same records.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use super::{KvStore, StoreError};

pub struct UpstashStore {
    base_url: String,
    token: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct UpstashReply {
    result: Option<Value>,
    error: Option<String>,
}

impl UpstashStore {
    pub fn new(base_url: &str, token: &str, timeout_secs: u64) -> Result<Self, StoreError> {
        if base_url.trim().is_empty() || token.trim().is_empty() {
            return Err(StoreError::NotConfigured(
                "UPSTASH_REDIS_REST_URL and UPSTASH_REDIS_REST_TOKEN are required".into(),
            ));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StoreError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        })
    }

    fn command(&self, args: &[&str]) -> Result<Value, StoreError> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    StoreError::Http(format!("Upstash request timed out: {e}"))
                } else {
                    StoreError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| StoreError::Http(e.to_string()))?;
        let reply: UpstashReply = match serde_json::from_str(&body) {
            Ok(reply) => reply,
            Err(_) if !status.is_success() => {
                return Err(StoreError::Upstash {
                    status: status.as_u16(),
                    body,
                })
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(error) = reply.error {
            tracing::warn!(command = args.first().copied(), %error, "Upstash command rejected");
            return Err(StoreError::Command(error));
        }
        if !status.is_success() {
            return Err(StoreError::Upstash {
                status: status.as_u16(),
                body,
            });
        }
        Ok(reply.result.unwrap_or(Value::Null))
    }
}

/// Stored text is JSON when written by us; anything else comes back as
/// a plain string.
fn decode_stored(raw: Value) -> Option<Value> {
    match raw {
        Value::Null => None,
        Value::String(text) => Some(serde_json::from_str(&text).unwrap_or(Value::String(text))),
        other => Some(other),
    }
}

fn string_items(result: Value) -> Result<Vec<String>, StoreError> {
    match result {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()),
        other => Err(StoreError::Command(format!("expected list reply, got {other}"))),
    }
}

impl KvStore for UpstashStore {
    fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(value)?;
        self.command(&["SET", key, &encoded]).map(|_| ())
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.command(&["GET", key]).map(decode_stored)
    }

    fn list_push(&self, list: &str, member: &str) -> Result<(), StoreError> {
        self.command(&["LPUSH", list, member]).map(|_| ())
    }

    fn list_range(&self, list: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let (start, stop) = (start.to_string(), stop.to_string());
        string_items(self.command(&["LRANGE", list, &start, &stop])?)
    }

    fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        self.command(&["HSET", key, field, value]).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_credentials_are_rejected() {
        assert!(matches!(
            UpstashStore::new("", "token", 5),
            Err(StoreError::NotConfigured(_))
        ));
        assert!(matches!(
            UpstashStore::new("https://example.upstash.io", " ", 5),
            Err(StoreError::NotConfigured(_))
        ));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let store = UpstashStore::new("https://example.upstash.io/", "t", 5).unwrap();
        assert_eq!(store.base_url, "https://example.upstash.io");
    }

    #[test]
    fn decode_json_text_and_plain_strings() {
        assert_eq!(
            decode_stored(json!("{\"id\":\"response_1\"}")),
            Some(json!({ "id": "response_1" }))
        );
        assert_eq!(decode_stored(json!("plain")), Some(json!("plain")));
        assert_eq!(decode_stored(Value::Null), None);
    }

    #[test]
    fn list_replies() {
        assert_eq!(string_items(json!(["b", "a"])).unwrap(), vec!["b", "a"]);
        assert!(string_items(Value::Null).unwrap().is_empty());
        assert!(string_items(json!(3)).is_err());
    }
}
